use serde::{Deserialize, Serialize};

use crate::classifier::Distribution;
use crate::error::{ClassifierError, Result};

/// Default allowed deviation of a distribution's sum from 1.0
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A label with its reported confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolved {
    pub label: String,
    /// maximum probability of the distribution, not calibrated
    pub confidence: f64,
}

/// Highest-probability entry. Equal probabilities resolve to the
/// lexicographically smallest label.
pub fn argmax_label(dist: &Distribution) -> Option<(&str, f64)> {
    dist.iter()
        .map(|(label, &p)| (label.as_str(), p))
        .fold(None, |best, (label, p)| match best {
            None => Some((label, p)),
            Some((best_label, best_p)) => {
                if p > best_p || (p == best_p && label < best_label) {
                    Some((label, p))
                } else {
                    Some((best_label, best_p))
                }
            }
        })
}

/// Turns a scorer's distribution into `(label, confidence)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceResolver {
    tolerance: f64,
}

impl Default for ConfidenceResolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ConfidenceResolver {
    /// # Errors
    /// `InvalidInput` if `tolerance` is negative, NaN or infinite.
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ClassifierError::invalid_input(format!(
                "distribution tolerance must be a finite non-negative number, got {tolerance}"
            )));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Reject empty, negative, non-finite or non-normalized distributions
    pub fn validate(&self, dist: &Distribution) -> Result<()> {
        if dist.is_empty() {
            return Err(ClassifierError::invalid_distribution("empty distribution"));
        }
        if let Some((label, p)) = dist.iter().find(|(_, p)| !p.is_finite() || **p < 0.0) {
            return Err(ClassifierError::invalid_distribution(format!(
                "probability {p} for {label:?} is not a finite non-negative number"
            )));
        }
        let sum: f64 = dist.values().sum();
        if (sum - 1.0).abs() > self.tolerance {
            return Err(ClassifierError::invalid_distribution(format!(
                "probabilities sum to {sum}"
            )));
        }
        Ok(())
    }

    pub fn resolve(&self, dist: &Distribution) -> Result<Resolved> {
        self.validate(dist)?;
        let (label, confidence) = argmax_label(dist)
            .ok_or_else(|| ClassifierError::invalid_distribution("empty distribution"))?;
        Ok(Resolved {
            label: label.to_string(),
            confidence,
        })
    }
}
