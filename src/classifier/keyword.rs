use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::{check_vector, sorted_labels, validate_training, Distribution, Scorer};
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{corpus::Vocabulary, FeatureMatrix, FeatureVector};

/// Category given when no keyword matches
pub const DEFAULT_FALLBACK: &str = "Other";

/// Built-in keyword -> category rules
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    ("coffee", "Food & Drink"),
    ("groceries", "Food & Drink"),
    ("internet", "Utilities"),
    ("rent", "Housing"),
    ("movie", "Entertainment"),
];

/// Rule-based scorer driven by a keyword -> category table.
///
/// The probability mass of a category is proportional to the summed feature
/// weight of its keywords in the vector. With no keyword present, the
/// fallback category gets everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScorer {
    rules: IndexMap<String, String>,
    fallback: String,
    /// (feature index, category) for rules found in the bound vocabulary
    bound: Vec<(usize, String)>,
    vocab_len: Option<usize>,
    classes: Vec<String>,
    n_features: Option<usize>,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES.iter().map(|(k, c)| (k.to_string(), c.to_string())),
            DEFAULT_FALLBACK,
        )
    }
}

impl KeywordScorer {
    /// Keywords are lowercased; a later rule for the same keyword wins.
    pub fn new<I, S>(rules: I, fallback: S) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(keyword, category)| (keyword.to_lowercase(), category))
                .collect(),
            fallback: fallback.into(),
            bound: Vec::new(),
            vocab_len: None,
            classes: Vec::new(),
            n_features: None,
        }
    }

    pub fn rules(&self) -> &IndexMap<String, String> {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolve keywords to feature indices.
    /// Keywords missing from the vocabulary never match.
    ///
    /// # Errors
    /// `AlreadyFitted` once `fit` has succeeded; the binding is frozen with it.
    pub fn bind(&mut self, vocabulary: &Vocabulary) -> Result<()> {
        if self.n_features.is_some() {
            return Err(ClassifierError::AlreadyFitted);
        }
        self.bound = self
            .rules
            .iter()
            .filter_map(|(keyword, category)| {
                vocabulary.index_of(keyword).map(|idx| (idx, category.clone()))
            })
            .collect();
        self.vocab_len = Some(vocabulary.len());
        debug!(
            "keyword scorer bound {} of {} rules",
            self.bound.len(),
            self.rules.len()
        );
        Ok(())
    }

    /// Number of rules resolved by the last `bind`
    pub fn bound_rules(&self) -> usize {
        self.bound.len()
    }
}

impl Scorer for KeywordScorer {
    fn fit(&mut self, matrix: &FeatureMatrix, labels: &[String]) -> Result<()> {
        if self.n_features.is_some() {
            return Err(ClassifierError::AlreadyFitted);
        }
        let vocab_len = self.vocab_len.ok_or_else(|| {
            ClassifierError::invalid_input("keyword scorer needs a vocabulary: call bind before fit")
        })?;
        let dim = validate_training(matrix, labels)?;
        if vocab_len != dim {
            return Err(ClassifierError::dimension_mismatch(vocab_len, dim));
        }
        let fallback = self.fallback.clone();
        self.classes = sorted_labels(
            self.rules
                .values()
                .chain(std::iter::once(&fallback))
                .chain(labels.iter()),
        );
        self.n_features = Some(dim);
        Ok(())
    }

    fn predict_distribution(&self, vector: &FeatureVector) -> Result<Distribution> {
        check_vector(self.n_features, vector)?;
        let mut dist: Distribution = self.classes.iter().map(|c| (c.clone(), 0.0)).collect();
        let mut total = 0.0;
        for (idx, category) in &self.bound {
            let weight = vector.get(*idx).unwrap_or(0.0);
            if weight > 0.0 {
                if let Some(slot) = dist.get_mut(category) {
                    *slot += weight;
                    total += weight;
                }
            }
        }
        if total > 0.0 {
            dist.values_mut().for_each(|p| *p /= total);
        } else if let Some(slot) = dist.get_mut(&self.fallback) {
            *slot = 1.0;
        }
        Ok(dist)
    }

    fn bind_vocabulary(&mut self, vocabulary: &Vocabulary) -> Result<()> {
        self.bind(vocabulary)
    }

    fn labels(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
