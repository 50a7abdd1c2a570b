use log::debug;
use serde::{Deserialize, Serialize};

use crate::classifier::{check_vector, sorted_labels, validate_training, Distribution, Scorer};
use crate::config::NaiveBayesConfig;
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{FeatureMatrix, FeatureVector};

/// Multinomial naive Bayes over non-negative feature weights.
///
/// `feature_log_prob[c][i] = ln((F_ci + alpha) / (F_c + alpha * dim))` where
/// `F_ci` is the summed weight of feature `i` over the rows labelled `c`.
/// The distribution is the softmax of the joint log-likelihood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MultinomialNaiveBayes {
    config: NaiveBayesConfig,
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: Option<usize>,
}

impl MultinomialNaiveBayes {
    pub fn new(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// ln P(class), in label order
    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    /// ln P(feature | class), one dense row per label
    pub fn feature_log_prob(&self) -> &[Vec<f64>] {
        &self.feature_log_prob
    }

    /// Unnormalized log posterior per label
    fn joint_log_likelihood(&self, vector: &FeatureVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(self.feature_log_prob.iter())
            .map(|(prior, log_prob)| prior + vector.dot_dense(log_prob))
            .collect()
    }
}

impl Scorer for MultinomialNaiveBayes {
    fn fit(&mut self, matrix: &FeatureMatrix, labels: &[String]) -> Result<()> {
        if self.n_features.is_some() {
            return Err(ClassifierError::AlreadyFitted);
        }
        let alpha = self.config.alpha;
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ClassifierError::invalid_input(format!(
                "alpha must be positive, got {alpha}"
            )));
        }
        let dim = validate_training(matrix, labels)?;
        if matrix
            .iter()
            .any(|row| row.raw_iter().any(|(_, v)| !(v.is_finite() && v >= 0.0)))
        {
            return Err(ClassifierError::invalid_input(
                "feature weights must be finite and non-negative",
            ));
        }

        let classes = sorted_labels(labels);
        let mut class_counts = vec![0u64; classes.len()];
        let mut feature_sums = vec![vec![0.0f64; dim]; classes.len()];
        for (row, label) in matrix.iter().zip(labels) {
            // classes is built from labels, the search cannot miss
            let c = classes
                .binary_search(label)
                .map_err(|_| ClassifierError::invalid_input(format!("unknown label {label}")))?;
            class_counts[c] += 1;
            for (idx, val) in row.raw_iter() {
                feature_sums[c][idx] += val;
            }
        }

        let n_rows = matrix.len() as f64;
        let n_classes = classes.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&count| {
                if self.config.fit_prior {
                    (count as f64 / n_rows).ln()
                } else {
                    -n_classes.ln()
                }
            })
            .collect();
        let feature_log_prob = feature_sums
            .iter()
            .map(|sums| {
                let total: f64 = sums.iter().sum::<f64>() + alpha * dim as f64;
                sums.iter().map(|s| ((s + alpha) / total).ln()).collect()
            })
            .collect();

        debug!(
            "fitted naive bayes: {} rows, {} classes, {} features",
            matrix.len(),
            classes.len(),
            dim
        );
        self.classes = classes;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        self.n_features = Some(dim);
        Ok(())
    }

    fn predict_distribution(&self, vector: &FeatureVector) -> Result<Distribution> {
        check_vector(self.n_features, vector)?;
        let jll = self.joint_log_likelihood(vector);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let norm: f64 = exps.iter().sum();
        Ok(self
            .classes
            .iter()
            .cloned()
            .zip(exps.into_iter().map(|e| e / norm))
            .collect())
    }

    fn labels(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }
}
