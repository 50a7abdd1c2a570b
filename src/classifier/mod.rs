//! Classifier capability consumed by the pipeline.
//!
//! Any type implementing [`Scorer`] can sit behind the vectorizer: it is fitted
//! on a feature matrix plus labels, then maps a feature vector to a
//! probability distribution over the labels it knows.

pub mod keyword;
pub mod naive_bayes;

use indexmap::IndexMap;

use crate::confidence::argmax_label;
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{corpus::Vocabulary, FeatureMatrix, FeatureVector};

/// Label -> probability, labels in ascending lexicographic order
pub type Distribution = IndexMap<String, f64>;

/// A trained (or trainable) scorer.
pub trait Scorer {
    /// Learn from one label per matrix row. Allowed once per instance.
    fn fit(&mut self, matrix: &FeatureMatrix, labels: &[String]) -> Result<()>;

    /// Probability over every known label
    fn predict_distribution(&self, vector: &FeatureVector) -> Result<Distribution>;

    /// Called with the frozen vocabulary right before `fit`.
    /// Scorers that reason about terms rather than feature positions resolve them here.
    fn bind_vocabulary(&mut self, _vocabulary: &Vocabulary) -> Result<()> {
        Ok(())
    }

    /// Known labels in ascending order, empty before fit
    fn labels(&self) -> &[String];

    /// Feature dimensionality seen at fit time
    fn n_features(&self) -> Option<usize>;

    fn is_fitted(&self) -> bool {
        self.n_features().is_some()
    }

    /// Most probable label, ties broken by the smallest label
    fn predict(&self, vector: &FeatureVector) -> Result<String> {
        let dist = self.predict_distribution(vector)?;
        argmax_label(&dist)
            .map(|(label, _)| label.to_string())
            .ok_or_else(|| ClassifierError::invalid_distribution("empty distribution"))
    }
}

/// Shared fit-time checks.
/// Returns the feature dimensionality of the matrix.
pub(crate) fn validate_training(matrix: &FeatureMatrix, labels: &[String]) -> Result<usize> {
    let first = matrix.first().ok_or(ClassifierError::EmptyCorpus)?;
    if matrix.len() != labels.len() {
        return Err(ClassifierError::invalid_input(format!(
            "{} rows but {} labels",
            matrix.len(),
            labels.len()
        )));
    }
    let dim = first.len();
    if let Some(row) = matrix.iter().find(|row| row.len() != dim) {
        return Err(ClassifierError::dimension_mismatch(dim, row.len()));
    }
    Ok(dim)
}

/// Predict-time guard shared by the scorers
pub(crate) fn check_vector(n_features: Option<usize>, vector: &FeatureVector) -> Result<()> {
    let expected = n_features.ok_or(ClassifierError::NotFitted)?;
    if vector.len() != expected {
        return Err(ClassifierError::dimension_mismatch(expected, vector.len()));
    }
    Ok(())
}

/// Sorted, de-duplicated label set
pub(crate) fn sorted_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out: Vec<String> = labels.into_iter().cloned().collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::vector::SparseVec;

    #[test]
    fn training_validation() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let empty: FeatureMatrix = Vec::new();
        assert!(matches!(validate_training(&empty, &[]), Err(ClassifierError::EmptyCorpus)));

        let matrix = vec![SparseVec::new(3), SparseVec::new(3)];
        assert_eq!(validate_training(&matrix, &labels).unwrap(), 3);
        assert!(matches!(
            validate_training(&matrix, &labels[..1]),
            Err(ClassifierError::InvalidInput(_))
        ));

        let ragged = vec![SparseVec::new(3), SparseVec::new(4)];
        assert!(matches!(
            validate_training(&ragged, &labels),
            Err(ClassifierError::DimensionMismatch { expected: 3, found: 4 })
        ));
    }

    #[test]
    fn vector_guard() {
        let v: FeatureVector = SparseVec::new(2);
        assert!(matches!(check_vector(None, &v), Err(ClassifierError::NotFitted)));
        assert!(matches!(
            check_vector(Some(5), &v),
            Err(ClassifierError::DimensionMismatch { expected: 5, found: 2 })
        ));
        assert!(check_vector(Some(2), &v).is_ok());
    }

    #[test]
    fn labels_are_sorted_and_unique() {
        let raw = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(sorted_labels(&raw), vec!["a", "b"]);
    }
}
