//! CBOR blobs for the vectorizer and scorer state.
//!
//! The vectorizer and the scorer are stored separately so either can be
//! swapped; [`crate::pipeline::FittedPipeline::from_parts`] checks that a
//! reloaded pair still agrees on the feature dimensionality.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::vectorizer::{serde::TFIDFData, tfidf::TFIDFEngine, TFIDFVectorizer};

pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize,
{
    Ok(serde_cbor::to_vec(value)?)
}

pub fn from_bytes<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_cbor::from_slice(bytes)?)
}

/// Serialize a fitted vectorizer. Fails with `NotFitted` before fit.
pub fn save_vectorizer<E>(vectorizer: &TFIDFVectorizer<E>) -> Result<Vec<u8>>
where
    E: TFIDFEngine,
{
    to_bytes(&vectorizer.to_data()?)
}

/// Rebuild a frozen vectorizer from [`save_vectorizer`] output
pub fn load_vectorizer<E>(bytes: &[u8]) -> Result<TFIDFVectorizer<E>>
where
    E: TFIDFEngine,
{
    from_bytes::<TFIDFData>(bytes)?.into_tf_idf_vectorizer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{naive_bayes::MultinomialNaiveBayes, Scorer};
    use crate::error::ClassifierError;
    use crate::vectorizer::tfidf::DefaultTFIDFEngine;

    #[test]
    fn vectorizer_and_scorer_roundtrip() {
        let mut vectorizer: TFIDFVectorizer = TFIDFVectorizer::default();
        let matrix = vectorizer
            .fit_transform(&["coffee at starbucks", "monthly rent payment"])
            .unwrap();
        let mut nb = MultinomialNaiveBayes::default();
        nb.fit(&matrix, &["Food & Drink".to_string(), "Housing".to_string()])
            .unwrap();

        let v_bytes = save_vectorizer(&vectorizer).unwrap();
        let s_bytes = to_bytes(&nb).unwrap();

        let v2: TFIDFVectorizer = load_vectorizer::<DefaultTFIDFEngine>(&v_bytes).unwrap();
        let nb2: MultinomialNaiveBayes = from_bytes(&s_bytes).unwrap();

        assert_eq!(v2.vocabulary(), vectorizer.vocabulary());
        assert_eq!(v2.idf(), vectorizer.idf());
        assert_eq!(nb2, nb);
    }

    #[test]
    fn garbage_is_a_persist_error() {
        let res = load_vectorizer::<DefaultTFIDFEngine>(&[0x01, 0x02, 0x03]);
        assert!(matches!(res, Err(ClassifierError::Persist(_))));
    }

    #[test]
    fn unfitted_vectorizer_cannot_be_saved() {
        let v: TFIDFVectorizer = TFIDFVectorizer::default();
        assert!(matches!(save_vectorizer(&v), Err(ClassifierError::NotFitted)));
    }
}
