use std::marker::PhantomData;

use serde::{ser::SerializeStruct, Deserialize, Serialize};

use crate::config::TokenizerConfig;
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{
    corpus::{Corpus, Vocabulary},
    tfidf::TFIDFEngine,
    tokenizer::Tokenizer,
    IDFVector, TFIDFVectorizer, DEFAULT_PARALLEL_THRESHOLD,
};

/// Detached data form of a fitted `TFIDFVectorizer`.
/// Holds the tokenizer settings, the vocabulary, the document-frequency
/// table and the IDF weights. Use `into_tf_idf_vectorizer` to rebuild a
/// vectorizer; the lengths of the three tables are checked on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFIDFData {
    pub tokenizer: TokenizerConfig,
    /// terms in index order
    pub vocabulary: Vocabulary,
    pub corpus: Corpus,
    pub idf: IDFVector,
}

impl TFIDFData {
    /// Rebuild a frozen vectorizer from persisted data
    ///
    /// # Errors
    /// * `NotFitted` - the data carries an empty vocabulary
    /// * `Persist` - vocabulary, document-frequency and IDF tables disagree
    pub fn into_tf_idf_vectorizer<E>(self) -> Result<TFIDFVectorizer<E>>
    where
        E: TFIDFEngine,
    {
        if self.vocabulary.is_empty() {
            return Err(ClassifierError::NotFitted);
        }
        let dim = self.vocabulary.len();
        if self.idf.len() != dim || self.corpus.vocab_size() != dim {
            return Err(ClassifierError::persist(format!(
                "table sizes disagree: vocabulary {}, document frequency {}, idf {}",
                dim,
                self.corpus.vocab_size(),
                self.idf.len()
            )));
        }
        let aligned = self
            .vocabulary
            .iter()
            .zip(self.corpus.term_counts.keys())
            .all(|(a, b)| a == &**b);
        if !aligned {
            return Err(ClassifierError::persist(
                "document-frequency table is not in vocabulary order",
            ));
        }
        Ok(TFIDFVectorizer {
            tokenizer: Tokenizer::new(self.tokenizer),
            vocabulary: self.vocabulary,
            corpus: self.corpus,
            idf_cache: self.idf,
            fitted: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            _marker: PhantomData,
        })
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Snapshot the frozen state
    ///
    /// # Errors
    /// * `NotFitted` - nothing to snapshot yet
    pub fn to_data(&self) -> Result<TFIDFData> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        Ok(TFIDFData {
            tokenizer: self.tokenizer.config().clone(),
            vocabulary: self.vocabulary.clone(),
            corpus: self.corpus.clone(),
            idf: self.idf_cache.clone(),
        })
    }
}

impl<E> Serialize for TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Serialized with the same fields as `TFIDFData`.
    /// Deserialize through `TFIDFData`.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if !self.fitted {
            return Err(serde::ser::Error::custom("cannot serialize an unfitted vectorizer"));
        }
        let mut state = serializer.serialize_struct("TFIDFData", 4)?;
        state.serialize_field("tokenizer", self.tokenizer.config())?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.serialize_field("corpus", &self.corpus)?;
        state.serialize_field("idf", &self.idf_cache)?;
        state.end()
    }
}
