/// This crate turns expense descriptions into TF-IDF feature vectors and
/// classifies them into spending categories with a reported confidence.
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// Converts documents into sparse TF-IDF vectors over a vocabulary that is
/// frozen by the first successful `fit`.
///
/// Internally, it holds:
/// - The tokenizer
/// - The vocabulary (term -> index, first-appearance order)
/// - The document-frequency table of the training corpus
/// - The IDF weights
///
/// `TFIDFVectorizer<E>` is generic over the calculation engine `E`; the
/// default engine multiplies raw term counts by smoothed IDF
/// `ln((1 + N) / (1 + df)) + 1`. No normalization is applied.
///
/// # Serialization
/// Supported once fitted. Deserialize through `TFIDFData`.
pub use vectorizer::TFIDFVectorizer;

/// TF-IDF Vectorizer Data Structure for Serialization
/// Detached, serializable form of a fitted `TFIDFVectorizer`.
/// Convert back with `into_tf_idf_vectorizer`, which validates that the
/// vocabulary, document-frequency and IDF tables agree.
pub use vectorizer::serde::TFIDFData;

/// Vocabulary and document-frequency table built at fit time
pub use vectorizer::corpus::{Corpus, Vocabulary};

/// Per-document term counts
pub use vectorizer::term::TermFrequency;

/// Tokenizer with the standard English stop-word list
pub use vectorizer::tokenizer::Tokenizer;

/// TF IDF Calculation Engine Trait
/// Plug different weighting formulas into `TFIDFVectorizer<E>`.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Feature vector types
pub use vectorizer::{FeatureMatrix, FeatureVector, IDFVector};

/// Sparse vector with ascending indices
pub use utils::math::vector::SparseVec;

/// Classifier capability and the bundled scorers
/// - `MultinomialNaiveBayes`: trained statistical scorer
/// - `KeywordScorer`: keyword -> category rules with a fallback category
pub use classifier::{keyword::KeywordScorer, naive_bayes::MultinomialNaiveBayes, Distribution, Scorer};

/// Confidence resolution
pub use confidence::{ConfidenceResolver, Resolved};

/// Fit-once pipeline
pub use pipeline::{extract_features, FittedPipeline, Pipeline};

pub use config::{NaiveBayesConfig, PipelineConfig, StopWords, TokenizerConfig};
pub use error::{ClassifierError, Result};
