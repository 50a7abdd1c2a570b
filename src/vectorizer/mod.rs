pub mod corpus;
pub mod serde;
pub mod term;
pub mod tfidf;
pub mod tokenizer;

use std::marker::PhantomData;

use ::serde::{Deserialize, Serialize};
use log::{debug, trace};
use rayon::prelude::*;

use crate::config::TokenizerConfig;
use crate::error::{ClassifierError, Result};
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{
    corpus::{Corpus, Vocabulary},
    term::TermFrequency,
    tfidf::{DefaultTFIDFEngine, TFIDFEngine},
    tokenizer::Tokenizer,
};

/// One document's TF-IDF weights, length = vocabulary size
pub type FeatureVector = SparseVec<f64>;
/// One feature vector per input document
pub type FeatureMatrix = Vec<FeatureVector>;

/// Batches at least this long are transformed on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct IDFVector {
    /// IDF per vocabulary index, dense because every term has a weight
    pub idf_vec: Vec<f64>,
    /// training document count
    pub doc_num: u64,
}

impl IDFVector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.idf_vec.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }
}

/// TF-IDF vectorizer with a vocabulary frozen at fit time.
///
/// `fit` may succeed once per instance. After that the vocabulary, the
/// document-frequency table and the IDF weights never change, and
/// `transform` only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct TFIDFVectorizer<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    pub(crate) tokenizer: Tokenizer,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) corpus: Corpus,
    pub(crate) idf_cache: IDFVector,
    pub(crate) fitted: bool,
    pub(crate) parallel_threshold: usize,
    pub(crate) _marker: PhantomData<fn() -> E>,
}

impl Default for TFIDFVectorizer<DefaultTFIDFEngine> {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    /// Create a new, unfitted vectorizer
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_tokenizer(Tokenizer::new(config))
    }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            vocabulary: Vocabulary::new(),
            corpus: Corpus::new(),
            idf_cache: IDFVector::new(),
            fitted: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            _marker: PhantomData,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    fn term_freqs<D>(&self, documents: &[D]) -> Vec<TermFrequency>
    where
        D: AsRef<str> + Sync,
    {
        let count = |doc: &D| TermFrequency::from(self.tokenizer.tokenize(doc.as_ref()).as_slice());
        if documents.len() >= self.parallel_threshold {
            documents.par_iter().map(count).collect()
        } else {
            documents.iter().map(count).collect()
        }
    }

    fn fit_freqs(&mut self, freqs: &[TermFrequency]) -> Result<()> {
        if self.fitted {
            return Err(ClassifierError::AlreadyFitted);
        }
        let (vocabulary, corpus) = Corpus::build(freqs)?;
        let idf_cache = E::idf_vec(&corpus);
        debug!(
            "fitted tf-idf vectorizer: {} documents, {} terms",
            corpus.get_doc_num(),
            vocabulary.len()
        );
        self.vocabulary = vocabulary;
        self.corpus = corpus;
        self.idf_cache = idf_cache;
        self.fitted = true;
        Ok(())
    }

    fn vectorize_freq(&self, freq: &TermFrequency) -> Result<FeatureVector> {
        let pairs: Vec<(usize, f64)> = E::tf_iter(freq)
            .into_iter()
            .filter_map(|(term, tf)| {
                // unknown terms are dropped
                let idx = self.vocabulary.index_of(term)?;
                let idf = self.idf_cache.get(idx)?;
                Some((idx, tf * idf))
            })
            .collect();
        SparseVec::from_pairs(self.vocabulary.len(), pairs)
    }

    fn vectorize_freqs(&self, freqs: &[TermFrequency]) -> Result<FeatureMatrix> {
        if freqs.len() >= self.parallel_threshold {
            freqs.par_iter().map(|f| self.vectorize_freq(f)).collect()
        } else {
            freqs.iter().map(|f| self.vectorize_freq(f)).collect()
        }
    }

    /// Build the vocabulary and IDF weights from training documents
    ///
    /// # Errors
    /// * `AlreadyFitted` - this instance was fitted before, state is untouched
    /// * `EmptyCorpus` - no document yields a term, instance stays unfitted
    pub fn fit<D>(&mut self, documents: &[D]) -> Result<()>
    where
        D: AsRef<str> + Sync,
    {
        if self.fitted {
            return Err(ClassifierError::AlreadyFitted);
        }
        let freqs = self.term_freqs(documents);
        self.fit_freqs(&freqs)
    }

    /// Feature vectors for `documents` against the frozen vocabulary
    ///
    /// # Errors
    /// * `NotFitted` - called before a successful `fit`
    pub fn transform<D>(&self, documents: &[D]) -> Result<FeatureMatrix>
    where
        D: AsRef<str> + Sync,
    {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        trace!("transforming {} documents", documents.len());
        let freqs = self.term_freqs(documents);
        self.vectorize_freqs(&freqs)
    }

    /// Feature vector for a single document
    pub fn transform_one(&self, text: &str) -> Result<FeatureVector> {
        if !self.fitted {
            return Err(ClassifierError::NotFitted);
        }
        let freq = TermFrequency::from(self.tokenizer.tokenize(text).as_slice());
        self.vectorize_freq(&freq)
    }

    /// `fit` followed by `transform` on the same documents, tokenizing each once
    pub fn fit_transform<D>(&mut self, documents: &[D]) -> Result<FeatureMatrix>
    where
        D: AsRef<str> + Sync,
    {
        if self.fitted {
            return Err(ClassifierError::AlreadyFitted);
        }
        let freqs = self.term_freqs(documents);
        self.fit_freqs(&freqs)?;
        self.vectorize_freqs(&freqs)
    }
}

/// Accessors for the frozen state
impl<E> TFIDFVectorizer<E>
where
    E: TFIDFEngine,
{
    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Feature dimensionality, 0 before fit
    #[inline]
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn idf(&self) -> &IDFVector {
        &self.idf_cache
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Terms in index order
    pub fn feature_names(&self) -> Vec<&str> {
        self.vocabulary.iter().collect()
    }

    /// IDF weight of a term, `None` when the term is unknown
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.vocabulary
            .index_of(term)
            .and_then(|idx| self.idf_cache.get(idx))
    }
}
