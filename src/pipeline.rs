//! Fit-once pipeline tying the vectorizer, a scorer and the confidence
//! resolver together.
//!
//! [`Pipeline`] is the UNFITTED -> FITTED state machine. A successful `fit`
//! produces a [`FittedPipeline`], which is immutable: inference never touches
//! the vocabulary, the IDF weights or the scorer.

use log::{debug, trace};
use rayon::prelude::*;

use crate::classifier::{Distribution, Scorer};
use crate::config::PipelineConfig;
use crate::confidence::{ConfidenceResolver, Resolved};
use crate::error::{ClassifierError, Result};
use crate::vectorizer::{corpus::Vocabulary, FeatureMatrix, IDFVector, TFIDFVectorizer};

/// Feature extraction step: fit a vectorizer on the descriptions and return
/// the training matrix, the labels in input order and the fitted vectorizer.
pub fn extract_features<D, L>(
    config: &PipelineConfig,
    pairs: &[(D, L)],
) -> Result<(FeatureMatrix, Vec<String>, TFIDFVectorizer)>
where
    D: AsRef<str> + Sync,
    L: AsRef<str>,
{
    let documents: Vec<&str> = pairs.iter().map(|(d, _)| d.as_ref()).collect();
    let labels: Vec<String> = pairs.iter().map(|(_, l)| l.as_ref().to_string()).collect();
    let mut vectorizer = TFIDFVectorizer::new(config.tokenizer.clone())
        .with_parallel_threshold(config.parallel_threshold);
    let matrix = vectorizer.fit_transform(&documents)?;
    Ok((matrix, labels, vectorizer))
}

/// Frozen vectorizer + fitted scorer.
#[derive(Debug, Clone)]
pub struct FittedPipeline<S>
where
    S: Scorer,
{
    vectorizer: TFIDFVectorizer,
    scorer: S,
    resolver: ConfidenceResolver,
    parallel_threshold: usize,
}

impl<S> FittedPipeline<S>
where
    S: Scorer,
{
    /// Train `scorer` on `(description, category)` pairs
    ///
    /// # Errors
    /// * `EmptyCorpus` - no pairs, or no description yields a term
    /// * `AlreadyFitted` - `scorer` was fitted before
    /// * `InvalidInput` - `distribution_tolerance` is negative or not finite
    pub fn fit<D, L>(config: PipelineConfig, mut scorer: S, pairs: &[(D, L)]) -> Result<Self>
    where
        D: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        if scorer.is_fitted() {
            return Err(ClassifierError::AlreadyFitted);
        }
        let resolver = ConfidenceResolver::new(config.distribution_tolerance)?;
        let (matrix, labels, vectorizer) = extract_features(&config, pairs)?;
        scorer.bind_vocabulary(vectorizer.vocabulary())?;
        scorer.fit(&matrix, &labels)?;
        debug!(
            "pipeline fitted: {} pairs, {} features, {} labels",
            pairs.len(),
            vectorizer.dim(),
            scorer.labels().len()
        );
        Ok(Self {
            vectorizer,
            scorer,
            resolver,
            parallel_threshold: config.parallel_threshold.max(1),
        })
    }

    /// Reassemble a pipeline from separately persisted parts
    ///
    /// # Errors
    /// * `NotFitted` - either part is unfitted
    /// * `DimensionMismatch` - the scorer was trained on another vocabulary size
    /// * `InvalidInput` - `distribution_tolerance` is negative or not finite
    pub fn from_parts(vectorizer: TFIDFVectorizer, scorer: S, config: &PipelineConfig) -> Result<Self> {
        let resolver = ConfidenceResolver::new(config.distribution_tolerance)?;
        if !vectorizer.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        let n_features = scorer.n_features().ok_or(ClassifierError::NotFitted)?;
        if n_features != vectorizer.dim() {
            return Err(ClassifierError::dimension_mismatch(n_features, vectorizer.dim()));
        }
        Ok(Self {
            vectorizer: vectorizer.with_parallel_threshold(config.parallel_threshold),
            scorer,
            resolver,
            parallel_threshold: config.parallel_threshold.max(1),
        })
    }

    /// Label and distribution for one description
    pub fn predict_with_distribution(&self, text: &str) -> Result<(String, Distribution)> {
        let row = self.vectorizer.transform_one(text)?;
        let dist = self.scorer.predict_distribution(&row)?;
        let resolved = self.resolver.resolve(&dist)?;
        Ok((resolved.label, dist))
    }

    /// Category and confidence for one description
    pub fn predict_one(&self, text: &str) -> Result<Resolved> {
        let row = self.vectorizer.transform_one(text)?;
        let dist = self.scorer.predict_distribution(&row)?;
        self.resolver.resolve(&dist)
    }

    /// Category and confidence per description, in input order
    pub fn predict_batch<D>(&self, documents: &[D]) -> Result<Vec<Resolved>>
    where
        D: AsRef<str> + Sync,
        S: Sync,
    {
        trace!("predicting batch of {}", documents.len());
        if documents.len() >= self.parallel_threshold {
            documents
                .par_iter()
                .map(|doc| self.predict_one(doc.as_ref()))
                .collect()
        } else {
            documents.iter().map(|doc| self.predict_one(doc.as_ref())).collect()
        }
    }

    pub fn vectorizer(&self) -> &TFIDFVectorizer {
        &self.vectorizer
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.vectorizer.vocabulary()
    }

    pub fn idf(&self) -> &IDFVector {
        self.vectorizer.idf()
    }

    pub fn labels(&self) -> &[String] {
        self.scorer.labels()
    }

    pub fn into_parts(self) -> (TFIDFVectorizer, S) {
        (self.vectorizer, self.scorer)
    }
}

/// UNFITTED -> FITTED state machine around [`FittedPipeline`].
#[derive(Debug)]
pub struct Pipeline<S>
where
    S: Scorer,
{
    config: PipelineConfig,
    state: PipelineState<S>,
}

#[derive(Debug)]
enum PipelineState<S>
where
    S: Scorer,
{
    Unfitted(S),
    Fitted(FittedPipeline<S>),
}

impl<S> Pipeline<S>
where
    S: Scorer + Clone,
{
    pub fn new(config: PipelineConfig, scorer: S) -> Self {
        Self {
            config,
            state: PipelineState::Unfitted(scorer),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, PipelineState::Fitted(_))
    }

    /// Train on `(description, category)` pairs. Succeeds once.
    ///
    /// # Errors
    /// * `AlreadyFitted` - second call
    /// * `EmptyCorpus` - no usable training text; the pipeline stays unfitted
    pub fn fit<D, L>(&mut self, pairs: &[(D, L)]) -> Result<&FittedPipeline<S>>
    where
        D: AsRef<str> + Sync,
        L: AsRef<str>,
    {
        let scorer = match &self.state {
            PipelineState::Fitted(_) => return Err(ClassifierError::AlreadyFitted),
            // a failed fit must leave the original scorer in place
            PipelineState::Unfitted(scorer) => scorer.clone(),
        };
        let fitted = FittedPipeline::fit(self.config.clone(), scorer, pairs)?;
        self.state = PipelineState::Fitted(fitted);
        self.fitted()
    }

    /// The fitted pipeline, `NotFitted` before `fit`
    pub fn fitted(&self) -> Result<&FittedPipeline<S>> {
        match &self.state {
            PipelineState::Fitted(fitted) => Ok(fitted),
            PipelineState::Unfitted(_) => Err(ClassifierError::NotFitted),
        }
    }

    pub fn predict_one(&self, text: &str) -> Result<Resolved> {
        self.fitted()?.predict_one(text)
    }

    pub fn predict_batch<D>(&self, documents: &[D]) -> Result<Vec<Resolved>>
    where
        D: AsRef<str> + Sync,
        S: Sync,
    {
        self.fitted()?.predict_batch(documents)
    }

    /// Consume the pipeline, keeping only the fitted part
    pub fn into_fitted(self) -> Result<FittedPipeline<S>> {
        match self.state {
            PipelineState::Fitted(fitted) => Ok(fitted),
            PipelineState::Unfitted(_) => Err(ClassifierError::NotFitted),
        }
    }
}
