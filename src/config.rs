//! Configuration for tokenization, scoring and the pipeline.
//!
//! All structs derive `Serialize`/`Deserialize` with per-field defaults, so a
//! caller can load a partial JSON (or CBOR) document and get the remaining
//! values from `Default`.

use serde::{Deserialize, Serialize};

/// Which stop-word list the tokenizer drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// Standard English list
    #[default]
    English,
    /// Keep every token
    None,
    /// Caller supplied list, compared after lowercasing
    Custom(Vec<String>),
}

/// Tokenizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Lowercase text before splitting.
    pub lowercase: bool,
    /// Stop-word list applied after splitting.
    pub stop_words: StopWords,
    /// Tokens with fewer characters are dropped.
    pub min_term_chars: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            stop_words: StopWords::English,
            min_term_chars: 2,
        }
    }
}

/// Multinomial naive Bayes settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace/Lidstone) smoothing. Must be positive.
    pub alpha: f64,
    /// Learn class priors from label frequencies; uniform priors otherwise.
    pub fit_prior: bool,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_prior: true,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tokenizer: TokenizerConfig,
    /// Allowed deviation of a distribution's sum from 1.0.
    pub distribution_tolerance: f64,
    /// Batches at least this long are processed on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            distribution_tolerance: 1e-6,
            parallel_threshold: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: PipelineConfig = serde_json::from_str(r#"{"parallel_threshold": 8}"#).unwrap();
        assert_eq!(cfg.parallel_threshold, 8);
        assert_eq!(cfg.distribution_tolerance, 1e-6);
        assert_eq!(cfg.tokenizer, TokenizerConfig::default());
    }

    #[test]
    fn custom_stop_words_from_json() {
        let cfg: TokenizerConfig =
            serde_json::from_str(r#"{"stop_words": {"custom": ["payment"]}, "min_term_chars": 1}"#).unwrap();
        assert_eq!(cfg.stop_words, StopWords::Custom(vec!["payment".to_string()]));
        assert_eq!(cfg.min_term_chars, 1);
        assert!(cfg.lowercase);
    }
}
