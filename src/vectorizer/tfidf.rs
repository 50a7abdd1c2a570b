use crate::vectorizer::{corpus::Corpus, term::TermFrequency, IDFVector};

/// TF-IDF calculation engine
/// Plugs the weighting formulas into `TFIDFVectorizer<E>`.
pub trait TFIDFEngine {
    /// Weight of a term occurring `count` times in a document of `term_sum` terms
    fn tf(count: u64, term_sum: u64) -> f64;

    /// Weight of a term found in `doc_freq` of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f64;

    /// Build the IDF vector in vocabulary order
    /// # Arguments
    /// * `corpus` - document-frequency table, its term order is the vocabulary order
    fn idf_vec(corpus: &Corpus) -> IDFVector {
        let doc_num = corpus.get_doc_num();
        IDFVector {
            idf_vec: corpus
                .term_counts
                .values()
                .map(|&df| Self::idf(doc_num, df))
                .collect(),
            doc_num,
        }
    }

    /// Per-term weights of one document as (term, tf) pairs
    fn tf_iter(freq: &TermFrequency) -> Vec<(&str, f64)> {
        let term_sum = freq.term_sum();
        freq.iter()
            .map(|(term, count)| (term, Self::tf(count, term_sum)))
            .collect()
    }
}

/// Default engine
/// tf = raw count, idf = ln((1 + N) / (1 + df)) + 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn tf(count: u64, _term_sum: u64) -> f64 {
        count as f64
    }

    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}
