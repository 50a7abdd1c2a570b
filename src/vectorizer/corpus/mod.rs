use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::vectorizer::{term::TermFrequency, tokenizer::Tokenizer};

/// Term -> index mapping fixed at fit time.
/// Indices follow first appearance: documents in input order, terms left to right.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

// order matters for index stability, IndexSet's own PartialEq ignores it
impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len() && self.terms.iter().eq(other.terms.iter())
    }
}

impl Vocabulary {
    pub fn new() -> Self {
        Self { terms: IndexSet::new() }
    }

    /// Rebuild from an ordered term list. Duplicates are rejected.
    pub fn from_terms<T>(terms: &[T]) -> Result<Self>
    where
        T: AsRef<str>,
    {
        let mut vocab = Self::new();
        for term in terms {
            if !vocab.terms.insert(term.as_ref().into()) {
                return Err(ClassifierError::persist(format!(
                    "duplicate vocabulary term: {}",
                    term.as_ref()
                )));
            }
        }
        Ok(vocab)
    }

    /// Index of a term, `None` for unknown terms
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| t.as_ref())
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_ref())
    }

    fn insert(&mut self, term: &str) -> usize {
        match self.terms.get_index_of(term) {
            Some(idx) => idx,
            None => self.terms.insert_full(term.into()).0,
        }
    }
}

/// Document-frequency table of the training corpus.
/// Keeps the training document count and, for every term, the number of
/// documents containing it at least once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of training documents
    pub doc_num: u64,
    /// term -> document frequency, in vocabulary order
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl PartialEq for Corpus {
    fn eq(&self, other: &Self) -> bool {
        self.doc_num == other.doc_num
            && self.term_counts.len() == other.term_counts.len()
            && self.term_counts.iter().eq(other.term_counts.iter())
    }
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's distinct terms to the corpus
    fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            *self.term_counts.entry(term.as_ref().into()).or_insert(0) += 1;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the document frequency of a term, 0 when unseen
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of unique terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Build vocabulary and document-frequency table from tokenized documents.
    ///
    /// # Errors
    /// `EmptyCorpus` when there are no documents or none of them has a term.
    pub fn build(freqs: &[TermFrequency]) -> Result<(Vocabulary, Corpus)> {
        let mut vocab = Vocabulary::new();
        let mut corpus = Corpus::new();
        for freq in freqs {
            let terms = freq.term_set_ref_str();
            for term in &terms {
                vocab.insert(term);
            }
            corpus.add_set(&terms);
        }
        if vocab.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }
        Ok((vocab, corpus))
    }

    /// Tokenize raw documents then [`Corpus::build`].
    pub fn build_from_docs<D>(tokenizer: &Tokenizer, documents: &[D]) -> Result<(Vocabulary, Corpus)>
    where
        D: AsRef<str>,
    {
        let freqs: Vec<TermFrequency> = documents
            .iter()
            .map(|doc| TermFrequency::from(tokenizer.tokenize(doc.as_ref()).as_slice()))
            .collect();
        Self::build(&freqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec!["coffee at starbucks", "starbucks latte coffee coffee", "monthly rent"]
    }

    #[test]
    fn indices_follow_first_appearance() {
        let (vocab, _) = Corpus::build_from_docs(&Tokenizer::default(), &docs()).unwrap();
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(terms, vec!["coffee", "starbucks", "latte", "monthly", "rent"]);
        assert_eq!(vocab.index_of("latte"), Some(2));
        assert_eq!(vocab.term_at(4), Some("rent"));
        assert_eq!(vocab.index_of("netflix"), None);
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let (_, corpus) = Corpus::build_from_docs(&Tokenizer::default(), &docs()).unwrap();
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_term_count("coffee"), 2);
        assert_eq!(corpus.get_term_count("rent"), 1);
        assert_eq!(corpus.get_term_count("netflix"), 0);
        assert_eq!(corpus.vocab_size(), 5);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let tokenizer = Tokenizer::default();
        let none: Vec<&str> = Vec::new();
        assert!(matches!(
            Corpus::build_from_docs(&tokenizer, &none),
            Err(ClassifierError::EmptyCorpus)
        ));
        assert!(matches!(
            Corpus::build_from_docs(&tokenizer, &["the", "", "of and"]),
            Err(ClassifierError::EmptyCorpus)
        ));
    }

    #[test]
    fn same_input_builds_same_vocabulary() {
        let tokenizer = Tokenizer::default();
        let (a, ca) = Corpus::build_from_docs(&tokenizer, &docs()).unwrap();
        let (b, cb) = Corpus::build_from_docs(&tokenizer, &docs()).unwrap();
        assert_eq!(a, b);
        assert_eq!(ca, cb);
    }

    #[test]
    fn vocabulary_equality_is_order_sensitive() {
        let a = Vocabulary::from_terms(&["rent", "coffee"]).unwrap();
        let b = Vocabulary::from_terms(&["coffee", "rent"]).unwrap();
        assert_ne!(a, b);
        assert!(Vocabulary::from_terms(&["rent", "rent"]).is_err());
    }
}
