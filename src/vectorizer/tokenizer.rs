use std::collections::HashSet;

use crate::config::{StopWords, TokenizerConfig};

/// Standard English stop-word list.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "amoungst",
    "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere",
    "are", "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done", "down", "due", "during",
    "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
    "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found", "four",
    "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him",
    "himself", "his", "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least",
    "less", "ltd", "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more",
    "moreover", "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely",
    "neither", "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor",
    "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves",
    "then", "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon",
    "these", "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

/// Splits text into normalized terms.
///
/// Deterministic: the same text always yields the same terms in the same
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenizer {
    config: TokenizerConfig,
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        let stop_words = match &config.stop_words {
            StopWords::English => ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            StopWords::None => HashSet::new(),
            StopWords::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        };
        Self { config, stop_words }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    #[inline]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Tokenize a document into terms
    ///
    /// # Arguments
    /// * `text` - raw document text
    ///
    /// # Returns
    /// * `Vec<String>` - terms in left-to-right order, empty for degenerate input
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        normalized
            .split(|c: char| !is_word_char(c))
            .filter(|s| !s.is_empty())
            .filter(|s| s.chars().count() >= self.config.min_term_chars.max(1))
            .filter(|s| !self.is_stop_word(s))
            .map(String::from)
            .collect()
    }
}

/// Letters, digits and `_`, the same class as regex `\w`
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_splits_and_drops_stop_words() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("Coffee at STARBUCKS, 2x!"),
            vec!["coffee", "starbucks", "2x"]
        );
    }

    #[test]
    fn degenerate_input_gives_no_terms() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \t\n ").is_empty());
        assert!(tokenizer.tokenize("the and of a").is_empty());
        assert!(tokenizer.tokenize("--- ... !!!").is_empty());
    }

    #[test]
    fn single_characters_follow_min_term_chars() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("x rent"), vec!["rent"]);

        let tokenizer = Tokenizer::new(TokenizerConfig {
            min_term_chars: 1,
            stop_words: StopWords::None,
            ..TokenizerConfig::default()
        });
        assert_eq!(tokenizer.tokenize("x rent a"), vec!["x", "rent", "a"]);
    }

    #[test]
    fn underscore_joins_words() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("Uber_Eats order"), vec!["uber_eats", "order"]);
        assert_eq!(tokenizer.tokenize("uber-eats"), vec!["uber", "eats"]);
    }

    #[test]
    fn custom_stop_words_are_case_insensitive() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            stop_words: StopWords::Custom(vec!["Payment".to_string()]),
            ..TokenizerConfig::default()
        });
        assert_eq!(tokenizer.tokenize("monthly rent payment"), vec!["monthly", "rent"]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("uber uber eats uber"),
            vec!["uber", "uber", "eats", "uber"]
        );
    }
}
