//! # Text Normalizer
//!
//! File: cli/src/dialogue/normalizer.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns free text into the ordered sequence of normalized tokens that the intent
//! classifier and the product lookup work on. The engine only depends on the
//! `TextNormalizer` trait; `RuleNormalizer` is the built-in English implementation.
//!
//! ## Pipeline
//!
//! 1. Lower-case the text
//! 2. Delete ASCII punctuation (`hasn't` becomes `hasnt`)
//! 3. Split on whitespace
//! 4. Drop English stop-words
//! 5. Reduce each token to its noun base form (`phones` becomes `phone`)
//!
//! ```rust,ignore
//! let tokens = RuleNormalizer::new().normalize("My phones are BROKEN!");
//! assert_eq!(tokens, vec!["phone", "broken"]);
//! ```
//!
use std::collections::HashSet;

/// Capability that produces normalized word tokens from raw text.
pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Vec<String>;
}

/// Standard English stop-word list.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Irregular plurals and words that merely look plural.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("mice", "mouse"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("data", "datum"),
    ("indices", "index"),
    ("devices", "device"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("lens", "lens"),
    ("yes", "yes"),
];

/// Rule-based English normalizer: stop-word filtering plus noun lemmatization.
#[derive(Debug, Clone)]
pub struct RuleNormalizer {
    stop_words: HashSet<&'static str>,
}

impl RuleNormalizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Reduces a lower-case token to its noun base form.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some((_, base)) = NOUN_EXCEPTIONS.iter().find(|(word, _)| *word == token) {
            return base.to_string();
        }
        if token.chars().count() <= 3 || !token.ends_with('s') {
            return token.to_string();
        }
        if let Some(stem) = token.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{}y", stem);
            }
        }
        for suffix in ["sses", "ches", "shes", "xes", "zzes"] {
            if token.ends_with(suffix) {
                return token[..token.len() - 2].to_string();
            }
        }
        if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
            return token.to_string();
        }
        token[..token.len() - 1].to_string()
    }
}

impl Default for RuleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for RuleNormalizer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        stripped
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.lemmatize(token))
            .collect()
    }
}
