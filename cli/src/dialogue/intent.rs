//! # Intent Classification
//!
//! File: cli/src/dialogue/intent.rs
//! Author: Christi Mahu
//!
//! Maps normalized tokens to exactly one `Intent` by testing fixed keyword sets
//! in priority order. The first set that shares a token with the message wins,
//! so "hi, my phone is broken" is a greeting even though it also names an issue.
//!
use std::collections::HashSet;
use std::fmt;

/// Coarse category of what the customer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Farewell,
    ProductInfo,
    Issue,
    Order,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::ProductInfo => "product_info",
            Intent::Issue => "issue",
            Intent::Order => "order",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Multi-word entries ("see you", "not working") can never equal a single token;
// they are kept so the keyword sets read the same as the product documentation.
const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "greetings", "howdy"];
const FAREWELL_WORDS: &[&str] = &["bye", "goodbye", "farewell", "see you", "later", "end"];
const PRODUCT_INFO_WORDS: &[&str] = &[
    "specs",
    "details",
    "information",
    "tell",
    "about",
    "features",
    "cost",
    "price",
];
const ISSUE_WORDS: &[&str] = &[
    "problem",
    "issue",
    "broken",
    "not working",
    "help",
    "fix",
    "repair",
];
const ORDER_WORDS: &[&str] = &[
    "order",
    "purchase",
    "bought",
    "delivered",
    "shipping",
    "track",
];

/// Priority-ordered keyword rules. Evaluation order is the classification order.
const RULES: &[(&[&str], Intent)] = &[
    (GREETING_WORDS, Intent::Greeting),
    (FAREWELL_WORDS, Intent::Farewell),
    (PRODUCT_INFO_WORDS, Intent::ProductInfo),
    (ISSUE_WORDS, Intent::Issue),
    (ORDER_WORDS, Intent::Order),
];

/// Classifies a token sequence; order and duplicates of tokens are irrelevant.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> Intent {
    let token_set: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| token_set.contains(k)))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::General)
}
