//! # Entity Extraction
//!
//! File: cli/src/dialogue/entities.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Pulls structured facts out of a raw customer message: an order number, a date,
//! a product mention and an issue category. Each field has its own rule and the
//! rules run independently of each other, so a single digit run may feed both the
//! order number and the date.
//!
//! ## Rules
//!
//! - **Order number**: optional `ord`/`order` lead-in, then a run of 5+ digits
//! - **Date**: `D/M/Y`-style numbers first, then `<month> D[,] Y`; matched text is kept verbatim
//! - **Product**: first normalized token found in the product table
//! - **Issue type**: first entry of the ordered issue table that occurs as a
//!   substring of the lower-cased text; table order decides ties
//!
use crate::dialogue::normalizer::TextNormalizer;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::trace;

static ORDER_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(ord[er]*[-\s]?[#:]?\s*)?(\d{5,})").expect("order number pattern is valid")
});

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
        r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]* \d{1,2}[,]? \d{2,4}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern is valid"))
    .collect()
});

/// Normalized token to canonical product name.
const PRODUCT_KEYWORDS: &[(&str, &str)] = &[
    ("laptop", "laptop"),
    ("computer", "computer"),
    ("phone", "smartphone"),
    ("smartphone", "smartphone"),
    ("tablet", "tablet"),
    ("headphone", "headphones"),
    ("speaker", "speaker"),
    ("watch", "smartwatch"),
    ("tv", "television"),
    ("monitor", "monitor"),
    ("keyboard", "keyboard"),
    ("mouse", "mouse"),
    ("printer", "printer"),
    ("camera", "camera"),
];

/// Substring keyword to issue category. Order is significant: the first key
/// found anywhere in the text wins.
const ISSUE_KEYWORDS: &[(&str, &str)] = &[
    ("broken", "hardware issue"),
    ("defective", "hardware issue"),
    ("not working", "hardware issue"),
    ("doesn't work", "hardware issue"),
    ("damaged", "hardware issue"),
    ("cracked", "hardware issue"),
    ("slow", "performance issue"),
    ("freezing", "performance issue"),
    ("hang", "performance issue"),
    ("crash", "performance issue"),
    ("refund", "refund request"),
    ("return", "return request"),
    ("cancel", "cancel order"),
    ("shipping", "shipping issue"),
    ("delivery", "shipping issue"),
    ("late", "shipping issue"),
    ("password", "account issue"),
    ("login", "account issue"),
    ("charge", "billing issue"),
    ("payment", "billing issue"),
];

/// Name of one entity slot, as used for conversation context keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityField {
    Product,
    IssueType,
    OrderNumber,
    Date,
}

impl EntityField {
    pub const ALL: [EntityField; 4] = [
        EntityField::Product,
        EntityField::IssueType,
        EntityField::OrderNumber,
        EntityField::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityField::Product => "product",
            EntityField::IssueType => "issue_type",
            EntityField::OrderNumber => "order_number",
            EntityField::Date => "date",
        }
    }
}

impl fmt::Display for EntityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities found in one message. Absent fields are `None`, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityBundle {
    pub product: Option<String>,
    pub issue_type: Option<String>,
    pub order_number: Option<String>,
    pub date: Option<String>,
}

impl EntityBundle {
    pub fn get(&self, field: EntityField) -> Option<&str> {
        match field {
            EntityField::Product => self.product.as_deref(),
            EntityField::IssueType => self.issue_type.as_deref(),
            EntityField::OrderNumber => self.order_number.as_deref(),
            EntityField::Date => self.date.as_deref(),
        }
    }

    /// Present fields in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (EntityField, &str)> + '_ {
        EntityField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Rule-based extractor over raw (non-normalized) text.
#[derive(Clone)]
pub struct EntityExtractor {
    normalizer: Arc<dyn TextNormalizer>,
}

impl EntityExtractor {
    /// The normalizer is used for the product lookup only.
    pub fn new(normalizer: Arc<dyn TextNormalizer>) -> Self {
        Self { normalizer }
    }

    pub fn extract(&self, text: &str) -> EntityBundle {
        let bundle = EntityBundle {
            product: self.find_product(text),
            issue_type: find_issue_type(text),
            order_number: find_order_number(text),
            date: find_date(text),
        };
        trace!("Extracted entities from {:?}: {:?}", text, bundle);
        bundle
    }

    fn find_product(&self, text: &str) -> Option<String> {
        self.normalizer.normalize(text).iter().find_map(|token| {
            PRODUCT_KEYWORDS
                .iter()
                .find(|(key, _)| key == token)
                .map(|(_, canonical)| canonical.to_string())
        })
    }
}

fn find_order_number(text: &str) -> Option<String> {
    ORDER_NUMBER_RE
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn find_date(text: &str) -> Option<String> {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
}

fn find_issue_type(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    ISSUE_KEYWORDS
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, category)| category.to_string())
}
