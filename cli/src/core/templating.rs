//! # TechSupport Template System
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the template registry used by the response synthesizer
//! to fill slots such as `{{ product }}` and `{{ order_number }}` in reply
//! templates. Templates are compiled once, up front, so a malformed template is
//! reported while the chatbot is being built rather than in the middle of a
//! conversation.
//!
//! ## Architecture
//!
//! The registry wraps a single `tera::Tera` instance:
//! 1. `register` parses a template source under a unique name
//! 2. `render` fills the named template from a flat map of slot values
//!
//! Autoescaping is disabled: replies are plain text, never HTML.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let mut registry = TemplateRegistry::new();
//! registry.register("product_info/0", "Our {{ product }} ships with a warranty.")?;
//!
//! let mut slots = HashMap::new();
//! slots.insert("product".to_string(), "laptop".to_string());
//! let text = registry.render("product_info/0", &slots)?;
//! ```
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

/// Compiled set of named reply templates.
#[derive(Debug)]
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        Self { tera }
    }

    /// Compiles `source` and stores it under `name`, replacing any previous
    /// template with the same name.
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera.add_raw_template(name, source).map_err(|e| {
            anyhow!(ChatbotError::Template { source: e })
                .context(format!("Failed to compile response template '{}'", name))
        })?;
        debug!("Registered response template '{}'", name);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Renders the template registered as `name` with the given slot values.
    pub fn render(&self, name: &str, slots: &HashMap<String, String>) -> Result<String> {
        let context = tera::Context::from_serialize(slots).map_err(|e| {
            anyhow!(ChatbotError::Template { source: e })
                .context("Failed to create Tera context from slot map")
        })?;
        self.tera.render(name, &context).map_err(|e| {
            anyhow!(ChatbotError::Template { source: e })
                .context(format!("Tera rendering failed for template '{}'", name))
        })
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
