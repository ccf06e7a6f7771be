//! # TechSupport Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used by the TechSupport Assistant.
//! Errors only arise during *setup*: loading configuration, validating response
//! pools and compiling response templates. Processing a message is total over
//! its input and never fails, so there is no per-message error type.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ChatbotError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if rate > 1.0 {
//!     return Err(ChatbotError::Config(format!("rate out of range: {}", rate)))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the TechSupport Assistant.
#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Response pool '{pool}' must contain at least one entry.")]
    EmptyPool { pool: String },

    #[error("Template error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
