//! # TechSupport Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure the dialogue engine is built on.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Compiled reply templates with slot-filling
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ChatbotError, Result}; // For error handling
//! use crate::core::templating::TemplateRegistry; // For reply templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
