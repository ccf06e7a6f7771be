//! # TechSupport Dialogue Engine
//!
//! File: cli/src/dialogue/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The rule-based pipeline that turns a customer message into a reply.
//!
//! ```text
//! raw text ─┬─> EntityExtractor ───────────────┐
//!           └─> TextNormalizer ─> classify ─> Intent ─> ResponseSynthesizer ─> reply
//! ```
//!
//! `session::Chatbot` runs the pipeline once per message and keeps the
//! per-conversation state (history, context, user name).
//!

/// Pattern rules for order numbers, dates, products and issue categories.
pub mod entities;
/// Priority-ordered keyword classification.
pub mod intent;
/// Lower-casing, stop-word removal and lemmatization.
pub mod normalizer;
/// Injectable randomness for template choice.
pub mod random;
/// Reply pools and slot-filling.
pub mod responses;
/// Per-conversation orchestration and state.
pub mod session;
