//! # TechSupport Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Public interface of the TechSupport Assistant: the rule-based dialogue engine
//! (`dialogue`) and the infrastructure it is configured with (`core`). The
//! `techsupport` binary is a thin terminal front end over this library, and the
//! integration tests in `cli/tests/` drive it through the same API.
//!
//! ```rust,ignore
//! use techsupport::core::config::Config;
//! use techsupport::dialogue::session::Chatbot;
//!
//! let mut bot = Chatbot::from_config(&Config::default(), None)?;
//! let reply = bot.process_message("My order 123456 hasn't shipped yet");
//! println!("{}", reply.text);
//! ```
//!
pub mod core;
pub mod dialogue;
