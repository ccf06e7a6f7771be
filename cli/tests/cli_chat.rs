//! # TechSupport CLI Chat Integration Tests
//!
//! File: cli/tests/cli_chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives the interactive `techsupport chat` REPL through piped stdin.
//!

mod common;
use common::*;
use predicates::prelude::*;

const QUIET_CONFIG: &str = r#"
[session]
personalization_rate = 0.0
"#;

#[test]
fn test_chat_welcome_and_reply() {
    let (_dir, mut cmd) = isolated_cmd(QUIET_CONFIG);
    cmd.args(["chat", "--no-delay"])
        .write_stdin("order 55555\n/quit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                "TechSupport Assistant: Hello! I'm the TechSupport Assistant. How can I help you today?",
            )
            .and(predicate::str::contains(
                "TechSupport Assistant: Let me look up information for order number 55555.",
            )),
        );
}

#[test]
fn test_chat_history_and_context() {
    let (_dir, mut cmd) = isolated_cmd(QUIET_CONFIG);
    cmd.args(["chat", "--no-delay"])
        .write_stdin("\n\nmy laptop order 12345 is broken\n/history\n/context\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("You: my laptop order 12345 is broken")
                .and(predicate::str::contains("product: laptop"))
                .and(predicate::str::contains("issue_type: hardware issue"))
                .and(predicate::str::contains("order_number: 12345")),
        );
}

#[test]
fn test_chat_empty_views_and_unknown_command() {
    let (_dir, mut cmd) = isolated_cmd(QUIET_CONFIG);
    cmd.args(["chat", "--no-delay"])
        .write_stdin("/history\n/context\n/dance\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No messages yet.")
                .and(predicate::str::contains("Nothing remembered yet."))
                .and(predicate::str::contains("Unknown command '/dance'")),
        );
}

#[test]
fn test_chat_survives_oversized_typing_delay() {
    let (_dir, mut cmd) = isolated_cmd(
        r#"
[session]
personalization_rate = 0.0
typing_delay_per_char = 1e300
max_typing_delay = 1e300
"#,
    );
    cmd.arg("chat")
        .write_stdin("hello\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("TechSupport Assistant: "));
}
