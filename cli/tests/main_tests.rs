//! # TechSupport CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `techsupport` binary: standard flags,
//! subcommand help, and error reporting for bad configuration.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    techsupport_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat")
                .and(predicate::str::contains("ask"))
                .and(predicate::str::contains("analyze")),
        );
}

#[test]
fn test_version_flag() {
    techsupport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    techsupport_cmd().assert().failure();
}

#[test]
fn test_missing_config_file_reports_error() {
    techsupport_cmd()
        .args(["--config", "/definitely/not/here.toml", "ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_config_value_reports_error() {
    let (_dir, mut cmd) = isolated_cmd("[session]\npersonalization_rate = 2.0\n");
    cmd.args(["ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("personalization_rate"));
}

#[test]
fn test_broken_template_reports_error() {
    let (_dir, mut cmd) = isolated_cmd("[responses]\nproduct_info = [\"Our {{ product\"]\n");
    cmd.args(["ask", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("product_info/0"));
}

#[test]
fn test_template_with_unknown_slot_reports_error() {
    let (_dir, mut cmd) = isolated_cmd(
        "[responses]\nproduct_info = [\"Order {{ order_number }} for {{ product }}\"]\n",
    );
    cmd.args(["ask", "price of the laptop"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("{{").not())
        .stderr(
            predicate::str::contains("product_info/0")
                .and(predicate::str::contains("may only use the slots: product")),
        );
}
