//! Integration Test: Core Stays Headless
//!
//! `botsrig-core` owns sessions, the topic guard and the completion backend.
//! It must build and test without a terminal, so it may not depend on the
//! terminal crates or reach into the TUI.

use std::fs;

use architectural_enforcement::{assert_clean, find_violations, workspace_root};

#[test]
fn test_core_has_no_terminal_imports() {
    let violations = find_violations("core/src", &["ratatui", "crossterm", "botsrig_tui"]);
    assert_clean("Terminal code in botsrig-core", &violations);
}

#[test]
fn test_core_manifest_has_no_terminal_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml")).unwrap();
    for forbidden in ["ratatui", "crossterm", "botsrig-tui"] {
        assert!(
            !manifest.contains(forbidden),
            "core/Cargo.toml must not depend on {forbidden}"
        );
    }
}

#[test]
fn test_tui_does_not_call_http_directly() {
    let violations = find_violations("tui/src", &["reqwest::"]);
    assert_clean("HTTP calls in the TUI (use botsrig-core's backend)", &violations);
}

#[test]
fn test_core_runtime_is_test_only() {
    let manifest = fs::read_to_string(workspace_root().join("core/Cargo.toml")).unwrap();
    let dependencies = manifest
        .split("[dependencies]")
        .nth(1)
        .and_then(|rest| rest.split("[dev-dependencies]").next())
        .unwrap_or_default();

    assert!(
        !dependencies.lines().any(|line| line.trim_start().starts_with("tokio")),
        "tokio belongs in core's [dev-dependencies]"
    );
}
