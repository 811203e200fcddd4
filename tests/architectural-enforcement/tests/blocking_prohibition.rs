//! Integration Test: Blocking Call Prohibition
//!
//! **Policy**: production code runs on the tokio runtime and must not block
//! it with synchronous HTTP or sleeps. Production code propagates errors
//! instead of panicking on them.

use architectural_enforcement::{assert_clean, find_violations};

const PRODUCTION_DIRS: [&str; 2] = ["core/src", "tui/src"];

#[test]
fn test_no_blocking_http_or_sleep() {
    let violations: Vec<_> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| find_violations(dir, &["reqwest::blocking", "thread::sleep"]))
        .collect();
    assert_clean("Blocking calls in production code", &violations);
}

#[test]
fn test_no_unwrap_or_expect() {
    let violations: Vec<_> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| find_violations(dir, &[".unwrap()", ".expect("]))
        .collect();
    assert_clean("unwrap()/expect() in production code", &violations);
}

#[test]
fn test_walk_finds_sources() {
    let lines = architectural_enforcement::production_lines("core/src");
    assert!(
        lines.iter().any(|(path, _, _)| path.ends_with("core/src/lib.rs")),
        "workspace walk should reach core/src/lib.rs"
    );
}
