//! Helpers for controlling embedded test cluster behaviour.
//!
//! Database suites are opt-in through `STORE_PG_TESTS`. Once opted in, setup
//! failures fail the run unless `SKIP_TEST_CLUSTER` downgrades them to skips.

fn is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns true when `STORE_PG_TESTS` opts into the embedded cluster suites.
pub fn pg_tests_enabled() -> bool {
    is_truthy("STORE_PG_TESTS")
}

/// Returns true when `SKIP_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    is_truthy("SKIP_TEST_CLUSTER")
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns `None`.
/// Otherwise, panics with a clear failure message so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
