//! Navigation metrics.
//!
//! # Metrics
//! - `navigation_commits_total` (counter): committed navigations by route
//! - `navigation_cancelled_total` (counter): dropped navigations by reason
//! - `navigation_redirect_loops_total` (counter): redirect hop limit exceeded
//! - `navigation_observer_failures_total` (counter): failing change observers
//! - `health_check_total` (counter): start-up health checks by outcome
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_commit(route: &str) {
    if enabled() {
        metrics::counter!("navigation_commits_total", "route" => route.to_string()).increment(1);
    }
}

pub fn record_cancelled(reason: &'static str) {
    if enabled() {
        metrics::counter!("navigation_cancelled_total", "reason" => reason).increment(1);
    }
}

pub fn record_redirect_loop() {
    if enabled() {
        metrics::counter!("navigation_redirect_loops_total").increment(1);
    }
}

pub fn record_observer_failure() {
    if enabled() {
        metrics::counter!("navigation_observer_failures_total").increment(1);
    }
}

pub fn record_health_check(outcome: &'static str) {
    if enabled() {
        metrics::counter!("health_check_total", "outcome" => outcome).increment(1);
    }
}
