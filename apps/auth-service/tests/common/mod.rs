#![allow(dead_code)]

// tests/common/mod.rs
use std::time::{Duration, SystemTime, UNIX_EPOCH};


// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    auth_test_support::logging::init();
}

/// Fixed reference instant used by lifecycle tests.
pub fn t0() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}

pub fn days(n: u64) -> Duration {
    Duration::from_secs(n * 24 * 60 * 60)
}
