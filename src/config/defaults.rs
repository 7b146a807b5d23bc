//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default reconciliation interval in seconds.
pub const INTERVAL_SECS: u64 = 300;

/// Default DNS record TTL in seconds.
pub const TTL_SECS: u32 = 300;

/// Whether a missing record is created by default.
pub const CREATE_IF_MISSING: bool = true;

/// Default reconciliation interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}
