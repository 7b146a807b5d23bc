//! Change detection and reconciliation.
//!
//! This module provides:
//! - IP address family classification ([`IpFamily`])
//! - The reconciliation state machine ([`Reconciler`]) and its
//!   single-value change cache
//! - Per-tick outcome and error types ([`TickOutcome`], [`TickError`])

mod family;
mod reconciler;

#[cfg(test)]
mod reconciler_tests;

pub use family::{FamilyError, IpFamily};
pub use reconciler::{Reconciler, RecordSpec, TickError, TickOutcome, UpsertOptions};
