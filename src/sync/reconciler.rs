//! The reconciliation tick and its change cache.

use thiserror::Error;

use crate::provider::{ProviderError, RecordStore};
use crate::source::{IpSource, SourceError};

use super::{FamilyError, IpFamily};

/// The DNS record being reconciled, fixed by configuration.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    /// Fully-qualified domain the record lives under.
    pub domain: String,
    /// Label to manage under the domain.
    pub subdomain: String,
}

/// Write behavior, built once from configuration.
///
/// Provider credentials are not carried here; they are set on the
/// adapter when it is constructed.
#[derive(Debug, Clone, Copy)]
pub struct UpsertOptions {
    /// TTL in seconds applied to every written record.
    pub ttl: u32,
    /// Whether a missing record is created.
    pub create_if_missing: bool,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The address matches the last one applied; no provider call was
    /// made.
    Unchanged {
        /// The current public address.
        address: String,
    },
    /// The record was created or updated to the new address.
    Applied {
        /// The address that was written.
        address: String,
        /// The classified family of that address.
        family: IpFamily,
    },
}

/// Error type for a reconciliation tick.
///
/// Every variant aborts the tick without touching the change cache;
/// nothing is retried internally. The next scheduled tick re-attempts
/// the same diff passively.
#[derive(Debug, Error)]
pub enum TickError {
    /// Public IP discovery failed.
    #[error("IP discovery failed: {0}")]
    Source(#[from] SourceError),

    /// The discovered address matches neither IPv4 nor IPv6 syntax.
    #[error(transparent)]
    UnsupportedFamily(#[from] FamilyError),

    /// The provider call failed.
    #[error("Provider update failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Drives one DNS record toward the machine's current public address.
///
/// The reconciler owns the change cache: the last address *successfully*
/// written to the provider. A failed write leaves the cache untouched so
/// the next tick retries the same diff. The cache lives for the process
/// lifetime only; state is rebuilt fresh on restart.
///
/// `tick` takes `&mut self`, so two ticks on the same reconciler cannot
/// overlap; the run loop additionally awaits each tick to completion
/// before the next interval fires.
#[derive(Debug)]
pub struct Reconciler<S, R> {
    source: S,
    store: R,
    spec: RecordSpec,
    options: UpsertOptions,
    preferred: IpFamily,
    last_applied: Option<String>,
}

impl<S, R> Reconciler<S, R> {
    /// Creates a reconciler with an empty change cache.
    #[must_use]
    pub const fn new(
        source: S,
        store: R,
        spec: RecordSpec,
        options: UpsertOptions,
        preferred: IpFamily,
    ) -> Self {
        Self {
            source,
            store,
            spec,
            options,
            preferred,
            last_applied: None,
        }
    }

    /// Returns the last address successfully applied, if any.
    #[must_use]
    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }
}

impl<S: IpSource, R: RecordStore> Reconciler<S, R> {
    /// Runs one reconciliation pass.
    ///
    /// Obtains the current public address, classifies its family, and
    /// compares it by exact string equality against the change cache.
    /// On a match the tick ends with zero provider calls; otherwise the
    /// target is resolved and the record upserted, and only a confirmed
    /// write updates the cache.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`]; the cache is untouched on any error.
    pub async fn tick(&mut self) -> Result<TickOutcome, TickError> {
        let address = self.source.current_address(self.preferred).await?;
        let family = IpFamily::classify(&address)?;
        tracing::debug!("Current public address: {address} ({family})");

        if self.last_applied.as_deref() == Some(address.as_str()) {
            return Ok(TickOutcome::Unchanged { address });
        }

        let target = self.store.resolve_target(&self.spec.domain).await?;
        self.store
            .upsert_record(
                &target,
                &self.spec.subdomain,
                family.record_type(),
                &address,
                self.options.ttl,
                self.options.create_if_missing,
            )
            .await?;

        // Only a confirmed write moves the cache
        self.last_applied = Some(address.clone());
        Ok(TickOutcome::Applied { address, family })
    }
}
