//! DNS provider backends and the record store contract they satisfy.
//!
//! This module provides:
//! - The shared contract all adapters implement ([`RecordStore`])
//! - The provider-agnostic data model ([`DnsRecord`], [`Zone`], [`Target`])
//! - The direct adapter, records nested under the domain ([`DigitalOcean`])
//! - The zone-indirection adapter, records filtered by zone id ([`Hetzner`])
//! - Runtime backend selection ([`ProviderKind`], [`DnsProvider`])
//!
//! Adapters hold no local cache; every operation re-fetches remote state
//! with one or two outbound HTTP calls.

mod digital_ocean;
mod error;
mod hetzner;


pub use digital_ocean::DigitalOcean;
pub use error::ProviderError;
pub use hetzner::Hetzner;

use std::fmt;

use serde::Deserialize;

use crate::http::{HttpClient, HttpResponse};

/// DNS resource-record kind for an address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
}

impl RecordType {
    /// Returns the wire name of the record type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-native record identifier.
///
/// The direct adapter assigns numeric ids used as URL path segments;
/// the zone-indirection adapter uses opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    /// Numeric identifier (DigitalOcean).
    Numeric(u64),
    /// Opaque string identifier (Hetzner).
    Opaque(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Opaque(id) => f.write_str(id),
        }
    }
}

/// A DNS record as reported by a provider.
///
/// Identity within a provider is the `(name, record_type)` pair; at most
/// one live record should exist per pair, though providers do not enforce
/// this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Provider-native identifier.
    pub id: RecordId,
    /// Record type as reported by the provider ("A", "AAAA", ...).
    pub record_type: String,
    /// Record label (the subdomain).
    pub name: String,
    /// Record value (the address string).
    pub value: String,
}

/// A DNS zone, for providers that index records by zone rather than
/// directly by domain.
///
/// A zone has no independent lifecycle here: it is resolved fresh on
/// each tick and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier.
    pub id: String,
    /// Zone name (the domain).
    pub name: String,
}

/// The provider-specific handle under which records are listed and
/// written.
///
/// Direct providers address records by the domain name itself;
/// zone-indirection providers first resolve a [`Zone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The domain name itself (direct providers).
    Domain(String),
    /// A resolved zone (zone-indirection providers).
    Zone(Zone),
}

/// The contract every DNS provider adapter satisfies.
///
/// This is the only abstraction the reconciliation logic depends on.
/// All operations re-fetch remote state; implementations keep no cache.
pub trait RecordStore: Send + Sync {
    /// Resolves the provider-specific handle for a domain.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DomainNotFound`] when the provider has
    /// no matching domain or zone.
    fn resolve_target(
        &self,
        domain: &str,
    ) -> impl std::future::Future<Output = Result<Target, ProviderError>> + Send;

    /// Lists all records of the given type under the target.
    ///
    /// Returns an empty vector, not an error, when none exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for remote failures or a target
    /// variant belonging to a different adapter.
    fn list_records(
        &self,
        target: &Target,
        record_type: RecordType,
    ) -> impl std::future::Future<Output = Result<Vec<DnsRecord>, ProviderError>> + Send;

    /// Creates or updates the record matching `(subdomain, record_type)`.
    ///
    /// Exactly one match is updated in place. With no match the record
    /// is created when `allow_create` is true.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::RecordNotFound`] when no match exists
    /// and `allow_create` is false; no write is performed in that case.
    fn upsert_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
        value: &str,
        ttl: u32,
        allow_create: bool,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;

    /// Deletes the record matching `(subdomain, record_type)`.
    ///
    /// A missing record is a no-op, not an error; no delete call is
    /// issued in that case.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for remote failures.
    fn delete_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;
}

impl<T: RecordStore> RecordStore for &T {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        (**self).resolve_target(domain).await
    }

    async fn list_records(
        &self,
        target: &Target,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        (**self).list_records(target, record_type).await
    }

    async fn upsert_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
        value: &str,
        ttl: u32,
        allow_create: bool,
    ) -> Result<(), ProviderError> {
        (**self)
            .upsert_record(target, subdomain, record_type, value, ttl, allow_create)
            .await
    }

    async fn delete_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<(), ProviderError> {
        (**self).delete_record(target, subdomain, record_type).await
    }
}

/// Which DNS provider backend to use.
///
/// Selected once at startup from configuration, not per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Direct adapter: records are a nested resource under the domain.
    DigitalOcean,
    /// Zone-indirection adapter: records are filtered by zone id.
    Hetzner,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigitalOcean => f.write_str("digital-ocean"),
            Self::Hetzner => f.write_str("hetzner"),
        }
    }
}

/// The closed set of provider adapters, dispatched at runtime.
///
/// Constructed once at startup via [`DnsProvider::from_kind`]; the rest
/// of the system only sees the [`RecordStore`] contract.
#[derive(Debug)]
pub enum DnsProvider<H> {
    /// DigitalOcean backend.
    DigitalOcean(DigitalOcean<H>),
    /// Hetzner DNS backend.
    Hetzner(Hetzner<H>),
}

impl<H: HttpClient> DnsProvider<H> {
    /// Builds the adapter selected by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Credentials`] when the API key cannot be
    /// carried in the provider's authentication header.
    pub fn from_kind(kind: ProviderKind, client: H, api_key: &str) -> Result<Self, ProviderError> {
        match kind {
            ProviderKind::DigitalOcean => {
                DigitalOcean::new(client, api_key).map(Self::DigitalOcean)
            }
            ProviderKind::Hetzner => Hetzner::new(client, api_key).map(Self::Hetzner),
        }
    }
}

impl<H: HttpClient> RecordStore for DnsProvider<H> {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        match self {
            Self::DigitalOcean(p) => p.resolve_target(domain).await,
            Self::Hetzner(p) => p.resolve_target(domain).await,
        }
    }

    async fn list_records(
        &self,
        target: &Target,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        match self {
            Self::DigitalOcean(p) => p.list_records(target, record_type).await,
            Self::Hetzner(p) => p.list_records(target, record_type).await,
        }
    }

    async fn upsert_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
        value: &str,
        ttl: u32,
        allow_create: bool,
    ) -> Result<(), ProviderError> {
        match self {
            Self::DigitalOcean(p) => {
                p.upsert_record(target, subdomain, record_type, value, ttl, allow_create)
                    .await
            }
            Self::Hetzner(p) => {
                p.upsert_record(target, subdomain, record_type, value, ttl, allow_create)
                    .await
            }
        }
    }

    async fn delete_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<(), ProviderError> {
        match self {
            Self::DigitalOcean(p) => p.delete_record(target, subdomain, record_type).await,
            Self::Hetzner(p) => p.delete_record(target, subdomain, record_type).await,
        }
    }
}

/// Finds the record matching `(subdomain, record_type)` in
/// provider-returned order.
///
/// More than one live record per `(name, type)` pair is a provider-side
/// anomaly; the first match is used, with a warning, since list order is
/// not contractually defined by either provider.
fn find_record<'a>(
    records: &'a [DnsRecord],
    subdomain: &str,
    record_type: RecordType,
) -> Option<&'a DnsRecord> {
    let mut matches = records
        .iter()
        .filter(|r| r.name == subdomain && r.record_type == record_type.as_str());

    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            "Found {} records matching ({subdomain}, {record_type}); using the first in provider order",
            extra + 1,
        );
    }
    Some(first)
}

/// Maps a status outside an adapter's accepted set onto the error
/// taxonomy: 401/403 is an authentication failure, anything else an
/// unexpected remote error.
fn unexpected_status(response: &HttpResponse) -> ProviderError {
    if response.status == http::StatusCode::UNAUTHORIZED
        || response.status == http::StatusCode::FORBIDDEN
    {
        return ProviderError::Authentication {
            status: response.status,
        };
    }

    ProviderError::UnexpectedStatus {
        status: response.status,
        body: response.body_text().map(ToString::to_string),
    }
}

/// Builds the provider authentication header value from an API key.
fn auth_header_value(prefix: &str, api_key: &str) -> Result<http::HeaderValue, ProviderError> {
    http::HeaderValue::from_str(&format!("{prefix}{api_key}")).map_err(|e| {
        ProviderError::Credentials {
            reason: e.to_string(),
        }
    })
}
