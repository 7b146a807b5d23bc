//! Error types for DNS provider operations.

use thiserror::Error;

use crate::http::HttpError;

/// Error type for record store operations.
///
/// "Domain not found" and "record not found" are expected, non-retryable
/// outcomes rather than remote failures; anything outside an adapter's
/// accepted status set surfaces as [`ProviderError::UnexpectedStatus`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no domain or zone matching the configured name.
    #[error("No zone found with domain name '{domain}'.")]
    DomainNotFound {
        /// The domain name that failed to resolve.
        domain: String,
    },

    /// No record matched `(subdomain, type)` and creation was not allowed.
    #[error("Record '{subdomain}' was not found on '{domain}'.")]
    RecordNotFound {
        /// The managed subdomain label.
        subdomain: String,
        /// The domain the record was searched under.
        domain: String,
    },

    /// The provider rejected the configured credentials.
    #[error("Authentication rejected by provider (status {status})")]
    Authentication {
        /// The rejecting status code (401 or 403).
        status: http::StatusCode,
    },

    /// The credentials cannot be carried in an HTTP header.
    #[error("Invalid provider credentials: {reason}")]
    Credentials {
        /// Why the credential string was rejected.
        reason: String,
    },

    /// The provider answered with a status outside the accepted set.
    #[error("Unexpected provider response: status {status}")]
    UnexpectedStatus {
        /// The unexpected status code.
        status: http::StatusCode,
        /// Response body, when it is printable text.
        body: Option<String>,
    },

    /// The outbound HTTP call itself failed.
    #[error("Provider request failed: {0}")]
    Http(#[from] HttpError),

    /// The provider answered with a body that does not match its
    /// documented shape.
    #[error("Malformed provider response: {0}")]
    Json(#[source] serde_json::Error),

    /// A [`Target`](super::Target) variant belonging to a different
    /// adapter was passed in.
    #[error("Target kind not supported by this adapter (expected {expected})")]
    UnsupportedTarget {
        /// The target kind this adapter works with.
        expected: &'static str,
    },
}
