//! Public IP discovery.
//!
//! The reconciliation tick consumes an opaque [`IpSource`] that returns
//! the machine's current public address as a string; [`Ipify`] is the
//! production implementation backed by <https://api.ipify.org>.

mod ipify;


pub use ipify::Ipify;

use std::fmt;

use thiserror::Error;

use crate::http::HttpError;
use crate::sync::IpFamily;

/// Error type for public IP discovery.
///
/// Discovery failures are generic and never retried here; the next
/// scheduled tick re-attempts passively.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The discovery service could not be reached.
    #[error("IP source unavailable: {0}")]
    Unavailable(#[source] HttpError),

    /// The discovery service answered with a non-success status.
    #[error("IP source answered with status {status}")]
    UnexpectedStatus {
        /// The unexpected status code.
        status: http::StatusCode,
    },

    /// The discovery service answered with an unparseable body.
    #[error("IP source answered with a malformed body: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Supplies the machine's current public IP address.
///
/// Implementations perform a single outbound call with no retry and no
/// caching; the caller owns change detection.
pub trait IpSource: Send + Sync {
    /// Returns the current public address as a string.
    ///
    /// The preferred family is advisory; the source may answer with
    /// whichever family the machine's connectivity provides, and the
    /// caller classifies the result.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when discovery fails.
    fn current_address(
        &self,
        preferred: IpFamily,
    ) -> impl std::future::Future<Output = Result<String, SourceError>> + Send;
}

impl<T: IpSource> IpSource for &T {
    async fn current_address(&self, preferred: IpFamily) -> Result<String, SourceError> {
        (**self).current_address(preferred).await
    }
}

/// Which IP source implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// The ipify.org JSON endpoint.
    #[default]
    Ipify,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipify => f.write_str("ipify"),
        }
    }
}
