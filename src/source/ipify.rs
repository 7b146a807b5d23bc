//! ipify.org IP source implementation.

use serde::Deserialize;
use url::Url;

use crate::http::{HttpClient, HttpError, HttpRequest};
use crate::sync::IpFamily;

use super::{IpSource, SourceError};

const SERVER_URL: &str = "https://api.ipify.org";

/// Response body of the ipify JSON endpoint.
#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

/// IP source backed by the ipify.org service.
///
/// Performs `GET https://api.ipify.org/?format=json` and extracts the
/// `ip` field. The service reports whichever address family the
/// machine's route to it uses.
#[derive(Debug)]
pub struct Ipify<H> {
    client: H,
}

impl<H> Ipify<H> {
    /// Creates the source with the given HTTP client.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> IpSource for Ipify<H> {
    async fn current_address(&self, _preferred: IpFamily) -> Result<String, SourceError> {
        let mut url = Url::parse(SERVER_URL)
            .map_err(|e| SourceError::Unavailable(HttpError::InvalidUrl(e.to_string())))?;
        url.query_pairs_mut().append_pair("format", "json");

        let response = self
            .client
            .request(HttpRequest::get(url))
            .await
            .map_err(SourceError::Unavailable)?;

        if response.status != http::StatusCode::OK {
            return Err(SourceError::UnexpectedStatus {
                status: response.status,
            });
        }

        let body: IpifyResponse = response.json().map_err(SourceError::Malformed)?;
        Ok(body.ip)
    }
}
