//! Hetzner DNS adapter: records filtered by a resolved zone id.
//!
//! Endpoint shapes follow the Hetzner DNS v1 API: zone resolution via a
//! name-filtered zone listing, records as a top-level resource filtered
//! by `zone_id`, opaque string record ids, and 200 as the only accepted
//! write status.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};

use super::{
    DnsRecord, ProviderError, RecordId, RecordType, Target, Zone, auth_header_value, find_record,
    unexpected_status,
};

const SERVER_URL: &str = "https://dns.hetzner.com/api/v1";

/// Response body of the zone listing endpoint.
#[derive(Debug, Deserialize)]
struct ZonesResponse {
    zones: Vec<Zone>,
}

/// Record as returned by the Hetzner records endpoint.
#[derive(Debug, Deserialize)]
struct ZoneRecord {
    id: String,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    value: String,
}

impl From<ZoneRecord> for DnsRecord {
    fn from(record: ZoneRecord) -> Self {
        Self {
            id: RecordId::Opaque(record.id),
            record_type: record.record_type,
            name: record.name,
            value: record.value,
        }
    }
}

/// Response body of the record listing endpoint.
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<ZoneRecord>,
}

/// Create/update payload; unlike the direct adapter, the zone id travels
/// in the body and the address goes in the `value` field.
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    zone_id: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    value: &'a str,
    ttl: u32,
}

/// The zone-indirection provider adapter.
///
/// A zone must be resolved from the domain name before records can be
/// listed; it is resolved fresh on each tick and never cached here.
/// Credentials are carried in an `Auth-API-Token` header set once at
/// construction.
#[derive(Debug)]
pub struct Hetzner<H> {
    client: H,
    auth: http::HeaderValue,
}

impl<H> Hetzner<H> {
    /// Creates the adapter with the given HTTP client and API key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Credentials`] when the key cannot form a
    /// valid header value.
    pub fn new(client: H, api_key: &str) -> Result<Self, ProviderError> {
        let auth = auth_header_value("", api_key)?;
        Ok(Self { client, auth })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{SERVER_URL}/{path}"))
            .map_err(|e| ProviderError::Http(HttpError::InvalidUrl(e.to_string())))
    }

    /// Extracts the resolved zone this adapter addresses records under.
    fn zone_of<'a>(target: &'a Target) -> Result<&'a Zone, ProviderError> {
        match target {
            Target::Zone(zone) => Ok(zone),
            Target::Domain(_) => Err(ProviderError::UnsupportedTarget { expected: "zone" }),
        }
    }
}

impl<H: HttpClient> Hetzner<H> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let request = request.with_header(
            http::HeaderName::from_static("auth-api-token"),
            self.auth.clone(),
        );
        Ok(self.client.request(request).await?)
    }

    /// Expects 200 and deserializes the body, mapping everything else
    /// onto the error taxonomy.
    fn read_ok<T: serde::de::DeserializeOwned>(
        response: &HttpResponse,
    ) -> Result<T, ProviderError> {
        if response.status != http::StatusCode::OK {
            return Err(unexpected_status(response));
        }
        response.json().map_err(ProviderError::Json)
    }

    async fn fetch_records(
        &self,
        zone: &Zone,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let mut url = self.endpoint("records")?;
        url.query_pairs_mut().append_pair("zone_id", &zone.id);

        let response = self.send(HttpRequest::get(url)).await?;
        let body: RecordsResponse = Self::read_ok(&response)?;

        // The endpoint filters by zone only; type filtering is client-side
        Ok(body
            .records
            .into_iter()
            .filter(|r| r.record_type == record_type.as_str())
            .map(Into::into)
            .collect())
    }
}

impl<H: HttpClient> super::RecordStore for Hetzner<H> {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        let mut url = self.endpoint("zones")?;
        url.query_pairs_mut().append_pair("name", domain);

        let response = self.send(HttpRequest::get(url)).await?;
        let body: ZonesResponse = Self::read_ok(&response)?;

        body.zones
            .into_iter()
            .find(|zone| zone.name == domain)
            .map(Target::Zone)
            .ok_or_else(|| ProviderError::DomainNotFound {
                domain: domain.to_string(),
            })
    }

    async fn list_records(
        &self,
        target: &Target,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let zone = Self::zone_of(target)?;
        self.fetch_records(zone, record_type).await
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
        let zone = Self::zone_of(target)?;
        let records = self.fetch_records(zone, record_type).await?;
        let existing = find_record(&records, subdomain, record_type);

        let request = match existing {
            Some(record) => {
                let url = self.endpoint(&format!("records/{}", record.id))?;
                HttpRequest::new(http::Method::PUT, url)
            }
            None if allow_create => {
                let url = self.endpoint("records")?;
                HttpRequest::post(url)
            }
            None => {
                return Err(ProviderError::RecordNotFound {
                    subdomain: subdomain.to_string(),
                    domain: zone.name.clone(),
                });
            }
        };

        let payload = RecordPayload {
            zone_id: &zone.id,
            record_type: record_type.as_str(),
            name: subdomain,
            value,
            ttl,
        };
        let response = self.send(request.with_json(&payload)).await?;

        match response.status {
            http::StatusCode::OK => Ok(()),
            _ => Err(unexpected_status(&response)),
        }
    }

    async fn delete_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<(), ProviderError> {
        let zone = Self::zone_of(target)?;
        let records = self.fetch_records(zone, record_type).await?;

        let Some(record) = find_record(&records, subdomain, record_type) else {
            return Ok(());
        };

        let url = self.endpoint(&format!("records/{}", record.id))?;
        let response = self.send(HttpRequest::delete(url)).await?;

        match response.status {
            http::StatusCode::OK => Ok(()),
            _ => Err(unexpected_status(&response)),
        }
    }
}
