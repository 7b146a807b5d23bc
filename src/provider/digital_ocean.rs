//! DigitalOcean adapter: records indexed directly under the domain.
//!
//! Endpoint shapes follow the DigitalOcean v2 API: a domain-scoped
//! existence check, a type-filtered record listing that tolerates 404 as
//! "no records", and numeric record ids used as URL path segments for
//! update and delete.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};

use super::{
    DnsRecord, ProviderError, RecordId, RecordType, Target, auth_header_value, find_record,
    unexpected_status,
};

const SERVER_URL: &str = "https://api.digitalocean.com/v2/domains";

/// Record as returned by the DigitalOcean records endpoint.
#[derive(Debug, Deserialize)]
struct DomainRecord {
    id: u64,
    #[serde(rename = "type")]
    record_type: String,
    name: String,
    data: String,
}

impl From<DomainRecord> for DnsRecord {
    fn from(record: DomainRecord) -> Self {
        Self {
            id: RecordId::Numeric(record.id),
            record_type: record.record_type,
            name: record.name,
            value: record.data,
        }
    }
}

/// Response body of the record listing endpoint.
#[derive(Debug, Deserialize)]
struct DomainRecordsResponse {
    domain_records: Vec<DomainRecord>,
}

/// Create/update payload; the address goes in the `data` field.
#[derive(Debug, Serialize)]
struct RecordPayload<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    data: &'a str,
    ttl: u32,
}

/// The direct provider adapter.
///
/// The target is the domain name itself; no zone resolution precedes
/// record listing. Credentials are carried in a `Authorization: Bearer`
/// header set once at construction.
#[derive(Debug)]
pub struct DigitalOcean<H> {
    client: H,
    auth: http::HeaderValue,
}

impl<H> DigitalOcean<H> {
    /// Creates the adapter with the given HTTP client and API key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Credentials`] when the key cannot form a
    /// valid header value.
    pub fn new(client: H, api_key: &str) -> Result<Self, ProviderError> {
        let auth = auth_header_value("Bearer ", api_key)?;
        Ok(Self { client, auth })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{SERVER_URL}/{path}"))
            .map_err(|e| ProviderError::Http(HttpError::InvalidUrl(e.to_string())))
    }

    /// Extracts the domain name this adapter addresses records under.
    fn domain_of<'a>(target: &'a Target) -> Result<&'a str, ProviderError> {
        match target {
            Target::Domain(domain) => Ok(domain),
            Target::Zone(_) => Err(ProviderError::UnsupportedTarget { expected: "domain" }),
        }
    }
}

impl<H: HttpClient> DigitalOcean<H> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        let request = request.with_header(http::header::AUTHORIZATION, self.auth.clone());
        Ok(self.client.request(request).await?)
    }

    async fn fetch_records(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let mut url = self.endpoint(&format!("{domain}/records"))?;
        url.query_pairs_mut()
            .append_pair("type", record_type.as_str());

        let response = self.send(HttpRequest::get(url)).await?;
        match response.status {
            http::StatusCode::OK => {
                let body: DomainRecordsResponse =
                    response.json().map_err(ProviderError::Json)?;
                Ok(body.domain_records.into_iter().map(Into::into).collect())
            }
            // A domain with no records of this type answers 404
            http::StatusCode::NOT_FOUND => Ok(Vec::new()),
            _ => Err(unexpected_status(&response)),
        }
    }
}

impl<H: HttpClient> super::RecordStore for DigitalOcean<H> {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        let url = self.endpoint(domain)?;
        let response = self.send(HttpRequest::get(url)).await?;

        match response.status {
            http::StatusCode::OK => Ok(Target::Domain(domain.to_string())),
            http::StatusCode::NOT_FOUND => Err(ProviderError::DomainNotFound {
                domain: domain.to_string(),
            }),
            _ => Err(unexpected_status(&response)),
        }
    }

    async fn list_records(
        &self,
        target: &Target,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        let domain = Self::domain_of(target)?;
        self.fetch_records(domain, record_type).await
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
        let domain = Self::domain_of(target)?;
        let records = self.fetch_records(domain, record_type).await?;
        let existing = find_record(&records, subdomain, record_type);

        let request = match existing {
            Some(record) => {
                let url = self.endpoint(&format!("{domain}/records/{}", record.id))?;
                HttpRequest::new(http::Method::PATCH, url)
            }
            None if allow_create => {
                let url = self.endpoint(&format!("{domain}/records"))?;
                HttpRequest::post(url)
            }
            None => {
                return Err(ProviderError::RecordNotFound {
                    subdomain: subdomain.to_string(),
                    domain: domain.to_string(),
                });
            }
        };

        let payload = RecordPayload {
            record_type: record_type.as_str(),
            name: subdomain,
            data: value,
            ttl,
        };
        let response = self.send(request.with_json(&payload)).await?;

        // 200 on update, 201 on create
        match response.status {
            http::StatusCode::OK | http::StatusCode::CREATED => Ok(()),
            _ => Err(unexpected_status(&response)),
        }
    }

    async fn delete_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<(), ProviderError> {
        let domain = Self::domain_of(target)?;
        let records = self.fetch_records(domain, record_type).await?;

        let Some(record) = find_record(&records, subdomain, record_type) else {
            return Ok(());
        };

        let url = self.endpoint(&format!("{domain}/records/{}", record.id))?;
        let response = self.send(HttpRequest::delete(url)).await?;

        match response.status {
            http::StatusCode::NO_CONTENT => Ok(()),
            _ => Err(unexpected_status(&response)),
        }
    }
}
