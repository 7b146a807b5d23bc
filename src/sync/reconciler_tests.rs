//! Tests for the reconciliation tick and its change cache.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::http::HttpError;
use crate::provider::{
    DnsRecord, ProviderError, RecordId, RecordStore, RecordType, Target,
};
use crate::source::{IpSource, SourceError};

use super::{IpFamily, Reconciler, RecordSpec, TickError, TickOutcome, UpsertOptions};

/// IP source replaying a scripted sequence of results.
struct SequenceSource {
    results: Mutex<VecDeque<Result<String, SourceError>>>,
}

impl SequenceSource {
    fn new(results: Vec<Result<String, SourceError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }

    fn of(addresses: &[&str]) -> Self {
        Self::new(addresses.iter().map(|a| Ok((*a).to_string())).collect())
    }
}

impl IpSource for SequenceSource {
    async fn current_address(&self, _preferred: IpFamily) -> Result<String, SourceError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SourceError::Unavailable(HttpError::Timeout)))
    }
}

/// Record store that records every call and replays scripted upsert
/// results (defaulting to success).
#[derive(Default)]
struct RecordingStore {
    resolve_calls: AtomicUsize,
    upserts: Mutex<Vec<(RecordType, String)>>,
    upsert_results: Mutex<VecDeque<Result<(), ProviderError>>>,
}

impl RecordingStore {
    fn failing_once(error: ProviderError) -> Self {
        let store = Self::default();
        store.upsert_results.lock().unwrap().push_back(Err(error));
        store
    }

    fn upserts(&self) -> Vec<(RecordType, String)> {
        self.upserts.lock().unwrap().clone()
    }

    fn provider_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst) + self.upserts.lock().unwrap().len()
    }
}

impl RecordStore for RecordingStore {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Target::Domain(domain.to_string()))
    }

    async fn list_records(
        &self,
        _target: &Target,
        _record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        Ok(Vec::new())
    }

    async fn upsert_record(
        &self,
        _target: &Target,
        _subdomain: &str,
        record_type: RecordType,
        value: &str,
        _ttl: u32,
        _allow_create: bool,
    ) -> Result<(), ProviderError> {
        self.upserts
            .lock()
            .unwrap()
            .push((record_type, value.to_string()));
        self.upsert_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn delete_record(
        &self,
        _target: &Target,
        _subdomain: &str,
        _record_type: RecordType,
    ) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Record store over an in-memory record table, honoring the full
/// upsert contract.
#[derive(Default)]
struct InMemoryStore {
    records: Mutex<Vec<DnsRecord>>,
    next_id: AtomicU64,
    writes: AtomicUsize,
}

impl InMemoryStore {
    fn records(&self) -> Vec<DnsRecord> {
        self.records.lock().unwrap().clone()
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl RecordStore for InMemoryStore {
    async fn resolve_target(&self, domain: &str) -> Result<Target, ProviderError> {
        Ok(Target::Domain(domain.to_string()))
    }

    async fn list_records(
        &self,
        _target: &Target,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.record_type == record_type.as_str())
            .cloned()
            .collect())
    }

    async fn upsert_record(
        &self,
        target: &Target,
        subdomain: &str,
        record_type: RecordType,
        value: &str,
        _ttl: u32,
        allow_create: bool,
    ) -> Result<(), ProviderError> {
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.name == subdomain && r.record_type == record_type.as_str());

        match existing {
            Some(record) => {
                record.value = value.to_string();
            }
            None if allow_create => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                records.push(DnsRecord {
                    id: RecordId::Numeric(id),
                    record_type: record_type.as_str().to_string(),
                    name: subdomain.to_string(),
                    value: value.to_string(),
                });
            }
            None => {
                let Target::Domain(domain) = target else {
                    unreachable!()
                };
                return Err(ProviderError::RecordNotFound {
                    subdomain: subdomain.to_string(),
                    domain: domain.clone(),
                });
            }
        }

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_record(
        &self,
        _target: &Target,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<(), ProviderError> {
        self.records
            .lock()
            .unwrap()
            .retain(|r| !(r.name == subdomain && r.record_type == record_type.as_str()));
        Ok(())
    }
}

fn reconciler<S, R>(source: S, store: R, create_if_missing: bool) -> Reconciler<S, R> {
    Reconciler::new(
        source,
        store,
        RecordSpec {
            domain: "example.com".to_string(),
            subdomain: "www".to_string(),
        },
        UpsertOptions {
            ttl: 300,
            create_if_missing,
        },
        IpFamily::V4,
    )
}

#[tokio::test]
async fn unchanged_address_issues_no_provider_calls() {
    let source = SequenceSource::of(&["1.2.3.4", "1.2.3.4"]);
    let store = RecordingStore::default();
    let mut reconciler = reconciler(source, &store, true);

    let first = reconciler.tick().await.unwrap();
    assert!(matches!(first, TickOutcome::Applied { .. }));
    let calls_after_first = store.provider_calls();

    let second = reconciler.tick().await.unwrap();
    assert_eq!(
        second,
        TickOutcome::Unchanged {
            address: "1.2.3.4".to_string()
        }
    );
    assert_eq!(store.provider_calls(), calls_after_first);
}

#[tokio::test]
async fn changed_address_issues_exactly_one_write_per_tick() {
    let source = SequenceSource::of(&["1.2.3.4", "5.6.7.8"]);
    let store = RecordingStore::default();
    let mut reconciler = reconciler(source, &store, true);

    reconciler.tick().await.unwrap();
    reconciler.tick().await.unwrap();

    assert_eq!(
        store.upserts(),
        vec![
            (RecordType::A, "1.2.3.4".to_string()),
            (RecordType::A, "5.6.7.8".to_string()),
        ]
    );
    assert_eq!(reconciler.last_applied(), Some("5.6.7.8"));
}

#[tokio::test]
async fn failed_write_leaves_cache_and_next_tick_retries_same_value() {
    let source = SequenceSource::of(&["1.2.3.4", "1.2.3.4"]);
    let store = RecordingStore::failing_once(ProviderError::UnexpectedStatus {
        status: http::StatusCode::INTERNAL_SERVER_ERROR,
        body: None,
    });
    let mut reconciler = reconciler(source, &store, true);

    let err = reconciler.tick().await.unwrap_err();
    assert!(matches!(err, TickError::Provider(_)));
    assert_eq!(reconciler.last_applied(), None);

    // Same address again: the diff is still pending, so it is re-applied
    let outcome = reconciler.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Applied { .. }));
    assert_eq!(
        store.upserts(),
        vec![
            (RecordType::A, "1.2.3.4".to_string()),
            (RecordType::A, "1.2.3.4".to_string()),
        ]
    );
    assert_eq!(reconciler.last_applied(), Some("1.2.3.4"));
}

#[tokio::test]
async fn unclassifiable_address_aborts_before_any_provider_call() {
    let source = SequenceSource::of(&["not-an-ip"]);
    let store = RecordingStore::default();
    let mut reconciler = reconciler(source, &store, true);

    let err = reconciler.tick().await.unwrap_err();

    assert!(matches!(err, TickError::UnsupportedFamily(_)));
    assert_eq!(store.provider_calls(), 0);
    assert_eq!(reconciler.last_applied(), None);
}

#[tokio::test]
async fn source_failure_propagates_without_provider_calls() {
    let source = SequenceSource::new(vec![Err(SourceError::Unavailable(HttpError::Timeout))]);
    let store = RecordingStore::default();
    let mut reconciler = reconciler(source, &store, true);

    let err = reconciler.tick().await.unwrap_err();

    assert!(matches!(err, TickError::Source(_)));
    assert_eq!(store.provider_calls(), 0);
}

#[tokio::test]
async fn ipv6_address_targets_the_quad_a_record() {
    let source = SequenceSource::of(&["::1"]);
    let store = RecordingStore::default();
    let mut reconciler = reconciler(source, &store, true);

    let outcome = reconciler.tick().await.unwrap();

    assert_eq!(
        outcome,
        TickOutcome::Applied {
            address: "::1".to_string(),
            family: IpFamily::V6,
        }
    );
    assert_eq!(store.upserts(), vec![(RecordType::Aaaa, "::1".to_string())]);
}

#[tokio::test]
async fn missing_record_without_creation_fails_and_cache_stays_empty() {
    let source = SequenceSource::of(&["1.2.3.4"]);
    let store = InMemoryStore::default();
    let mut reconciler = reconciler(source, &store, false);

    let err = reconciler.tick().await.unwrap_err();

    assert!(matches!(
        err,
        TickError::Provider(ProviderError::RecordNotFound { .. })
    ));
    assert_eq!(reconciler.last_applied(), None);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn create_then_noop_then_update_scenario() {
    let source = SequenceSource::of(&["127.0.0.1", "127.0.0.1", "10.0.0.1"]);
    let store = InMemoryStore::default();
    let mut reconciler = reconciler(source, &store, true);

    // Tick 1: no record exists, one is created
    reconciler.tick().await.unwrap();
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "www");
    assert_eq!(records[0].record_type, "A");
    assert_eq!(records[0].value, "127.0.0.1");
    assert_eq!(store.writes(), 1);

    // Tick 2: same address, no provider write
    let outcome = reconciler.tick().await.unwrap();
    assert!(matches!(outcome, TickOutcome::Unchanged { .. }));
    assert_eq!(store.writes(), 1);

    // Tick 3: new address updates the existing record in place
    reconciler.tick().await.unwrap();
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value, "10.0.0.1");
    assert_eq!(store.writes(), 2);
    assert_eq!(reconciler.last_applied(), Some("10.0.0.1"));
}
