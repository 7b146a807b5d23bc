//! Application execution logic.
//!
//! This module contains the main async execution loop that periodically
//! reconciles the managed DNS record with the current public IP.

use thiserror::Error;
use tokio::signal;
use tokio::time::MissedTickBehavior;

use ddns_up::config::ValidatedConfig;
use ddns_up::http::ReqwestClient;
use ddns_up::provider::DnsProvider;
use ddns_up::source::{Ipify, SourceKind};
use ddns_up::sync::{Reconciler, RecordSpec, TickOutcome, UpsertOptions};

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to construct the provider adapter.
    #[error("Failed to set up DNS provider: {0}")]
    ProviderSetup(#[source] ddns_up::provider::ProviderError),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the HTTP client, IP source, and provider adapter
/// 2. Builds the reconciler around them
/// 3. Reconciles once immediately, then on every interval tick until a
///    shutdown signal (Ctrl+C / SIGTERM) arrives
///
/// A tick runs to completion before the next interval fire is honored,
/// so two reconciliations never overlap. Tick failures are logged and
/// the loop keeps going; the next tick retries from scratch.
///
/// # Errors
///
/// Returns an error if the provider adapter cannot be constructed from
/// the configured credentials.
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::new();

    let store = DnsProvider::from_kind(config.provider, client.clone(), &config.api_key)
        .map_err(RunError::ProviderSetup)?;

    let source = match config.source {
        SourceKind::Ipify => Ipify::new(client),
    };

    let mut reconciler = Reconciler::new(
        source,
        store,
        RecordSpec {
            domain: config.domain,
            subdomain: config.subdomain,
        },
        UpsertOptions {
            ttl: config.ttl,
            create_if_missing: config.create_if_missing,
        },
        config.family,
    );

    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            _ = interval.tick() => {
                match reconciler.tick().await {
                    Ok(TickOutcome::Applied { address, family }) => {
                        tracing::info!("Record updated to {address} ({family})");
                    }
                    Ok(TickOutcome::Unchanged { address }) => {
                        tracing::debug!("Address {address} unchanged, nothing to do");
                    }
                    Err(e) => {
                        tracing::error!("Reconciliation failed: {e}");
                    }
                }
            }
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
