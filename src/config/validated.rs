//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::provider::ProviderKind;
use crate::source::SourceKind;
use crate::sync::IpFamily;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// DNS provider hosting the record (required)
    pub provider: ProviderKind,

    /// API token for the provider (required)
    pub api_key: String,

    /// Domain the record belongs to (required)
    pub domain: String,

    /// Subdomain label to keep updated (required)
    pub subdomain: String,

    /// Public IP lookup service
    pub source: SourceKind,

    /// IP family of the managed record
    pub family: IpFamily,

    /// Reconciliation interval
    pub interval: Duration,

    /// DNS record TTL in seconds
    pub ttl: u32,

    /// Whether a missing record is created on the first reconciliation
    pub create_if_missing: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    // The API key is deliberately left out
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ provider: {}, record: {}.{} ({}), source: {}, interval: {}s, ttl: {}s, \
             create_if_missing: {} }}",
            self.provider,
            self.subdomain,
            self.domain,
            self.family,
            self.source,
            self.interval.as_secs(),
            self.ttl,
            self.create_if_missing,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`provider`, `api_key`, `domain`, `subdomain`)
    /// - The provider, source, or family value is not recognized
    /// - The interval or TTL is zero
    /// - The API key is blank
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let provider = Self::resolve_provider(cli, toml)?;
        let api_key = Self::resolve_api_key(cli, toml)?;
        let domain = Self::resolve_domain(cli, toml)?;
        let subdomain = Self::resolve_subdomain(cli, toml)?;
        let source = Self::resolve_source(cli, toml)?;
        let family = Self::resolve_family(cli, toml)?;
        let interval = Self::resolve_interval(cli, toml)?;
        let ttl = Self::resolve_ttl(cli, toml)?;

        // Priority: CLI explicit > TOML > default
        let create_if_missing = cli
            .create
            .or_else(|| toml.and_then(|t| t.record.create_if_missing))
            .unwrap_or(defaults::CREATE_IF_MISSING);

        Ok(Self {
            provider,
            api_key,
            domain,
            subdomain,
            source,
            family,
            interval,
            ttl,
            create_if_missing,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_provider(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ProviderKind, ConfigError> {
        // CLI takes precedence
        if let Some(provider) = cli.provider {
            return Ok(provider.into());
        }

        // Fall back to TOML
        if let Some(toml) = toml {
            if let Some(ref kind) = toml.provider.kind {
                return parse_provider(kind);
            }
        }

        Err(ConfigError::missing(
            field::PROVIDER,
            "Use --provider or set provider.kind in config file",
        ))
    }

    fn resolve_api_key(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let api_key = cli
            .api_key
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.api_key.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Use --api-key or set provider.api_key in config file",
                )
            })?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(api_key.to_string())
    }

    fn resolve_domain(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        cli.domain
            .as_deref()
            .or_else(|| toml.and_then(|t| t.record.domain.as_deref()))
            .map(ToString::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::DOMAIN,
                    "Use --domain or set record.domain in config file",
                )
            })
    }

    fn resolve_subdomain(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        cli.subdomain
            .as_deref()
            .or_else(|| toml.and_then(|t| t.record.subdomain.as_deref()))
            .map(ToString::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SUBDOMAIN,
                    "Use --subdomain or set record.subdomain in config file",
                )
            })
    }

    fn resolve_source(cli: &Cli, toml: Option<&TomlConfig>) -> Result<SourceKind, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(source) = cli.source {
            return Ok(source.into());
        }

        if let Some(toml) = toml {
            if let Some(ref kind) = toml.source.kind {
                return parse_source(kind);
            }
        }

        Ok(SourceKind::default())
    }

    fn resolve_family(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpFamily, ConfigError> {
        // Priority: CLI explicit > TOML > default
        if let Some(family) = cli.family {
            return Ok(family.into());
        }

        if let Some(toml) = toml {
            if let Some(ref family) = toml.record.family {
                return parse_family(family);
            }
        }

        Ok(IpFamily::V4)
    }

    fn resolve_interval(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .interval
            .or_else(|| toml.and_then(|t| t.schedule.interval))
            .unwrap_or(defaults::INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_ttl(cli: &Cli, toml: Option<&TomlConfig>) -> Result<u32, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let ttl = cli
            .ttl
            .or_else(|| toml.and_then(|t| t.record.ttl))
            .unwrap_or(defaults::TTL_SECS);

        if ttl == 0 {
            return Err(ConfigError::InvalidTtl(
                "must be greater than 0".to_string(),
            ));
        }

        Ok(ttl)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_provider(s: &str) -> Result<ProviderKind, ConfigError> {
    match s.to_lowercase().as_str() {
        "digital-ocean" | "digitalocean" | "do" => Ok(ProviderKind::DigitalOcean),
        "hetzner" => Ok(ProviderKind::Hetzner),
        _ => Err(ConfigError::InvalidProvider {
            value: s.to_string(),
        }),
    }
}

fn parse_source(s: &str) -> Result<SourceKind, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipify" => Ok(SourceKind::Ipify),
        _ => Err(ConfigError::InvalidSource {
            value: s.to_string(),
        }),
    }
}

fn parse_family(s: &str) -> Result<IpFamily, ConfigError> {
    match s.to_lowercase().as_str() {
        "v4" | "ipv4" | "4" => Ok(IpFamily::V4),
        "v6" | "ipv6" | "6" => Ok(IpFamily::V6),
        _ => Err(ConfigError::InvalidFamily {
            value: s.to_string(),
        }),
    }
}
