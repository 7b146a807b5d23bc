//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// DNS provider configuration section
    #[serde(default)]
    pub provider: ProviderSection,

    /// Managed record configuration section
    #[serde(default)]
    pub record: RecordSection,

    /// Public IP source configuration section
    #[serde(default)]
    pub source: SourceSection,

    /// Scheduling configuration section
    #[serde(default)]
    pub schedule: ScheduleSection,
}

/// DNS provider configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Provider name: "digital-ocean" or "hetzner"
    pub kind: Option<String>,

    /// API token for the provider
    pub api_key: Option<String>,
}

/// Managed record configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSection {
    /// Domain the record belongs to
    pub domain: Option<String>,

    /// Subdomain label to keep updated
    pub subdomain: Option<String>,

    /// IP family of the record: "v4" or "v6"
    pub family: Option<String>,

    /// DNS record TTL in seconds (default: 300)
    pub ttl: Option<u32>,

    /// Create the record when it does not exist (default: true)
    pub create_if_missing: Option<bool>,
}

/// Public IP source configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// IP source name: "ipify"
    pub kind: Option<String>,
}

/// Scheduling configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Reconciliation interval in seconds (default: 300)
    pub interval: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ddns-up Configuration File

[provider]
# DNS provider hosting the record (required)
# Accepted values: "digital-ocean", "hetzner"
# kind = "digital-ocean"

# API token for the provider (required)
# api_key = "your-token-here"

[record]
# Domain the record belongs to (required)
# domain = "example.com"

# Subdomain label to keep updated (required)
# subdomain = "home"

# IP family of the record (default: v4)
# Accepted values: "v4"/"ipv4"/"4" or "v6"/"ipv6"/"6"
# family = "v4"

# DNS record TTL in seconds (default: 300)
# ttl = 300

# Create the record when it does not exist (default: true)
# create_if_missing = true

[source]
# Public IP lookup service (default: ipify)
# kind = "ipify"

[schedule]
# Reconciliation interval in seconds (default: 300)
interval = 300
"#
    .to_string()
}
