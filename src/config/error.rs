//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid DNS provider value.
    #[error("Invalid provider '{value}': expected digital-ocean or hetzner")]
    InvalidProvider {
        /// The invalid value provided
        value: String,
    },

    /// Invalid IP source value.
    #[error("Invalid IP source '{value}': expected ipify")]
    InvalidSource {
        /// The invalid value provided
        value: String,
    },

    /// Invalid IP family value.
    #[error("Invalid IP family '{value}': expected v4 or v6")]
    InvalidFamily {
        /// The invalid value provided
        value: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid record TTL.
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// The API key was provided but is blank.
    #[error("API key must not be empty")]
    EmptyApiKey,
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The DNS provider field.
    pub const PROVIDER: &str = "provider";
    /// The provider API key field.
    pub const API_KEY: &str = "api_key";
    /// The domain field.
    pub const DOMAIN: &str = "domain";
    /// The subdomain field.
    pub const SUBDOMAIN: &str = "subdomain";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
