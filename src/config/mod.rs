//! Configuration layer for ddns-up.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For required fields without defaults (`provider`, `api_key`, `domain`,
//! `subdomain`), CLI takes precedence over TOML.
//!
//! For optional fields with defaults (`source`, `family`, `interval`, `ttl`,
//! `create_if_missing`), explicit CLI values always win, then TOML, then
//! built-in defaults. `--create` takes an explicit boolean value rather than
//! acting as a flag, so a TOML `create_if_missing = true` can still be
//! overridden to `false` from the command line.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command, FamilyArg, ProviderArg, SourceArg};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
