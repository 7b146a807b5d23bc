//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::provider::ProviderKind;
use crate::source::SourceKind;
use crate::sync::IpFamily;

/// ddns-up: Dynamic DNS record updater
///
/// Periodically looks up the machine's public IP address and keeps a
/// DNS address record at a hosting provider in sync with it.
#[derive(Debug, Parser)]
#[command(name = "ddns-up")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// DNS provider hosting the record (required for run mode)
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderArg>,

    /// API token for the provider (required for run mode)
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Domain the record belongs to (required for run mode)
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Subdomain label to keep updated (required for run mode)
    #[arg(long, global = true)]
    pub subdomain: Option<String>,

    /// Public IP lookup service
    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// IP family of the managed record
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,

    /// Reconciliation interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// DNS record TTL in seconds
    #[arg(long)]
    pub ttl: Option<u32>,

    /// Create the record when it does not exist (default: true)
    #[arg(long, value_name = "BOOL")]
    pub create: Option<bool>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ddns-up
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ddns-up.toml")]
        output: PathBuf,
    },
}

/// DNS provider argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// `DigitalOcean` domain records API
    #[value(name = "digital-ocean")]
    DigitalOcean,
    /// Hetzner DNS API
    #[value(name = "hetzner")]
    Hetzner,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::DigitalOcean => Self::DigitalOcean,
            ProviderArg::Hetzner => Self::Hetzner,
        }
    }
}

/// IP source argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// ipify.org JSON API
    #[value(name = "ipify")]
    Ipify,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Ipify => Self::Ipify,
        }
    }
}

/// IP family argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    /// IPv4 (A record)
    #[value(name = "v4")]
    V4,
    /// IPv6 (AAAA record)
    #[value(name = "v6")]
    V6,
}

impl From<FamilyArg> for IpFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::V4 => Self::V4,
            FamilyArg::V6 => Self::V6,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
