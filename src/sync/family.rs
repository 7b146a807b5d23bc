//! IP address family classification.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;

use crate::provider::RecordType;

/// The address string matched neither IPv4 nor IPv6 syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("IP address family of '{address}' cannot be detected.")]
pub struct FamilyError {
    /// The unclassifiable address string.
    pub address: String,
}

/// IP address family, determining which record type is targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    /// IPv4; targets A records.
    V4,
    /// IPv6; targets AAAA records.
    V6,
}

impl IpFamily {
    /// Classifies an address string by syntactic validation.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError`] when the string is neither an IPv4 nor an
    /// IPv6 literal.
    pub fn classify(address: &str) -> Result<Self, FamilyError> {
        if address.parse::<Ipv4Addr>().is_ok() {
            Ok(Self::V4)
        } else if address.parse::<Ipv6Addr>().is_ok() {
            Ok(Self::V6)
        } else {
            Err(FamilyError {
                address: address.to_string(),
            })
        }
    }

    /// Returns the DNS record type for this family.
    #[must_use]
    pub const fn record_type(self) -> RecordType {
        match self {
            Self::V4 => RecordType::A,
            Self::V6 => RecordType::Aaaa,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => f.write_str("v4"),
            Self::V6 => f.write_str("v6"),
        }
    }
}
