//! DDNS-UP: Dynamic DNS Record Reconciler
//!
//! A library for keeping a DNS address record synchronized with the
//! machine's current public IP address through interchangeable DNS
//! provider backends.

pub mod config;
pub mod http;
pub mod provider;
pub mod source;
pub mod sync;
