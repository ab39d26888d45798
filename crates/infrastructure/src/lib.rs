//! Retryable DNS Infrastructure Layer
//!
//! Wire codec glue, transports, resolver selection and the retrying
//! resolution client.
pub mod dns;

pub use dns::{DnsClient, DnsExchanger, NetworkExchanger, ResolverPool};
