//! Retryable DNS Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod resolution;
pub mod resolver_address;

pub use config::{CliOverrides, ClientConfig, Config, ConfigError, LoggingConfig};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use resolution::{DnsData, RawResult, RecordBuckets, Resolution, SimpleResult};
pub use resolver_address::{ResolverAddress, DEFAULT_DNS_PORT};
