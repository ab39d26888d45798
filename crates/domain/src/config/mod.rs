//! Configuration module for the resolution client
//!
//! - `root`: Main configuration, file loading and CLI overrides
//! - `client`: Resolver list, retry budget and transport settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod client;
pub mod errors;
pub mod logging;
pub mod root;

pub use client::ClientConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
