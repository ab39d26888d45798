use crate::errors::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// A name server endpoint in `host:port` form.
///
/// Entries configured without a port get `DEFAULT_DNS_PORT`. Hostnames are
/// kept as-is and only resolved when an exchange is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverAddress(Arc<str>);

impl ResolverAddress {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidResolver(
                "resolver address cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidResolver(format!(
                "'{}' contains whitespace",
                trimmed
            )));
        }

        if let Ok(addr) = trimmed.parse::<SocketAddr>() {
            return Ok(Self(Arc::from(addr.to_string())));
        }

        if let Ok(ip) = trimmed.parse::<IpAddr>() {
            let addr = SocketAddr::new(ip, DEFAULT_DNS_PORT);
            return Ok(Self(Arc::from(addr.to_string())));
        }

        match trimmed.rsplit_once(':') {
            Some((host, port)) => {
                if host.is_empty() || host.contains(':') {
                    return Err(DomainError::InvalidResolver(format!(
                        "'{}' is not a valid host:port",
                        trimmed
                    )));
                }
                port.parse::<u16>().map_err(|_| {
                    DomainError::InvalidResolver(format!("invalid port in '{}'", trimmed))
                })?;
                Ok(Self(Arc::from(trimmed)))
            }
            None => Ok(Self(Arc::from(format!(
                "{}:{}",
                trimmed, DEFAULT_DNS_PORT
            )))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Socket address when the host part is an IP literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.0.parse().ok()
    }

    /// Host and port split, for hostnames that still need a lookup.
    pub fn host_and_port(&self) -> Option<(&str, u16)> {
        let (host, port) = self.0.rsplit_once(':')?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        Some((host, port.parse().ok()?))
    }
}

impl fmt::Display for ResolverAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResolverAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ResolverAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
