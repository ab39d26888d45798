use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid resolver address: {0}")]
    InvalidResolver(String),

    #[error("Resolver pool must contain at least one address")]
    EmptyResolverPool,

    #[error("Maximum retries must be at least 1")]
    InvalidRetryCount,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Timeout waiting for response from {server}")]
    TransportTimeout { server: String },

    #[error("Connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Could not resolve resolver address: {0}")]
    ResolverUnresolvable(String),

    /// The server answered, but with a non-success response code.
    /// Displays as the bare status text (`NXDOMAIN`, `SERVFAIL`, ...).
    #[error("{status}")]
    ServerStatus { status: String },

    #[error("All {attempts} attempts failed, last error: {source}")]
    Exhausted {
        attempts: usize,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Errors tied to one resolver or to the network path to it. Another
    /// resolver may well succeed, so these are retried.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::ResolverUnresolvable(_)
                | DomainError::InvalidDnsResponse(_)
                | DomainError::IoError(_)
        )
    }

    /// Status text for `ServerStatus`, `None` otherwise.
    pub fn status(&self) -> Option<&str> {
        match self {
            DomainError::ServerStatus { status } => Some(status),
            _ => None,
        }
    }

    /// The final transport error of an exhausted retry loop.
    pub fn last_error(&self) -> Option<&DomainError> {
        match self {
            DomainError::Exhausted { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_displays_bare_status() {
        let err = DomainError::ServerStatus {
            status: "NXDOMAIN".to_string(),
        };
        assert_eq!(err.to_string(), "NXDOMAIN");
        assert_eq!(err.status(), Some("NXDOMAIN"));
        assert!(!err.is_transport_error());
    }

    #[test]
    fn test_transport_classification() {
        assert!(DomainError::TransportTimeout {
            server: "8.8.8.8:53".into()
        }
        .is_transport_error());
        assert!(DomainError::IoError("broken pipe".into()).is_transport_error());
        assert!(DomainError::InvalidDnsResponse("short".into()).is_transport_error());
        assert!(!DomainError::InvalidDomainName("..".into()).is_transport_error());
        assert!(!DomainError::EmptyResolverPool.is_transport_error());
    }

    #[test]
    fn test_exhausted_exposes_last_error() {
        let last = DomainError::TransportTimeout {
            server: "1.1.1.1:53".into(),
        };
        let err = DomainError::Exhausted {
            attempts: 3,
            source: Box::new(last.clone()),
        };
        assert_eq!(err.last_error(), Some(&last));
        assert!(err.to_string().contains("All 3 attempts failed"));
        assert!(err.to_string().contains("1.1.1.1:53"));
    }
}
