use crate::errors::DomainError;
use crate::resolver_address::ResolverAddress;
use serde::{Deserialize, Serialize};

/// Resolution client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Name servers queried at random, `host:port` or bare IP (port 53)
    #[serde(default = "default_resolvers")]
    pub resolvers: Vec<String>,

    /// Attempts per resolution, each against a freshly picked resolver
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Per-exchange timeout in milliseconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Repeat truncated UDP answers over TCP
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl ClientConfig {
    pub fn resolver_addresses(&self) -> Result<Vec<ResolverAddress>, DomainError> {
        self.resolvers
            .iter()
            .map(|r| ResolverAddress::parse(r))
            .collect()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            resolvers: default_resolvers(),
            max_retries: default_max_retries(),
            query_timeout: default_query_timeout(),
            tcp_fallback: true,
        }
    }
}

fn default_resolvers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_max_retries() -> usize {
    3
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}
