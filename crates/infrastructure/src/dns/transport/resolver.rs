use retryable_dns_domain::{DomainError, ResolverAddress};
use std::net::SocketAddr;
use std::time::Duration;

/// Turns a resolver address into a socket address, looking the host up
/// through the system resolver when it is not an IP literal.
pub async fn resolve_socket_addr(
    resolver: &ResolverAddress,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = resolver.socket_addr() {
        return Ok(addr);
    }

    let (hostname, port) = resolver
        .host_and_port()
        .ok_or_else(|| DomainError::ResolverUnresolvable(resolver.to_string()))?;

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host((hostname, port)))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: resolver.to_string(),
        })?
        .map_err(|e| {
            DomainError::ResolverUnresolvable(format!("{}: {}", resolver, e))
        })?;

    addrs
        .next()
        .ok_or_else(|| DomainError::ResolverUnresolvable(format!("{}: no addresses", resolver)))
}
