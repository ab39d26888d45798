use super::resolver::resolve_socket_addr;
use super::tcp::TcpTransport;
use super::udp::UdpTransport;
use super::Transport;
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use hickory_proto::op::Message;
use retryable_dns_domain::{ClientConfig, DomainError, ResolverAddress};
use std::time::{Duration, Instant};
use tracing::debug;

/// One request/response pair with a single resolver.
///
/// Implementations return the parsed response whatever its response code;
/// an `Err` always means the exchange itself failed (network, timeout,
/// undecodable or mismatched reply) and is worth retrying elsewhere.
#[async_trait]
pub trait DnsExchanger: Send + Sync {
    async fn exchange(
        &self,
        query: &Message,
        resolver: &ResolverAddress,
    ) -> Result<Message, DomainError>;
}

/// Exchanges over UDP, repeating over TCP when the UDP answer is truncated.
pub struct NetworkExchanger {
    timeout: Duration,
    tcp_fallback: bool,
}

impl NetworkExchanger {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            tcp_fallback: true,
        }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Duration::from_millis(config.query_timeout))
            .with_tcp_fallback(config.tcp_fallback)
    }

    async fn send_and_parse(
        transport: &Transport,
        query_id: u16,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let response = transport.send(query_bytes, timeout).await?;
        debug!(
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Response received"
        );
        let message = ResponseParser::parse(&response.bytes)?;
        ResponseParser::validate(query_id, &message)?;
        Ok(message)
    }
}

#[async_trait]
impl DnsExchanger for NetworkExchanger {
    async fn exchange(
        &self,
        query: &Message,
        resolver: &ResolverAddress,
    ) -> Result<Message, DomainError> {
        let start = Instant::now();
        let server_addr = resolve_socket_addr(resolver, self.timeout).await?;
        let query_bytes = MessageBuilder::serialize_message(query)?;

        let udp = Transport::Udp(UdpTransport::new(server_addr));
        let remaining = self.timeout.saturating_sub(start.elapsed());
        let message = Self::send_and_parse(&udp, query.id(), &query_bytes, remaining).await?;

        if message.truncated() && self.tcp_fallback {
            debug!(
                server = %server_addr,
                "Response truncated (TC bit), retrying via TCP"
            );
            let tcp = Transport::Tcp(TcpTransport::new(server_addr));
            let remaining = self
                .timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));
            return Self::send_and_parse(&tcp, query.id(), &query_bytes, remaining).await;
        }

        Ok(message)
    }
}
