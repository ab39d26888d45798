use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use retryable_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP transport (RFC 1035 §4.2.2, two-byte length prefix).
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    async fn exchange_once(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let length = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::IoError(format!(
                "DNS message too large for TCP: {} bytes",
                message_bytes.len()
            ))
        })?;

        let start = Instant::now();

        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| map_io_error(e, self.server_addr))?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&length.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        let remaining = timeout.saturating_sub(start.elapsed());
        tokio::time::timeout(remaining, stream.write_all(&framed))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| map_io_error(e, self.server_addr))?;

        debug!(server = %self.server_addr, bytes_sent = framed.len(), "TCP query sent");

        let remaining = timeout.saturating_sub(start.elapsed());
        let bytes = tokio::time::timeout(remaining, async {
            let mut len_buf = [0u8; 2];
            stream.read_exact(&mut len_buf).await?;
            let response_len = u16::from_be_bytes(len_buf) as usize;

            let mut response = vec![0u8; response_len];
            stream.read_exact(&mut response).await?;
            Ok::<_, std::io::Error>(response)
        })
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| map_io_error(e, self.server_addr))?;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.exchange_once(message_bytes, timeout).await
    }
}
