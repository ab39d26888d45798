#![allow(dead_code)]
use super::builders::{a_record, response_for, ResponseBuilder};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock server answers UDP queries.
#[derive(Clone, Copy, Debug)]
pub enum MockReply {
    /// A record 93.184.216.34 with TTL 300.
    Answer,
    /// Empty answer with the given code.
    Status(ResponseCode),
    /// Response whose id differs from the query.
    WrongId,
    /// Never answers.
    Silent,
    /// TC set over UDP; the full answer is served over TCP on the same port.
    Truncated,
}

/// Loopback DNS server for exchanger tests.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Starts on an ephemeral port of 127.0.0.1.
    pub async fn start(reply: MockReply) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = match reply {
            MockReply::Truncated => Some(TcpListener::bind(addr).await?),
            _ => None,
        };

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::udp_response(&buf[..len], reply) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = accept(listener.as_ref()) => {
                        if let Ok((stream, _)) = accepted {
                            tokio::spawn(serve_tcp(stream));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn udp_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
        let query = Message::from_vec(query).ok()?;
        let response = match reply {
            MockReply::Answer => full_answer(&query),
            MockReply::Status(rcode) => response_for(&query, rcode, Vec::new()),
            MockReply::WrongId => ResponseBuilder::new(query.id().wrapping_add(1)).build(),
            MockReply::Silent => return None,
            MockReply::Truncated => ResponseBuilder::answering(&query).truncated().build(),
        };
        encode(&response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn full_answer(query: &Message) -> Message {
    response_for(
        query,
        ResponseCode::NoError,
        vec![a_record("example.com.", 300, [93, 184, 216, 34])],
    )
}

fn encode(message: &Message) -> Option<Vec<u8>> {
    let mut bytes = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut bytes);
    message.emit(&mut encoder).ok()?;
    Some(bytes)
}

async fn accept(
    listener: Option<&TcpListener>,
) -> std::io::Result<(tokio::net::TcpStream, SocketAddr)> {
    match listener {
        Some(listener) => listener.accept().await,
        None => std::future::pending().await,
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream) -> std::io::Result<()> {
    let len = stream.read_u16().await? as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;

    let Some(response) = Message::from_vec(&buf).ok().and_then(|q| encode(&full_answer(&q)))
    else {
        return Ok(());
    };

    stream.write_u16(response.len() as u16).await?;
    stream.write_all(&response).await?;
    stream.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_starts_on_ephemeral_port() {
        let server = MockDnsServer::start(MockReply::Answer).await.unwrap();
        assert_ne!(server.addr().port(), 0);
        server.shutdown();
    }
}
