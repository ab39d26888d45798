#![allow(dead_code)]
use super::builders::response_for;
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use retryable_dns_domain::{DomainError, ResolverAddress};
use retryable_dns_infrastructure::dns::DnsExchanger;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted exchange result.
#[derive(Clone)]
pub enum Scripted {
    Answer(ResponseCode, Vec<Record>),
    Fail(DomainError),
}

impl Scripted {
    pub fn timeout(server: &str) -> Self {
        Scripted::Fail(DomainError::TransportTimeout {
            server: server.to_string(),
        })
    }

    pub fn refused(server: &str) -> Self {
        Scripted::Fail(DomainError::TransportConnectionRefused {
            server: server.to_string(),
        })
    }
}

/// Exchanger replaying a script, then repeating `fallback` forever.
pub struct MockExchanger {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Scripted,
    delay: Duration,
    calls: AtomicUsize,
    resolvers: Mutex<Vec<ResolverAddress>>,
}

impl MockExchanger {
    pub fn new(script: Vec<Scripted>, fallback: Scripted) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            resolvers: Mutex::new(Vec::new()),
        }
    }

    pub fn always(outcome: Scripted) -> Self {
        Self::new(Vec::new(), outcome)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn resolvers_used(&self) -> Vec<ResolverAddress> {
        self.resolvers.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsExchanger for MockExchanger {
    async fn exchange(
        &self,
        query: &Message,
        resolver: &ResolverAddress,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.resolvers.lock().unwrap().push(resolver.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match next {
            Scripted::Answer(rcode, records) => Ok(response_for(query, rcode, records)),
            Scripted::Fail(e) => Err(e),
        }
    }
}
