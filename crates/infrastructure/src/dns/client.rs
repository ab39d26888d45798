use super::forwarding::{render_message, MessageBuilder, ResponseParser};
use super::load_balancer::{
    AttemptBudget, AttemptOutcome, ResolverPool, RetryController, StatusPolicy,
};
use super::records::{EnrichmentAggregator, RecordExtractor};
use super::transport::{DnsExchanger, NetworkExchanger};
use hickory_proto::op::Message;
use retryable_dns_domain::{
    ClientConfig, DnsData, DomainError, RawResult, RecordType, Resolution, ResolverAddress,
    SimpleResult,
};
use std::sync::Arc;
use tracing::{debug, info};

/// DNS resolution client retrying across a pool of resolvers.
///
/// One client is meant to be built per resolver set and shared (behind an
/// `Arc`) by every task that resolves through it.
pub struct DnsClient {
    retry: RetryController,
}

impl DnsClient {
    pub fn new(
        resolvers: Vec<ResolverAddress>,
        max_retries: usize,
        exchanger: Arc<dyn DnsExchanger>,
    ) -> Result<Self, DomainError> {
        Self::with_pool(ResolverPool::new(resolvers)?, max_retries, exchanger)
    }

    pub fn with_pool(
        pool: ResolverPool,
        max_retries: usize,
        exchanger: Arc<dyn DnsExchanger>,
    ) -> Result<Self, DomainError> {
        let resolvers = pool.len();
        let retry = RetryController::new(pool, exchanger, max_retries)?;

        info!(resolvers, max_retries, "DNS client created");

        Ok(Self { retry })
    }

    /// Client talking to the network with the configured timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, DomainError> {
        let exchanger = Arc::new(NetworkExchanger::from_config(config));
        Self::new(
            config.resolver_addresses()?,
            config.max_retries,
            exchanger,
        )
    }

    pub fn resolvers(&self) -> &[ResolverAddress] {
        self.retry.pool().resolvers()
    }

    pub fn max_retries(&self) -> usize {
        self.retry.max_retries()
    }

    /// Resolves the A records of `host`.
    ///
    /// Collects every address in answer order; `ttl` is the TTL of the last
    /// A record seen.
    pub async fn resolve(&self, host: &str) -> Result<SimpleResult, DomainError> {
        let query = MessageBuilder::build_query(host, &RecordType::A)?;

        let (response, resolver) = self
            .retry
            .run(
                &query,
                AttemptBudget::Retrying,
                StatusPolicy::ShortCircuit,
                |_| {},
            )
            .await
            .into_result()?;

        let (addresses, ttl) = RecordExtractor::ipv4_addresses(&response);
        debug!(
            host,
            resolver = %resolver,
            addresses = addresses.len(),
            ttl,
            "Host resolved"
        );

        Ok(SimpleResult { addresses, ttl })
    }

    /// Resolves `record_type` records of `host` as presentation text.
    ///
    /// `raw` is refreshed from every decoded response, so on failure it still
    /// shows the last answer a resolver gave.
    pub async fn resolve_raw(&self, host: &str, record_type: RecordType) -> Resolution<RawResult> {
        let query = match MessageBuilder::build_query(host, &record_type) {
            Ok(query) => query,
            Err(e) => return Resolution::failed(RawResult::default(), e),
        };

        let mut raw = String::new();
        let outcome = self
            .retry
            .run(
                &query,
                AttemptBudget::Retrying,
                StatusPolicy::ShortCircuit,
                |response| raw = render_message(response),
            )
            .await;

        let values = match &outcome {
            AttemptOutcome::Success { response, .. } => {
                RecordExtractor::extract(response, record_type)
            }
            _ => Vec::new(),
        };

        debug!(host, record_type = %record_type, values = values.len(), "Raw lookup finished");

        let result = RawResult { values, raw };
        match outcome.into_result() {
            Ok(_) => Resolution::ok(result),
            Err(e) => Resolution::failed(result, e),
        }
    }

    /// Sends a caller-built query and returns the first decoded response,
    /// whatever its response code. Only transport failures are retried.
    pub async fn exchange(&self, query: &Message) -> Result<Message, DomainError> {
        let (response, resolver) = self
            .retry
            .run(
                query,
                AttemptBudget::Retrying,
                StatusPolicy::PassThrough,
                |_| {},
            )
            .await
            .into_result()?;

        debug!(
            id = query.id(),
            resolver = %resolver,
            status = ResponseParser::status(&response),
            "Exchange finished"
        );

        Ok(response)
    }

    /// Single-attempt enriched lookup.
    ///
    /// Exactly one resolver is asked, with no retry on any failure. The
    /// returned data is always usable: on an error status it carries the raw
    /// dump, status and resolver with empty record buckets; on an exchange
    /// failure only the domain is set.
    pub async fn resolve_enrich(&self, host: &str, record_type: RecordType) -> Resolution<DnsData> {
        let mut data = DnsData::new(host);

        let query = match MessageBuilder::build_query(host, &record_type) {
            Ok(query) => query,
            Err(e) => return Resolution::failed(data, e),
        };

        let outcome = self
            .retry
            .run(
                &query,
                AttemptBudget::SinglePass,
                StatusPolicy::ShortCircuit,
                |_| {},
            )
            .await;

        match outcome {
            AttemptOutcome::Success {
                response, resolver, ..
            } => {
                Self::describe_response(&mut data, &response, &resolver);
                data.records = EnrichmentAggregator::aggregate(&response);
                debug!(host, resolver = %resolver, records = data.records.len(), "Enriched lookup finished");
                Resolution::ok(data)
            }
            AttemptOutcome::TerminalFailure {
                response,
                resolver,
                status,
            } => {
                Self::describe_response(&mut data, &response, &resolver);
                Resolution::failed(
                    data,
                    DomainError::ServerStatus {
                        status: status.to_string(),
                    },
                )
            }
            AttemptOutcome::Exhausted {
                attempts,
                last_error,
            } => Resolution::failed(
                data,
                DomainError::Exhausted {
                    attempts,
                    source: Box::new(last_error),
                },
            ),
            AttemptOutcome::Aborted { error, .. } => Resolution::failed(data, error),
        }
    }

    fn describe_response(data: &mut DnsData, response: &Message, resolver: &ResolverAddress) {
        data.raw = render_message(response);
        data.status_code = ResponseParser::status(response).to_string();
        data.resolver = resolver.to_string();
    }
}
