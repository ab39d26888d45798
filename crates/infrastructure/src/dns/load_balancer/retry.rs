//! Retry controller shared by every resolution mode.
//!
//! Each attempt picks a fresh resolver from the pool. Transport failures move
//! on to the next attempt; any other exchange error aborts the run. A decoded
//! response ends the loop, either as a success or, under
//! `StatusPolicy::ShortCircuit`, as a terminal failure when its response code
//! is not `NOERROR`.

use super::pool::ResolverPool;
use crate::dns::forwarding::ResponseParser;
use crate::dns::transport::DnsExchanger;
use hickory_proto::op::Message;
use retryable_dns_domain::{DomainError, ResolverAddress};
use std::sync::Arc;
use tracing::{debug, warn};

/// How many attempts a run may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptBudget {
    /// Up to the controller's `max_retries` attempts.
    Retrying,
    /// Exactly one attempt, whatever happens.
    SinglePass,
}

/// What a decoded response with a non-success code means for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Stop immediately with `AttemptOutcome::TerminalFailure`.
    ShortCircuit,
    /// Hand the response back as a success; the caller inspects the code.
    PassThrough,
}

#[derive(Debug)]
pub enum AttemptOutcome {
    Success {
        response: Message,
        resolver: ResolverAddress,
        attempts: usize,
    },
    TerminalFailure {
        response: Message,
        resolver: ResolverAddress,
        status: &'static str,
    },
    Exhausted {
        attempts: usize,
        last_error: DomainError,
    },
    /// The exchanger failed in a way another resolver would not fix.
    Aborted {
        attempts: usize,
        error: DomainError,
    },
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }

    /// Collapses the outcome into the error taxonomy callers see.
    pub fn into_result(self) -> Result<(Message, ResolverAddress), DomainError> {
        match self {
            AttemptOutcome::Success {
                response, resolver, ..
            } => Ok((response, resolver)),
            AttemptOutcome::TerminalFailure { status, .. } => Err(DomainError::ServerStatus {
                status: status.to_string(),
            }),
            AttemptOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(DomainError::Exhausted {
                attempts,
                source: Box::new(last_error),
            }),
            AttemptOutcome::Aborted { error, .. } => Err(error),
        }
    }
}

pub struct RetryController {
    pool: ResolverPool,
    exchanger: Arc<dyn DnsExchanger>,
    max_retries: usize,
}

impl RetryController {
    pub fn new(
        pool: ResolverPool,
        exchanger: Arc<dyn DnsExchanger>,
        max_retries: usize,
    ) -> Result<Self, DomainError> {
        if max_retries == 0 {
            return Err(DomainError::InvalidRetryCount);
        }
        Ok(Self {
            pool,
            exchanger,
            max_retries,
        })
    }

    pub fn pool(&self) -> &ResolverPool {
        &self.pool
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Drives the attempts for `query`.
    ///
    /// `on_response` sees every decoded response, including the one that
    /// ends the run with a terminal failure.
    pub async fn run<F>(
        &self,
        query: &Message,
        budget: AttemptBudget,
        policy: StatusPolicy,
        mut on_response: F,
    ) -> AttemptOutcome
    where
        F: FnMut(&Message) + Send,
    {
        let max_attempts = match budget {
            AttemptBudget::Retrying => self.max_retries,
            AttemptBudget::SinglePass => 1,
        };
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let resolver = self.pool.pick();
            debug!(attempt, max_attempts, resolver = %resolver, "Exchanging query");

            match self.exchanger.exchange(query, resolver).await {
                Ok(response) => {
                    on_response(&response);

                    if policy == StatusPolicy::ShortCircuit && !ResponseParser::is_success(&response)
                    {
                        let status = ResponseParser::status(&response);
                        debug!(
                            attempt,
                            resolver = %resolver,
                            status,
                            "Server returned error status, not retrying"
                        );
                        return AttemptOutcome::TerminalFailure {
                            response,
                            resolver: resolver.clone(),
                            status,
                        };
                    }

                    debug!(attempt, resolver = %resolver, "Exchange succeeded");
                    return AttemptOutcome::Success {
                        response,
                        resolver: resolver.clone(),
                        attempts: attempt,
                    };
                }
                Err(e) if !e.is_transport_error() => {
                    warn!(attempt, resolver = %resolver, error = %e, "Exchange failed, not retrying");
                    return AttemptOutcome::Aborted {
                        attempts: attempt,
                        error: e,
                    };
                }
                Err(e) => {
                    debug!(attempt, resolver = %resolver, error = %e, "Exchange failed");
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.unwrap_or(DomainError::InvalidRetryCount);
        warn!(
            attempts = max_attempts,
            error = %last_error,
            "All resolution attempts failed"
        );
        AttemptOutcome::Exhausted {
            attempts: max_attempts,
            last_error,
        }
    }
}
