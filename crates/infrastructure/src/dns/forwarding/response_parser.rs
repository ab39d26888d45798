use hickory_proto::op::{Message, MessageType, ResponseCode};
use retryable_dns_domain::DomainError;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decodes a wire-format response.
    ///
    /// Undecodable bytes are reported as `InvalidDnsResponse`, which the
    /// retry loop treats like any other transport failure.
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        debug!(
            id = message.id(),
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(message)
    }

    /// Checks that `response` answers the query with id `query_id`.
    pub fn validate(query_id: u16, response: &Message) -> Result<(), DomainError> {
        if response.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "received a query instead of a response".into(),
            ));
        }
        if response.id() != query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response id {} does not match query id {}",
                response.id(),
                query_id
            )));
        }
        Ok(())
    }

    pub fn is_success(message: &Message) -> bool {
        message.response_code() == ResponseCode::NoError
    }

    pub fn status(message: &Message) -> &'static str {
        Self::rcode_to_status(message.response_code())
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            _ => "UNKNOWN",
        }
    }
}
