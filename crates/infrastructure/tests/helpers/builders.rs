#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, MX};
use hickory_proto::rr::{Name, RData, Record};
use retryable_dns_domain::ResolverAddress;
use std::str::FromStr;

pub fn addresses(list: &[&str]) -> Vec<ResolverAddress> {
    list.iter()
        .map(|s| ResolverAddress::parse(s).expect("valid resolver address"))
        .collect()
}

pub fn a_record(name: &str, ttl: u32, ip: [u8; 4]) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        ttl,
        RData::A(A::new(ip[0], ip[1], ip[2], ip[3])),
    )
}

pub fn mx_record(name: &str, ttl: u32, preference: u16, exchange: &str) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        ttl,
        RData::MX(MX::new(preference, Name::from_str(exchange).unwrap())),
    )
}

/// Builder for canned responses to a given query.
pub struct ResponseBuilder {
    message: Message,
}

impl ResponseBuilder {
    pub fn new(id: u16) -> Self {
        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        Self { message }
    }

    pub fn answering(query: &Message) -> Self {
        let mut builder = Self::new(query.id());
        for q in query.queries() {
            builder.message.add_query(q.clone());
        }
        builder
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.message.set_response_code(rcode);
        self
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.message.add_answer(record);
        self
    }

    pub fn authority(mut self, record: Record) -> Self {
        self.message.add_name_server(record);
        self
    }

    pub fn truncated(mut self) -> Self {
        self.message.set_truncated(true);
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// Echoes the query with the given code and answers.
pub fn response_for(query: &Message, rcode: ResponseCode, answers: Vec<Record>) -> Message {
    answers
        .into_iter()
        .fold(ResponseBuilder::answering(query).rcode(rcode), |b, r| {
            b.answer(r)
        })
        .build()
}
