use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::Message;
use hickory_proto::rr::RData;
use retryable_dns_domain::RecordType;

pub struct RecordExtractor;

impl RecordExtractor {
    /// Presentation text of every answer record of exactly `record_type`.
    ///
    /// Other answer records are ignored. A type outside the recognized set
    /// never matches, so it yields an empty list.
    pub fn extract(message: &Message, record_type: RecordType) -> Vec<String> {
        if !record_type.is_known() {
            return Vec::new();
        }

        message
            .answers()
            .iter()
            .filter(|record| RecordTypeMapper::from_hickory(record.record_type()) == record_type)
            .map(|record| record.to_string())
            .collect()
    }

    /// IPv4 addresses of the A answers plus the TTL of the last one.
    pub fn ipv4_addresses(message: &Message) -> (Vec<String>, u32) {
        let mut addresses = Vec::with_capacity(message.answers().len().min(8));
        let mut ttl = 0;

        for record in message.answers() {
            if let RData::A(a) = record.data() {
                addresses.push(a.0.to_string());
                ttl = record.ttl();
            }
        }

        (addresses, ttl)
    }
}
