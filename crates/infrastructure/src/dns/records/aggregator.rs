use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::Message;
use retryable_dns_domain::RecordBuckets;
use tracing::trace;

pub struct EnrichmentAggregator;

impl EnrichmentAggregator {
    /// Groups every answer record by type in one pass. Records without a
    /// bucket are dropped.
    pub fn aggregate(message: &Message) -> RecordBuckets {
        let mut buckets = RecordBuckets::default();

        for record in message.answers() {
            let record_type = RecordTypeMapper::from_hickory(record.record_type());
            if !buckets.push(record_type, record.to_string()) {
                trace!(record_type = %record_type, "Dropping answer without a bucket");
            }
        }

        buckets
    }
}
