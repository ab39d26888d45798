pub mod aggregator;
pub mod extractor;

pub use aggregator::EnrichmentAggregator;
pub use extractor::RecordExtractor;
