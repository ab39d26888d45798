use crate::dns_record::RecordType;
use crate::errors::DomainError;
use serde::Serialize;

/// Addresses from the A records of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleResult {
    pub addresses: Vec<String>,
    /// TTL of the last A record seen in the answer section.
    pub ttl: u32,
}

/// Records of exactly the requested type plus the text dump of the last
/// response received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawResult {
    pub values: Vec<String>,
    pub raw: String,
}

/// Answer records of one response grouped by record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordBuckets {
    pub a: Vec<String>,
    pub aaaa: Vec<String>,
    pub cname: Vec<String>,
    pub mx: Vec<String>,
    pub ptr: Vec<String>,
    pub soa: Vec<String>,
    pub ns: Vec<String>,
    pub txt: Vec<String>,
}

impl RecordBuckets {
    fn bucket_mut(&mut self, record_type: RecordType) -> Option<&mut Vec<String>> {
        match record_type {
            RecordType::A => Some(&mut self.a),
            RecordType::AAAA => Some(&mut self.aaaa),
            RecordType::CNAME => Some(&mut self.cname),
            RecordType::MX => Some(&mut self.mx),
            RecordType::PTR => Some(&mut self.ptr),
            RecordType::SOA => Some(&mut self.soa),
            RecordType::NS => Some(&mut self.ns),
            RecordType::TXT => Some(&mut self.txt),
            RecordType::Unknown(_) => None,
        }
    }

    /// Appends a record to its bucket. Returns `false` (and drops the
    /// record) for types without a bucket.
    pub fn push(&mut self, record_type: RecordType, record: String) -> bool {
        match self.bucket_mut(record_type) {
            Some(bucket) => {
                bucket.push(record);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, record_type: RecordType) -> &[String] {
        match record_type {
            RecordType::A => &self.a,
            RecordType::AAAA => &self.aaaa,
            RecordType::CNAME => &self.cname,
            RecordType::MX => &self.mx,
            RecordType::PTR => &self.ptr,
            RecordType::SOA => &self.soa,
            RecordType::NS => &self.ns,
            RecordType::TXT => &self.txt,
            RecordType::Unknown(_) => &[],
        }
    }

    pub fn len(&self) -> usize {
        RecordType::known().iter().map(|rt| self.get(*rt).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Enriched view of a single response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsData {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub resolver: String,
    #[serde(flatten)]
    pub records: RecordBuckets,
    pub raw: String,
    pub status_code: String,
}

impl DnsData {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }
}

/// Best-effort data together with the error that stopped the resolution.
///
/// Used by the resolution modes that keep diagnostic data even when they
/// fail, so the caller can inspect both.
#[derive(Debug, Clone)]
pub struct Resolution<T> {
    pub data: T,
    pub error: Option<DomainError>,
}

impl<T> Resolution<T> {
    pub fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    pub fn failed(data: T, error: DomainError) -> Self {
        Self {
            data,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<T, DomainError> {
        match self.error {
            None => Ok(self.data),
            Some(e) => Err(e),
        }
    }
}
