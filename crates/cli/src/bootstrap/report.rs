use retryable_dns_domain::{DomainError, Resolution};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::warn;

/// A rendered report line and whether its lookup succeeded.
#[derive(Debug)]
pub struct OutputLine {
    pub json: String,
    pub ok: bool,
}

impl OutputLine {
    fn failure(host: &str, error: impl std::fmt::Display) -> Self {
        Self {
            json: serde_json::json!({ "host": host, "error": error.to_string() }).to_string(),
            ok: false,
        }
    }
}

/// Awaits every lookup in order. A task that panicked or a report that
/// failed to serialize becomes a failed line for its host.
pub async fn collect_lines(
    lookups: Vec<(String, JoinHandle<serde_json::Result<(String, bool)>>)>,
) -> Vec<OutputLine> {
    let mut lines = Vec::with_capacity(lookups.len());
    for (host, handle) in lookups {
        let line = match handle.await {
            Ok(Ok((json, ok))) => OutputLine { json, ok },
            Ok(Err(e)) => {
                warn!(host = %host, error = %e, "Report serialization failed");
                OutputLine::failure(&host, e)
            }
            Err(e) => {
                warn!(host = %host, error = %e, "Lookup task failed");
                OutputLine::failure(&host, e)
            }
        };
        lines.push(line);
    }
    lines
}

/// One line of output: the host, whatever data was gathered, and the error
/// text if the lookup failed.
#[derive(Debug, Serialize)]
pub struct HostReport<T: Serialize> {
    pub host: String,
    #[serde(flatten)]
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> HostReport<T> {
    pub fn from_result(host: String, result: Result<T, DomainError>) -> Self {
        match result {
            Ok(data) => Self {
                host,
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                host,
                data: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn from_resolution(host: String, resolution: Resolution<T>) -> Self {
        Self {
            host,
            data: Some(resolution.data),
            error: resolution.error.map(|e| e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retryable_dns_domain::{DnsData, RawResult, SimpleResult};

    #[test]
    fn test_simple_success_flattens_fields() {
        let report = HostReport::from_result(
            "example.com".to_string(),
            Ok(SimpleResult {
                addresses: vec!["93.184.216.34".to_string()],
                ttl: 300,
            }),
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["host"], "example.com");
        assert_eq!(json["addresses"][0], "93.184.216.34");
        assert_eq!(json["ttl"], 300);
        assert!(json["error"].is_null());
        assert!(report.is_ok());
    }

    #[test]
    fn test_simple_failure_has_only_error() {
        let report: HostReport<SimpleResult> = HostReport::from_result(
            "missing.example".to_string(),
            Err(DomainError::ServerStatus {
                status: "NXDOMAIN".to_string(),
            }),
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["error"], "NXDOMAIN");
        assert!(json.get("addresses").is_none());
        assert!(!report.is_ok());
    }

    #[test]
    fn test_partial_resolution_keeps_data() {
        let resolution = Resolution::failed(
            RawResult {
                values: Vec::new(),
                raw: ";; status: SERVFAIL".to_string(),
            },
            DomainError::ServerStatus {
                status: "SERVFAIL".to_string(),
            },
        );

        let report = HostReport::from_resolution("example.com".to_string(), resolution);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["raw"], ";; status: SERVFAIL");
        assert_eq!(json["error"], "SERVFAIL");
    }

    #[tokio::test]
    async fn test_failed_task_does_not_hide_other_hosts() {
        let lookups = vec![
            (
                "a.example".to_string(),
                tokio::spawn(async { Ok(("{\"host\":\"a.example\"}".to_string(), true)) }),
            ),
            (
                "b.example".to_string(),
                tokio::spawn(async {
                    if true {
                        panic!("lookup task crashed");
                    }
                    Ok((String::new(), true))
                }),
            ),
            (
                "c.example".to_string(),
                tokio::spawn(async { Ok(("{\"host\":\"c.example\"}".to_string(), false)) }),
            ),
        ];

        let lines = collect_lines(lookups).await;

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ok);
        assert!(!lines[1].ok);
        let failed: serde_json::Value = serde_json::from_str(&lines[1].json).unwrap();
        assert_eq!(failed["host"], "b.example");
        assert!(failed["error"].is_string());
        assert_eq!(lines[2].json, "{\"host\":\"c.example\"}");
        assert!(!lines[2].ok);
    }

    #[test]
    fn test_enriched_success() {
        let mut data = DnsData::new("example.com");
        data.records.a.push("example.com. 300 IN A 192.0.2.1".to_string());
        let report = HostReport::from_resolution("example.com".to_string(), Resolution::ok(data));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["a"].as_array().unwrap().len(), 1);
        assert!(report.is_ok());
    }
}
