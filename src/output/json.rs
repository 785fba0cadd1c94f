//! JSON output formatter

use crate::checks::HandshakeInfo;
use crate::models::{Endpoint, FipsMode, FipsStatus, PolicyResult, Verdict};
use crate::runner::{FipsReport, TlsOutcome, TlsReport};
use serde::Serialize;

/// JSON-serializable output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// True when every probe that ran passed
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fips: Option<FipsJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsJson>,
}

#[derive(Debug, Serialize)]
pub struct FipsJson {
    pub verdict: Verdict,
    pub mode: FipsMode,
    pub indicator_source: String,
    pub status: FipsStatus,
    pub failure: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TlsJson {
    pub verdict: Verdict,
    pub endpoint: Endpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handshake: Option<HandshakeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_error: Option<String>,
}

impl From<&FipsReport> for FipsJson {
    fn from(report: &FipsReport) -> Self {
        Self {
            verdict: report.verdict(),
            mode: report.mode,
            indicator_source: report.indicator_source.clone(),
            status: report.status.clone(),
            failure: report.failure.as_ref().map(|e| e.to_string()),
        }
    }
}

impl From<&TlsReport> for TlsJson {
    fn from(report: &TlsReport) -> Self {
        let (handshake, policy, connection_error) = match &report.outcome {
            TlsOutcome::Negotiated { handshake, policy } => {
                (Some(handshake.clone()), Some(policy.clone()), None)
            }
            TlsOutcome::ConnectionFailed(e) => (None, None, Some(e.to_string())),
        };
        Self {
            verdict: report.verdict(),
            endpoint: report.endpoint.clone(),
            handshake,
            policy,
            connection_error,
        }
    }
}

/// Build the JSON document for whichever probes ran
pub fn to_json_output(fips: Option<&FipsReport>, tls: Option<&TlsReport>) -> JsonOutput {
    let passed = fips.map_or(true, FipsReport::passed) && tls.map_or(true, TlsReport::passed);
    JsonOutput {
        passed,
        fips: fips.map(FipsJson::from),
        tls: tls.map(TlsJson::from),
    }
}

/// Print the probe results as JSON to stdout
pub fn print_json(fips: Option<&FipsReport>, tls: Option<&TlsReport>) -> crate::utils::Result<()> {
    let output = to_json_output(fips, tls);
    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NegotiatedSession, PolicyViolation};
    use crate::utils::ProbeError;

    #[test]
    fn test_connection_failure_json() {
        let report = TlsReport {
            endpoint: Endpoint::https("tls-proxy", 8443),
            outcome: TlsOutcome::ConnectionFailed(ProbeError::Connection {
                target: "https://tls-proxy:8443".to_string(),
                message: "connection refused".to_string(),
            }),
        };
        let value = serde_json::to_value(to_json_output(None, Some(&report))).unwrap();
        assert_eq!(value["passed"], false);
        assert!(value.get("fips").is_none());
        assert_eq!(value["tls"]["verdict"]["ok"], false);
        assert!(value["tls"]["connection_error"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
        assert!(value["tls"].get("handshake").is_none());
    }

    #[test]
    fn test_negotiated_json_carries_session() {
        let report = TlsReport {
            endpoint: Endpoint::https("localhost", 4433),
            outcome: TlsOutcome::Negotiated {
                handshake: HandshakeInfo {
                    session: NegotiatedSession::new(
                        "TLSv1.2",
                        Some("TLS_RSA_WITH_AES_128_CBC_SHA".to_string()),
                    ),
                    trust_verified: true,
                    client_fips: false,
                    peer_certificates: 2,
                    handshake_ms: 12.0,
                },
                policy: PolicyResult::fail(PolicyViolation::UnsupportedCipher {
                    found: Some("TLS_RSA_WITH_AES_128_CBC_SHA".to_string()),
                }),
            },
        };
        let value = serde_json::to_value(to_json_output(None, Some(&report))).unwrap();
        assert_eq!(value["passed"], false);
        assert_eq!(value["tls"]["handshake"]["session"]["protocol_version"], "TLSv1.2");
        assert_eq!(value["tls"]["endpoint"]["port"], 4433);
    }
}
