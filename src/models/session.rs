//! Negotiated TLS session parameters and the policy verdict derived from them

use serde::Serialize;
use std::fmt;

/// Sentinel used when the TLS stack does not report a negotiated version
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Protocol version and cipher suite observed on one completed handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegotiatedSession {
    /// e.g. "TLSv1.2", "TLSv1.3" or "unknown"
    pub protocol_version: String,
    /// Cipher suite name, when the stack reports one
    pub cipher_suite: Option<String>,
}

impl NegotiatedSession {
    pub fn new(protocol_version: impl Into<String>, cipher_suite: Option<String>) -> Self {
        Self {
            protocol_version: protocol_version.into(),
            cipher_suite,
        }
    }

    /// Cipher suite name for display, "unknown" when absent
    pub fn cipher_display(&self) -> &str {
        self.cipher_suite.as_deref().unwrap_or(UNKNOWN_PROTOCOL)
    }
}

/// Why a negotiated session was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "PascalCase")]
pub enum PolicyViolation {
    UnsupportedProtocol { found: String },
    UnsupportedCipher { found: Option<String> },
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::UnsupportedProtocol { found } => {
                write!(f, "TLS policy failure: expected TLSv1.2+ but got {}", found)
            }
            PolicyViolation::UnsupportedCipher { found } => write!(
                f,
                "TLS policy failure: expected AES-GCM cipher but got {}",
                found.as_deref().unwrap_or(UNKNOWN_PROTOCOL)
            ),
        }
    }
}

/// Outcome of evaluating a session against the fixed policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyResult {
    pub passed: bool,
    pub reason: Option<PolicyViolation>,
}

impl PolicyResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    pub fn fail(reason: PolicyViolation) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}
