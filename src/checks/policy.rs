//! Negotiation policy
//!
//! The allowlist is fixed and deliberately not configurable.

use crate::models::{NegotiatedSession, PolicyResult, PolicyViolation};

/// Protocol versions a session may negotiate
pub const ALLOWED_PROTOCOLS: [&str; 2] = ["TLSv1.2", "TLSv1.3"];

/// Case-sensitive token a cipher suite name must contain (AES-GCM AEAD)
pub const AEAD_MARKER: &str = "GCM";

/// Evaluate a negotiated session against the policy.
///
/// The protocol is checked before the cipher and evaluation stops at the
/// first failure.
pub fn evaluate(session: &NegotiatedSession) -> PolicyResult {
    if !ALLOWED_PROTOCOLS.contains(&session.protocol_version.as_str()) {
        return PolicyResult::fail(PolicyViolation::UnsupportedProtocol {
            found: session.protocol_version.clone(),
        });
    }

    match session.cipher_suite.as_deref() {
        Some(name) if name.contains(AEAD_MARKER) => PolicyResult::pass(),
        _ => PolicyResult::fail(PolicyViolation::UnsupportedCipher {
            found: session.cipher_suite.clone(),
        }),
    }
}
