//! Boundary result handed back to the calling harness

use serde::Serialize;

/// Pass/fail verdict with the full human-readable report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub ok: bool,
    pub detail: String,
}
