//! Data models for the probe
//!
//! This module contains all the data structures passed between the checks,
//! the runner and the report emitter. Nothing here is persisted.

pub mod endpoint;
pub mod fips_status;
pub mod session;
pub mod test_result;
pub mod verdict;

pub use endpoint::{Endpoint, DEFAULT_HTTPS_PORT};
pub use fips_status::{FipsMode, FipsStatus, RuntimeFlag, SelfTestOutcome};
pub use session::{NegotiatedSession, PolicyResult, PolicyViolation, UNKNOWN_PROTOCOL};
pub use test_result::{CheckStatus, DetailSection, TestResult, TestStep};
pub use verdict::Verdict;
