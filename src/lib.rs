//! fips-tls-probe library
//!
//! Compliance precheck run before an end-to-end test suite:
//! - FIPS status: host FIPS-mode flag plus an external cryptographic self-test
//! - TLS policy: one real handshake against the target, then an allowlist
//!   check on the negotiated protocol version and cipher suite
//!
//! Both probes produce a [`models::Verdict`] with a human-readable detail.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fips_tls_probe::{config::Settings, runner};
//!
//! #[tokio::main]
//! async fn main() -> fips_tls_probe::Result<()> {
//!     let settings = Settings::load_default()?;
//!     let report = runner::run_tls_probe(&settings).await?;
//!     println!("{}", report.verdict().detail);
//!     Ok(())
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::{CheckStatus, FipsMode, TestResult, Verdict};
pub use runner::{FipsReport, TlsOutcome, TlsReport};
pub use utils::{ConfigError, ProbeError, Result};
