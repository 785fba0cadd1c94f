//! Output formatting module
//!
//! Provides the two output formats of the probe:
//! - Bracketed console sections for CI logs
//! - JSON export for harnesses that parse results

pub mod json;
pub mod report;
pub mod results;

pub use json::{print_json, to_json_output, JsonOutput};
pub use report::{plain, print_fips_report, print_tls_report, render_fips, render_tls};
