//! FIPS runtime indicator and self-test result types

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Host FIPS-mode indicator as reported by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeFlag {
    /// Indicator reads 1
    Enabled,
    /// Indicator reads 0
    Disabled,
    /// The runtime exposes no usable indicator
    Unavailable,
}

impl fmt::Display for RuntimeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeFlag::Enabled => write!(f, "1"),
            RuntimeFlag::Disabled => write!(f, "0"),
            RuntimeFlag::Unavailable => write!(f, "unavailable"),
        }
    }
}

// 1 / 0 / "unavailable", matching what harnesses already assert on.
impl Serialize for RuntimeFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuntimeFlag::Enabled => serializer.serialize_u8(1),
            RuntimeFlag::Disabled => serializer.serialize_u8(0),
            RuntimeFlag::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// How the runtime flag affects the FIPS verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FipsMode {
    /// The flag is reported but never fails the verdict
    #[default]
    Informational,
    /// Anything other than an enabled flag fails the verdict
    Enforced,
}

impl fmt::Display for FipsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FipsMode::Informational => write!(f, "informational"),
            FipsMode::Enforced => write!(f, "enforced"),
        }
    }
}

impl std::str::FromStr for FipsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "informational" => Ok(FipsMode::Informational),
            "enforced" => Ok(FipsMode::Enforced),
            other => Err(format!(
                "unknown FIPS mode '{}' (expected informational or enforced)",
                other
            )),
        }
    }
}

/// Raw outcome of one external self-test invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestOutcome {
    /// Command line that was run
    pub command: String,
    pub succeeded: bool,
    /// Exit code, when the process ran to completion
    pub exit_code: Option<i32>,
    /// Captured stdout for display; invalid UTF-8 is replaced with U+FFFD
    pub output: String,
    /// Captured stderr for display; invalid UTF-8 is replaced with U+FFFD
    pub stderr: String,
    /// Why the self-test is considered failed
    pub error: Option<String>,
    /// Exact stdout bytes
    #[serde(skip)]
    pub raw_output: Vec<u8>,
    /// Exact stderr bytes
    #[serde(skip)]
    pub raw_stderr: Vec<u8>,
}

/// Combined FIPS status from the runtime indicator and the self-test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FipsStatus {
    pub runtime_flag: RuntimeFlag,
    pub self_test: SelfTestOutcome,
}
