//! FIPS status inspector
//!
//! Reads the host FIPS-mode indicator without judging it. Whether a disabled
//! or missing indicator fails the probe is decided by the runner from the
//! configured [`crate::models::FipsMode`].

use crate::models::RuntimeFlag;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of the host FIPS-mode indicator
pub trait FipsIndicator: Send + Sync {
    /// Short description of where the flag comes from
    fn source(&self) -> String;

    fn read(&self) -> RuntimeFlag;
}

/// Indicator backed by a procfs-style flag file such as
/// `/proc/sys/crypto/fips_enabled`
#[derive(Debug, Clone)]
pub struct ProcFsIndicator {
    path: PathBuf,
}

impl ProcFsIndicator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FipsIndicator for ProcFsIndicator {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> RuntimeFlag {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_flag(&content).unwrap_or_else(|| {
                warn!(
                    path = %self.path.display(),
                    "unrecognised FIPS indicator content: {:?}",
                    content.trim()
                );
                RuntimeFlag::Unavailable
            }),
            Err(e) => {
                debug!(path = %self.path.display(), "FIPS indicator not readable: {}", e);
                RuntimeFlag::Unavailable
            }
        }
    }
}

/// Indicator with a fixed value
#[derive(Debug, Clone, Copy)]
pub struct StaticIndicator(pub RuntimeFlag);

impl FipsIndicator for StaticIndicator {
    fn source(&self) -> String {
        "static".to_string()
    }

    fn read(&self) -> RuntimeFlag {
        self.0
    }
}

fn parse_flag(content: &str) -> Option<RuntimeFlag> {
    match content.trim() {
        "1" => Some(RuntimeFlag::Enabled),
        "0" => Some(RuntimeFlag::Disabled),
        _ => None,
    }
}
