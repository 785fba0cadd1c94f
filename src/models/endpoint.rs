//! Resolved probe target

use serde::Serialize;
use std::fmt;

/// Port used when the target URL does not name one
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// A resolved TLS endpoint.
///
/// Only ever constructed by the target resolver, which guarantees the scheme
/// is `https`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Host name or IP literal (IPv6 without brackets)
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Always "https"
    pub scheme: String,
}

impl Endpoint {
    pub(crate) fn https(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: "https".to_string(),
        }
    }

    /// Host formatted for use in an authority, bracketing IPv6 literals
    pub fn authority_host(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.authority_host(), self.port)
    }
}
