//! Target resolver
//!
//! Turns a configured URL into an [`Endpoint`]. Only `https` targets are
//! accepted; the port defaults to 443.

use crate::models::{Endpoint, DEFAULT_HTTPS_PORT};
use crate::utils::{ProbeError, Result};
use url::{Host, Url};

/// Resolve a target URL string into an endpoint
pub fn resolve(target: &str) -> Result<Endpoint> {
    let trimmed = target.trim();
    let url = Url::parse(trimmed).map_err(|e| ProbeError::InvalidUrl {
        url: trimmed.to_string(),
        message: e.to_string(),
    })?;

    if url.scheme() != "https" {
        return Err(ProbeError::InvalidScheme {
            url: trimmed.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => {
            return Err(ProbeError::InvalidUrl {
                url: trimmed.to_string(),
                message: "missing host".to_string(),
            })
        }
    };

    // url reports None for the scheme's default port as well as for no port
    let port = url.port().unwrap_or(DEFAULT_HTTPS_PORT);
    if port == 0 {
        return Err(ProbeError::InvalidUrl {
            url: trimmed.to_string(),
            message: "port must be between 1 and 65535".to_string(),
        });
    }

    Ok(Endpoint::https(host, port))
}
