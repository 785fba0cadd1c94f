//! Error types for the compliance probe
//!
//! Infrastructure and configuration failures are errors. Policy violations on
//! an otherwise successful handshake are not: they are carried as values in
//! [`crate::models::PolicyResult`].

use thiserror::Error;

/// Top-level error type for probe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("TLS check requires an https:// target, got {scheme}:// in {url}")]
    InvalidScheme { url: String, scheme: String },

    #[error("Invalid target URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Connection to {target} failed: {message}")]
    Connection { target: String, message: String },

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    #[error("FIPS self-test {program} failed: {message}")]
    SelfTestExecution { program: String, message: String },

    #[error("FIPS mode is NOT enabled (runtime flag: {flag}, expected 1)")]
    FipsDisabled { flag: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rustls::Error> for ProbeError {
    fn from(err: rustls::Error) -> Self {
        ProbeError::TlsConfig(err.to_string())
    }
}

impl ProbeError {
    /// Whether this error is a configuration problem raised before any
    /// network or process activity.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProbeError::InvalidScheme { .. }
                | ProbeError::InvalidUrl { .. }
                | ProbeError::TlsConfig(_)
                | ProbeError::Config(_)
        )
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ProbeError
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_flagged() {
        let err = ProbeError::InvalidScheme {
            url: "http://example.com".to_string(),
            scheme: "http".to_string(),
        };
        assert!(err.is_configuration());

        let err = ProbeError::Connection {
            target: "https://tls-proxy:8443".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_fips_disabled_message() {
        let err = ProbeError::FipsDisabled {
            flag: "0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "FIPS mode is NOT enabled (runtime flag: 0, expected 1)"
        );
    }
}
