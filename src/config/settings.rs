//! Probe settings
//!
//! Defines the target, TLS and FIPS settings. Values come from a TOML file,
//! then environment overrides, then CLI flags (applied by the binary).

use crate::models::FipsMode;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Target used when nothing is configured: the in-compose TLS proxy
pub const DEFAULT_TARGET_URL: &str = "https://tls-proxy:8443";

/// Default external FIPS self-test program, resolved on PATH
pub const DEFAULT_SELF_TEST_PROGRAM: &str = "openssl-fips-test";

/// Kernel FIPS indicator on Linux
pub const DEFAULT_FIPS_INDICATOR_PATH: &str = "/proc/sys/crypto/fips_enabled";

/// Environment variables consulted for the target URL, first set wins.
/// The last three are the variables the browser harnesses already export.
pub const TARGET_ENV_VARS: [&str; 4] = [
    "FIPS_PROBE_TARGET",
    "PW_BASE_URL",
    "CYPRESS_baseUrl",
    "LAUNCH_URL",
];

pub const SELF_TEST_ENV_VAR: &str = "FIPS_PROBE_SELF_TEST";
pub const MODE_ENV_VAR: &str = "FIPS_PROBE_MODE";

/// Where the TLS probe connects
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Target URL, `https://host[:port]`
    pub url: Option<String>,
}

/// TLS handshake settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TlsSettings {
    pub connect_timeout_secs: u64,
    pub handshake_timeout_secs: u64,
    /// Skip certificate validation. Only for self-signed test endpoints.
    pub accept_invalid_certs: bool,
}

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            handshake_timeout_secs: 10,
            accept_invalid_certs: false,
        }
    }
}

impl TlsSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

/// FIPS status and self-test settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FipsSettings {
    pub mode: FipsMode,
    pub indicator_path: PathBuf,
    pub self_test_program: String,
    pub self_test_args: Vec<String>,
    /// When set, the self-test stdout must also contain this marker
    pub ready_marker: Option<String>,
    pub self_test_timeout_secs: u64,
}

impl Default for FipsSettings {
    fn default() -> Self {
        Self {
            mode: FipsMode::Informational,
            indicator_path: PathBuf::from(DEFAULT_FIPS_INDICATOR_PATH),
            self_test_program: DEFAULT_SELF_TEST_PROGRAM.to_string(),
            self_test_args: vec![],
            ready_marker: None,
            self_test_timeout_secs: 60,
        }
    }
}

impl FipsSettings {
    pub fn self_test_timeout(&self) -> Duration {
        Duration::from_secs(self.self_test_timeout_secs)
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub target: TargetSettings,
    #[serde(default)]
    pub tls: TlsSettings,
    #[serde(default)]
    pub fips: FipsSettings,
}

impl Settings {
    /// Load settings from the default config file, falling back to defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/probe.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = TARGET_ENV_VARS.iter().find_map(|key| non_empty(key)) {
            self.target.url = Some(url);
        }

        if let Some(program) = non_empty(SELF_TEST_ENV_VAR) {
            self.fips.self_test_program = program;
        }

        if let Some(mode) = non_empty(MODE_ENV_VAR) {
            self.fips.mode = mode.parse().map_err(|message| ConfigError::InvalidValue {
                key: MODE_ENV_VAR.to_string(),
                message,
            })?;
        }

        Ok(())
    }

    /// Configured target URL or the built-in default
    pub fn target_url(&self) -> &str {
        self.target.url.as_deref().unwrap_or(DEFAULT_TARGET_URL)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tls.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tls.connect_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.tls.handshake_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tls.handshake_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.fips.self_test_program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "fips.self_test_program".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.target_url(), DEFAULT_TARGET_URL);
        assert!(!settings.tls.accept_invalid_certs);
        assert_eq!(settings.tls.connect_timeout(), Duration::from_secs(10));
        assert_eq!(settings.fips.mode, FipsMode::Informational);
        assert_eq!(settings.fips.self_test_program, "openssl-fips-test");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [target]
            url = "https://localhost:9443"

            [fips]
            mode = "enforced"
            ready_marker = "FIPS Ready Status: READY"
            "#,
        )
        .unwrap();

        assert_eq!(settings.target_url(), "https://localhost:9443");
        assert_eq!(settings.fips.mode, FipsMode::Enforced);
        assert_eq!(
            settings.fips.ready_marker.as_deref(),
            Some("FIPS Ready Status: READY")
        );
        assert_eq!(settings.tls.handshake_timeout_secs, 10);
        assert_eq!(settings.fips.self_test_timeout_secs, 60);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Settings::from_toml("[tls]\nconnect_timeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_target_precedence() {
        let vars = env(&[
            ("CYPRESS_baseUrl", "https://cypress-target:1"),
            ("PW_BASE_URL", "https://pw-target:2"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env_from(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.target_url(), "https://pw-target:2");
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let vars = env(&[("FIPS_PROBE_TARGET", "  "), ("LAUNCH_URL", "https://nw:3")]);
        let mut settings = Settings::default();
        settings.apply_env_from(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.target_url(), "https://nw:3");
    }

    #[test]
    fn test_env_mode_and_program() {
        let vars = env(&[
            ("FIPS_PROBE_MODE", "enforced"),
            ("FIPS_PROBE_SELF_TEST", "/opt/fips/bin/selftest"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env_from(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.fips.mode, FipsMode::Enforced);
        assert_eq!(settings.fips.self_test_program, "/opt/fips/bin/selftest");
    }

    #[test]
    fn test_env_bad_mode() {
        let vars = env(&[("FIPS_PROBE_MODE", "strict")]);
        let mut settings = Settings::default();
        let err = settings
            .apply_env_from(|k| vars.get(k).cloned())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "FIPS_PROBE_MODE"
        ));
    }
}
