//! Configuration module for the probe
//!
//! Handles loading settings from TOML files and the environment.

pub mod settings;

pub use settings::{FipsSettings, Settings, TargetSettings, TlsSettings};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from `path` (or the default location) and apply
/// environment overrides
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load_default()?,
    };
    settings.apply_env()?;
    Ok(settings)
}
