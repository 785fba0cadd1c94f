//! Utility modules for the probe
//!
//! This module contains error types and terminal progress helpers.

pub mod error;
pub mod progress;

pub use error::{ConfigError, ProbeError, Result};
