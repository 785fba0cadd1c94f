//! Check modules for the probe
//!
//! Each module implements one step of either the FIPS probe or the TLS probe.

pub mod fips;
pub mod policy;
pub mod selftest;
pub mod target;
pub mod tls;

pub use fips::{FipsIndicator, ProcFsIndicator, StaticIndicator};
pub use selftest::{CommandSelfTest, SelfTestRunner};
pub use tls::{HandshakeInfo, TlsProber};
