//! CLI argument definitions using clap

use crate::config::Settings;
use crate::models::FipsMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fips-tls-probe")]
#[command(version)]
#[command(
    about = "FIPS and TLS compliance precheck for end-to-end test harnesses",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML settings file (default: ./config/probe.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the FIPS status check and self-test
    Fips(FipsArgs),

    /// Run the TLS handshake policy check
    Tls(TlsArgs),

    /// Run both probes (FIPS first, then TLS)
    All(AllArgs),
}

#[derive(Args, Debug, Default)]
pub struct TlsArgs {
    /// Target URL (https only)
    #[arg(long, value_name = "URL")]
    pub target: Option<String>,

    /// Skip certificate validation (test endpoints only)
    #[arg(long)]
    pub accept_invalid_certs: bool,

    /// Connect and handshake timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

impl TlsArgs {
    /// Apply flag overrides on top of file and environment settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(target) = &self.target {
            settings.target.url = Some(target.clone());
        }
        if self.accept_invalid_certs {
            settings.tls.accept_invalid_certs = true;
        }
        if let Some(secs) = self.timeout {
            settings.tls.connect_timeout_secs = secs;
            settings.tls.handshake_timeout_secs = secs;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct FipsArgs {
    /// Whether a disabled FIPS flag fails the probe
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<FipsMode>,

    /// Self-test program to execute
    #[arg(long, value_name = "PROGRAM")]
    pub self_test_bin: Option<String>,
}

impl FipsArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(mode) = self.mode {
            settings.fips.mode = mode;
        }
        if let Some(program) = &self.self_test_bin {
            settings.fips.self_test_program = program.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct AllArgs {
    #[command(flatten)]
    pub fips: FipsArgs,

    #[command(flatten)]
    pub tls: TlsArgs,
}

impl AllArgs {
    pub fn apply(&self, settings: &mut Settings) {
        self.fips.apply(settings);
        self.tls.apply(settings);
    }
}

impl Commands {
    /// Apply this subcommand's overrides to `settings`
    pub fn apply(&self, settings: &mut Settings) {
        match self {
            Commands::Fips(args) => args.apply(settings),
            Commands::Tls(args) => args.apply(settings),
            Commands::All(args) => args.apply(settings),
        }
    }

    pub fn runs_fips(&self) -> bool {
        matches!(self, Commands::Fips(_) | Commands::All(_))
    }

    pub fn runs_tls(&self) -> bool {
        matches!(self, Commands::Tls(_) | Commands::All(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tls_overrides() {
        let cli = Cli::try_parse_from([
            "fips-tls-probe",
            "tls",
            "--target",
            "https://localhost:4433",
            "--accept-invalid-certs",
            "--timeout",
            "3",
        ])
        .unwrap();
        let mut settings = Settings::default();
        cli.command.apply(&mut settings);
        assert_eq!(settings.target_url(), "https://localhost:4433");
        assert!(settings.tls.accept_invalid_certs);
        assert_eq!(settings.tls.connect_timeout_secs, 3);
        assert_eq!(settings.tls.handshake_timeout_secs, 3);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Cli::try_parse_from(["fips-tls-probe", "tls", "--timeout", "0"]);
        assert!(err.is_err());
    }
}
