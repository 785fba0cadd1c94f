//! fips-tls-probe - FIPS and TLS compliance precheck
//!
//! Exit codes: 0 when every verdict passed, 1 when at least one verdict
//! failed, 2 on configuration or infrastructure errors.

use anyhow::Context;
use clap::Parser;
use console::style;
use fips_tls_probe::checks::target;
use fips_tls_probe::cli::{Cli, Commands};
use fips_tls_probe::config::load_settings;
use fips_tls_probe::output::{self, report};
use fips_tls_probe::runner;
use fips_tls_probe::utils::progress::ProbeSpinner;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Already installed is fine; the prober passes its provider explicitly
    let _ = rustls::crypto::ring::default_provider().install_default();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Run the selected probes and report whether every verdict passed
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    cli.command.apply(&mut settings);

    // Resolve before any probe runs so a bad target never reaches the network
    let endpoint = if cli.command.runs_tls() {
        Some(target::resolve(settings.target_url())?)
    } else {
        None
    };

    let show_spinner = !cli.json;

    let fips_report = if cli.command.runs_fips() {
        let spinner = ProbeSpinner::start("Running FIPS self-test...", show_spinner);
        let report = runner::run_fips_probe_with_settings(&settings).await;
        spinner.finish();
        debug!(passed = report.passed(), "FIPS probe finished");
        if !cli.json {
            report::print_fips_report(&report);
        }
        Some(report)
    } else {
        None
    };

    let tls_report = match endpoint {
        Some(endpoint) => {
            let spinner =
                ProbeSpinner::start(&format!("Handshaking with {}...", endpoint), show_spinner);
            let result = runner::probe_endpoint(endpoint, &settings.tls).await;
            spinner.finish();
            let report = result?;
            debug!(passed = report.passed(), "TLS probe finished");
            if !cli.json {
                report::print_tls_report(&report);
            }
            Some(report)
        }
        None => None,
    };

    let passed = fips_report.as_ref().map_or(true, |r| r.passed())
        && tls_report.as_ref().map_or(true, |r| r.passed());

    if cli.json {
        output::print_json(fips_report.as_ref(), tls_report.as_ref())?;
    } else if matches!(cli.command, Commands::All(_)) {
        println!("{}", report::summary_line(passed));
    }

    Ok(passed)
}
