use clap::Parser;
use fips_tls_probe::cli::{Cli, Commands};
use fips_tls_probe::config::Settings;
use fips_tls_probe::models::FipsMode;

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["fips-tls-probe", "all", "--json", "--no-color", "-v"]).unwrap();
    assert!(cli.json);
    assert!(cli.no_color);
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::All(_)));
    assert!(cli.command.runs_fips());
    assert!(cli.command.runs_tls());
}

#[test]
fn test_fips_flags() {
    let cli = Cli::try_parse_from([
        "fips-tls-probe",
        "fips",
        "--mode",
        "enforced",
        "--self-test-bin",
        "/usr/local/bin/fips-selftest",
    ])
    .unwrap();
    assert!(!cli.command.runs_tls());

    let mut settings = Settings::default();
    cli.command.apply(&mut settings);
    assert_eq!(settings.fips.mode, FipsMode::Enforced);
    assert_eq!(settings.fips.self_test_program, "/usr/local/bin/fips-selftest");
}

#[test]
fn test_all_accepts_both_flag_sets() {
    let cli = Cli::try_parse_from([
        "fips-tls-probe",
        "all",
        "--mode",
        "informational",
        "--target",
        "https://tls-proxy:9443",
    ])
    .unwrap();
    let mut settings = Settings::default();
    settings.fips.mode = FipsMode::Enforced;
    cli.command.apply(&mut settings);
    assert_eq!(settings.fips.mode, FipsMode::Informational);
    assert_eq!(settings.target_url(), "https://tls-proxy:9443");
}

#[test]
fn test_flags_do_not_leak_between_subcommands() {
    assert!(Cli::try_parse_from(["fips-tls-probe", "fips", "--target", "https://x"]).is_err());
    assert!(Cli::try_parse_from(["fips-tls-probe", "tls", "--mode", "enforced"]).is_err());
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["fips-tls-probe"]).is_err());
    assert!(Cli::try_parse_from(["fips-tls-probe", "fips", "--mode", "strict"]).is_err());
}

#[test]
fn test_no_flags_keep_settings() {
    let cli = Cli::try_parse_from(["fips-tls-probe", "tls"]).unwrap();
    let mut settings = Settings::default();
    settings.target.url = Some("https://from-config:8443".to_string());
    cli.command.apply(&mut settings);
    assert_eq!(settings.target_url(), "https://from-config:8443");
    assert!(!settings.tls.accept_invalid_certs);
}
