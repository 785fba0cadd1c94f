//! Auditor-facing report sections
//!
//! Each probe is printed as a bracketed block so that CI logs show the
//! verdict together with everything that was observed. Nothing here feeds
//! back into a verdict.

use crate::models::{
    CheckStatus, DetailSection, FipsMode, PolicyViolation, RuntimeFlag, TestResult, TestStep,
};
use crate::output::results::format_test_result;
use crate::runner::{FipsReport, TlsOutcome, TlsReport};
use console::style;

/// Build the FIPS section content
pub fn fips_result(report: &FipsReport) -> TestResult {
    let status = &report.status;
    let (check_status, summary) = match &report.failure {
        None => (CheckStatus::Pass, "PASS".to_string()),
        Some(e) => (CheckStatus::Fail, format!("FAILED: {}", e)),
    };

    let mut result = TestResult::new("FIPS status", check_status, summary)
        .with_detail(DetailSection::key_value(
            Some("Runtime".to_string()),
            vec![
                ("Probe version".to_string(), env!("CARGO_PKG_VERSION").to_string()),
                (
                    "Platform".to_string(),
                    format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
                ),
                ("TLS stack".to_string(), "rustls (ring)".to_string()),
                ("FIPS indicator".to_string(), report.indicator_source.clone()),
                ("FIPS mode flag".to_string(), status.runtime_flag.to_string()),
                ("Enforcement".to_string(), report.mode.to_string()),
            ],
        ))
        .with_detail(DetailSection::key_value(
            Some("Self-test".to_string()),
            vec![
                ("Command".to_string(), status.self_test.command.clone()),
                (
                    "Exit code".to_string(),
                    status
                        .self_test
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "none".to_string()),
                ),
                (
                    "Result".to_string(),
                    if status.self_test.succeeded {
                        "SUCCESS".to_string()
                    } else {
                        "FAILED".to_string()
                    },
                ),
            ],
        ));

    if !status.self_test.output.is_empty() {
        result = result.with_detail(DetailSection::text(
            Some("stdout".to_string()),
            status.self_test.output.clone(),
        ));
    }
    if !status.self_test.stderr.is_empty() {
        result = result.with_detail(DetailSection::text(
            Some("stderr".to_string()),
            status.self_test.stderr.clone(),
        ));
    }

    result = result.with_step(flag_step(status.runtime_flag, report.mode));
    result = match &status.self_test.error {
        None if status.self_test.succeeded => result.with_step(TestStep::pass("FIPS self-test")),
        error => result.with_step(TestStep::fail(
            "FIPS self-test",
            error.clone().unwrap_or_else(|| "failed".to_string()),
        )),
    };

    if report.mode == FipsMode::Enforced && status.runtime_flag == RuntimeFlag::Disabled {
        result = result.with_recommendation(
            "Boot the host with fips=1 or enable the system FIPS crypto policy before the suite runs",
        );
    }
    if !status.self_test.succeeded {
        result = result.with_recommendation(format!(
            "Check that {} is installed, on PATH and able to load the FIPS provider",
            status.self_test.command
        ));
    }

    result
}

fn flag_step(flag: RuntimeFlag, mode: FipsMode) -> TestStep {
    let description = format!("FIPS mode flag: {}", flag);
    match (flag, mode) {
        (RuntimeFlag::Enabled, _) => TestStep::pass(description),
        (RuntimeFlag::Disabled, FipsMode::Enforced) => TestStep::fail(description, "expected 1"),
        (RuntimeFlag::Disabled, FipsMode::Informational) => {
            TestStep::warning(description, "informational only")
        }
        (RuntimeFlag::Unavailable, _) => {
            TestStep::warning(description, "no indicator on this host, not enforced")
        }
    }
}

/// Build the TLS section content
pub fn tls_result(report: &TlsReport) -> TestResult {
    let target = report.endpoint.to_string();

    match &report.outcome {
        TlsOutcome::ConnectionFailed(e) => {
            let message = e.to_string();
            let result = TestResult::new(
                "TLS policy check",
                CheckStatus::Fail,
                "FAILED: handshake did not complete",
            )
            .with_detail(DetailSection::key_value(
                None,
                vec![("Target".to_string(), target)],
            ))
            .with_step(TestStep::fail("TLS handshake", "no policy evaluation performed"));

            let result = if is_protocol_version_alert(&message) {
                result.with_recommendation(
                    "The peer rejected TLSv1.2 and TLSv1.3; enable one of them on the target",
                )
            } else {
                result
            };

            result.with_detail(DetailSection::text(
                Some("Connection error".to_string()),
                message,
            ))
        }
        TlsOutcome::Negotiated { handshake, policy } => {
            let session = &handshake.session;
            let (status, summary) = match &policy.reason {
                None => (CheckStatus::Pass, "PASS".to_string()),
                Some(reason) => (CheckStatus::Fail, format!("FAILED: {}", reason)),
            };

            let mut result = TestResult::new("TLS policy check", status, summary).with_detail(
                DetailSection::key_value(
                    None,
                    vec![
                        ("Target".to_string(), target),
                        (
                            "Negotiated protocol".to_string(),
                            session.protocol_version.clone(),
                        ),
                        (
                            "Negotiated cipher".to_string(),
                            session.cipher_display().to_string(),
                        ),
                        (
                            "Certificate validation".to_string(),
                            if handshake.trust_verified {
                                "verified".to_string()
                            } else {
                                "skipped (test-only)".to_string()
                            },
                        ),
                        (
                            "Peer certificates".to_string(),
                            handshake.peer_certificates.to_string(),
                        ),
                        (
                            "Handshake time".to_string(),
                            format!("{:.1} ms", handshake.handshake_ms),
                        ),
                        (
                            "Client FIPS provider".to_string(),
                            handshake.client_fips.to_string(),
                        ),
                    ],
                ),
            );

            result = match &policy.reason {
                Some(PolicyViolation::UnsupportedProtocol { found }) => result.with_step(
                    TestStep::fail("Protocol is TLSv1.2 or TLSv1.3", format!("got {}", found)),
                ),
                Some(PolicyViolation::UnsupportedCipher { found }) => result
                    .with_step(TestStep::pass("Protocol is TLSv1.2 or TLSv1.3"))
                    .with_step(TestStep::fail(
                        "Cipher suite is AES-GCM",
                        format!("got {}", found.as_deref().unwrap_or("unknown")),
                    )),
                None => result
                    .with_step(TestStep::pass("Protocol is TLSv1.2 or TLSv1.3"))
                    .with_step(TestStep::pass("Cipher suite is AES-GCM")),
            };

            result
        }
    }
}

/// Whether a handshake error is the peer refusing every offered version
fn is_protocol_version_alert(message: &str) -> bool {
    message.contains("ProtocolVersion") || message.contains("protocol_version")
}

/// Render the FIPS report as a bracketed section
pub fn render_fips(report: &FipsReport) -> String {
    section(
        "FIPS STATUS (runtime flag + self-test)",
        "FIPS STATUS",
        &fips_result(report),
    )
}

/// Render the TLS report as a bracketed section
pub fn render_tls(report: &TlsReport) -> String {
    section(
        &format!("TLS CHECK (probe -> {})", report.endpoint),
        "TLS CHECK",
        &tls_result(report),
    )
}

fn section(title: &str, end: &str, result: &TestResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style(format!("===== {} =====", title)).cyan().bold()
    ));
    out.push_str(&format_test_result(result));
    out.push_str(&format!(
        "{}\n",
        style(format!("===== END {} =====", end)).cyan().bold()
    ));
    out
}

/// Strip styling so the text can be handed to a harness
pub fn plain(rendered: &str) -> String {
    console::strip_ansi_codes(rendered).into_owned()
}

pub fn print_fips_report(report: &FipsReport) {
    print!("{}", render_fips(report));
}

pub fn print_tls_report(report: &TlsReport) {
    print!("{}", render_tls(report));
}

/// Final line printed when both probes ran
pub fn summary_line(passed: bool) -> String {
    if passed {
        style("===== COMPLIANCE PRECHECK COMPLETED SUCCESSFULLY ✓ =====")
            .green()
            .bold()
            .to_string()
    } else {
        style("===== COMPLIANCE PRECHECK FAILED ✗ =====")
            .red()
            .bold()
            .to_string()
    }
}
