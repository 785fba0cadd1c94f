//! Probe orchestration
//!
//! Wires the checks into the two independent probes and turns their results
//! into [`Verdict`]s. Policy violations, handshake failures and failed
//! self-tests come back as failed verdicts; only configuration problems are
//! returned as errors.

use crate::checks::{
    policy, target, CommandSelfTest, FipsIndicator, HandshakeInfo, ProcFsIndicator,
    SelfTestRunner, TlsProber,
};
use crate::config::{Settings, TlsSettings};
use crate::models::{Endpoint, FipsMode, FipsStatus, PolicyResult, RuntimeFlag, Verdict};
use crate::output::report;
use crate::utils::{ProbeError, Result};
use tracing::debug;

/// Result of the FIPS probe
#[derive(Debug)]
pub struct FipsReport {
    pub mode: FipsMode,
    /// Where the runtime flag was read from
    pub indicator_source: String,
    pub status: FipsStatus,
    /// First failure, if any: `FipsDisabled` or `SelfTestExecution`
    pub failure: Option<ProbeError>,
}

impl FipsReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            ok: self.passed(),
            detail: report::plain(&report::render_fips(self)),
        }
    }
}

/// What happened on the wire during the TLS probe
#[derive(Debug)]
pub enum TlsOutcome {
    /// The handshake completed and the policy was evaluated
    Negotiated {
        handshake: HandshakeInfo,
        policy: PolicyResult,
    },
    /// The handshake never completed; no policy evaluation took place
    ConnectionFailed(ProbeError),
}

/// Result of the TLS probe
#[derive(Debug)]
pub struct TlsReport {
    pub endpoint: Endpoint,
    pub outcome: TlsOutcome,
}

impl TlsReport {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, TlsOutcome::Negotiated { policy, .. } if policy.passed)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            ok: self.passed(),
            detail: report::plain(&report::render_tls(self)),
        }
    }
}

/// Run the FIPS probe with injected collaborators.
///
/// Both the runtime flag and the self-test are always collected before the
/// verdict is decided. In enforced mode a flag reading 0 fails the probe
/// ahead of the self-test result; a host without an indicator is reported
/// but not failed.
pub async fn run_fips_probe<I, R>(mode: FipsMode, indicator: &I, runner: &R) -> FipsReport
where
    I: FipsIndicator + ?Sized,
    R: SelfTestRunner + ?Sized,
{
    let runtime_flag = indicator.read();
    debug!(flag = %runtime_flag, source = %indicator.source(), "read FIPS runtime flag");

    let self_test = runner.run().await;
    debug!(succeeded = self_test.succeeded, "FIPS self-test finished");

    let failure = if mode == FipsMode::Enforced && runtime_flag == RuntimeFlag::Disabled {
        Some(ProbeError::FipsDisabled {
            flag: runtime_flag.to_string(),
        })
    } else if !self_test.succeeded {
        Some(ProbeError::SelfTestExecution {
            program: self_test.command.clone(),
            message: self_test
                .error
                .clone()
                .unwrap_or_else(|| "self-test reported failure".to_string()),
        })
    } else {
        None
    };

    FipsReport {
        mode,
        indicator_source: indicator.source(),
        status: FipsStatus {
            runtime_flag,
            self_test,
        },
        failure,
    }
}

/// Run the FIPS probe with the collaborators described by `settings`
pub async fn run_fips_probe_with_settings(settings: &Settings) -> FipsReport {
    let indicator = ProcFsIndicator::new(settings.fips.indicator_path.clone());
    let runner = CommandSelfTest::from_settings(&settings.fips);
    run_fips_probe(settings.fips.mode, &indicator, &runner).await
}

/// Resolve the configured target and run the TLS probe against it
pub async fn run_tls_probe(settings: &Settings) -> Result<TlsReport> {
    let endpoint = target::resolve(settings.target_url())?;
    probe_endpoint(endpoint, &settings.tls).await
}

/// Run the TLS probe against an already resolved endpoint
pub async fn probe_endpoint(endpoint: Endpoint, tls: &TlsSettings) -> Result<TlsReport> {
    let prober = TlsProber::new(tls.clone());

    let outcome = match prober.probe(&endpoint).await {
        Ok(handshake) => {
            let policy = policy::evaluate(&handshake.session);
            TlsOutcome::Negotiated { handshake, policy }
        }
        Err(e @ ProbeError::Connection { .. }) => TlsOutcome::ConnectionFailed(e),
        Err(e) => return Err(e),
    };

    Ok(TlsReport { endpoint, outcome })
}
