//! FIPS self-test runner
//!
//! Runs an external, independently certified self-test executable and keeps
//! its output verbatim for the audit transcript. A binary that cannot be
//! started is reported the same way as one that exits non-zero.

use crate::config::FipsSettings;
use crate::models::SelfTestOutcome;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Something that can perform a FIPS self-test
#[async_trait]
pub trait SelfTestRunner: Send + Sync {
    async fn run(&self) -> SelfTestOutcome;
}

/// Self-test performed by spawning an external program
#[derive(Debug, Clone)]
pub struct CommandSelfTest {
    program: String,
    args: Vec<String>,
    ready_marker: Option<String>,
    timeout: Duration,
}

impl CommandSelfTest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            ready_marker: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_settings(settings: &FipsSettings) -> Self {
        Self {
            program: settings.self_test_program.clone(),
            args: settings.self_test_args.clone(),
            ready_marker: settings.ready_marker.clone(),
            timeout: settings.self_test_timeout(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Require stdout to contain `marker` in addition to a zero exit
    pub fn with_ready_marker(mut self, marker: impl Into<String>) -> Self {
        self.ready_marker = Some(marker.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failed(&self, error: String) -> SelfTestOutcome {
        SelfTestOutcome {
            command: self.command_line(),
            succeeded: false,
            exit_code: None,
            output: String::new(),
            stderr: String::new(),
            error: Some(error),
            raw_output: vec![],
            raw_stderr: vec![],
        }
    }
}

#[async_trait]
impl SelfTestRunner for CommandSelfTest {
    async fn run(&self) -> SelfTestOutcome {
        debug!(command = %self.command_line(), "running FIPS self-test");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return self.failed(format!("failed to execute {}: {}", self.program, e)),
            Err(_) => {
                return self.failed(format!(
                    "{} did not finish within {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        let error = if !output.status.success() {
            let detail = stderr.trim();
            Some(if detail.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                format!("{} exited with {}: {}", self.program, output.status, detail)
            })
        } else {
            match &self.ready_marker {
                Some(marker) if !stdout.contains(marker.as_str()) => Some(format!(
                    "{} exited successfully but its output does not contain {:?}",
                    self.program, marker
                )),
                _ => None,
            }
        };

        SelfTestOutcome {
            command: self.command_line(),
            succeeded: error.is_none(),
            exit_code: output.status.code(),
            output: stdout,
            stderr,
            error,
            raw_output: output.stdout,
            raw_stderr: output.stderr,
        }
    }
}
