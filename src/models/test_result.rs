//! Report building blocks shared by both probes

use serde::Serialize;

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    /// Get the icon for this status
    pub fn icon(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Warning => "⚠",
            CheckStatus::Fail => "✗",
        }
    }
}

/// A single step within a probe
#[derive(Debug, Clone, Serialize)]
pub struct TestStep {
    pub description: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

impl TestStep {
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: CheckStatus::Pass,
            details: None,
        }
    }

    pub fn warning(description: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: CheckStatus::Warning,
            details: Some(details.into()),
        }
    }

    pub fn fail(description: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: CheckStatus::Fail,
            details: Some(details.into()),
        }
    }
}

/// A section of detailed information
#[derive(Debug, Clone, Serialize)]
pub enum DetailSection {
    /// Key-value pairs
    KeyValue {
        title: Option<String>,
        pairs: Vec<(String, String)>,
    },
    /// Free-form text, printed verbatim line by line
    Text {
        title: Option<String>,
        content: String,
    },
}

impl DetailSection {
    pub fn key_value(title: Option<String>, pairs: Vec<(String, String)>) -> Self {
        Self::KeyValue { title, pairs }
    }

    pub fn text(title: Option<String>, content: String) -> Self {
        Self::Text { title, content }
    }
}

/// Complete result of one probe, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub title: String,
    pub status: CheckStatus,
    /// One-line summary
    pub summary: String,
    pub details: Vec<DetailSection>,
    pub test_steps: Vec<TestStep>,
    pub recommendations: Vec<String>,
}

impl TestResult {
    pub fn new(title: impl Into<String>, status: CheckStatus, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status,
            summary: summary.into(),
            details: vec![],
            test_steps: vec![],
            recommendations: vec![],
        }
    }

    pub fn with_detail(mut self, section: DetailSection) -> Self {
        self.details.push(section);
        self
    }

    pub fn with_step(mut self, step: TestStep) -> Self {
        self.test_steps.push(step);
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.status != CheckStatus::Fail
    }
}
