//! Per-scenario verification outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tree::NodeId;

/// One node whose observed checked state disagreed with the oracle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMismatch {
    pub id: NodeId,
    pub expected: bool,
    pub actual: bool,
}

impl fmt::Display for NodeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.id,
            checked_word(self.expected),
            checked_word(self.actual),
        )
    }
}

fn checked_word(checked: bool) -> &'static str {
    if checked {
        "checked"
    } else {
        "unchecked"
    }
}

/// Status message disagreement, exact after whitespace trim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMismatch {
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for MessageMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message: expected '{}', got '{}'",
            self.expected, self.actual
        )
    }
}

/// Outcome of one scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Which scenario produced this result.
    pub scenario: String,
    /// Whether observed state and message both matched the oracle.
    pub passed: bool,
    /// Every node whose checked state disagreed, in traversal order.
    pub node_mismatches: Vec<NodeMismatch>,
    /// Status message disagreement, if any.
    pub message_mismatch: Option<MessageMismatch>,
    /// Driver or reset failure that prevented verification, if any.
    pub error: Option<String>,
    /// When the verification was performed.
    pub checked_at: DateTime<Utc>,
}

impl VerificationResult {
    /// A clean pass.
    pub fn pass(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            passed: true,
            node_mismatches: Vec::new(),
            message_mismatch: None,
            error: None,
            checked_at: Utc::now(),
        }
    }

    /// A structural failure with collected mismatches.
    pub fn fail(
        scenario: &str,
        node_mismatches: Vec<NodeMismatch>,
        message_mismatch: Option<MessageMismatch>,
    ) -> Self {
        Self {
            scenario: scenario.to_string(),
            passed: false,
            node_mismatches,
            message_mismatch,
            error: None,
            checked_at: Utc::now(),
        }
    }

    /// A scenario that could not be verified at all (driver or reset
    /// failure). Recorded as failed, never silently dropped.
    pub fn error(scenario: &str, detail: impl Into<String>) -> Self {
        Self {
            scenario: scenario.to_string(),
            passed: false,
            node_mismatches: Vec::new(),
            message_mismatch: None,
            error: Some(detail.into()),
            checked_at: Utc::now(),
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {}", status, self.scenario)?;
        if let Some(error) = &self.error {
            write!(f, " ({})", error)?;
        }
        Ok(())
    }
}
