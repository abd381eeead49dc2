//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds on waiting for the system under test.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WaitPolicy {
    /// Upper bound on any single driver operation, in milliseconds.
    pub op_timeout_ms: u64,
    /// Settle delay after a mutating action, tolerating asynchronous
    /// rendering and cascade propagation. A policy parameter, not a
    /// correctness requirement.
    pub settle_ms: u64,
}

impl WaitPolicy {
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            op_timeout_ms: 5000,
            settle_ms: 300,
        }
    }
}

/// Bounds on the one-time tree expansion phase.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ExpansionPolicy {
    /// Maximum expand-one-requery rounds before giving up.
    pub max_rounds: usize,
    /// Waits applied to each expansion operation.
    pub wait: WaitPolicy,
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self {
            max_rounds: 64,
            wait: WaitPolicy::default(),
        }
    }
}

/// Configuration for a scenario run.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// One-time expansion phase bounds.
    pub expansion: ExpansionPolicy,
    /// Waits applied to per-scenario driver operations.
    pub wait: WaitPolicy,
    /// Stop scheduling further scenarios after the first failure.
    /// Off by default: scenarios are independent.
    pub fail_fast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_policy_defaults() {
        let wait = WaitPolicy::default();
        assert_eq!(wait.op_timeout(), Duration::from_millis(5000));
        assert_eq!(wait.settle(), Duration::from_millis(300));
    }

    #[test]
    fn test_runner_config_default_not_fail_fast() {
        let config = RunnerConfig::default();
        assert!(!config.fail_fast);
        assert_eq!(config.expansion.max_rounds, 64);
    }
}
