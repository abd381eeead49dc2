//! Scenario sequencing.

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use canopy_types::{Scenario, SelectionState, Tree, VerificationResult};

use crate::config::RunnerConfig;
use crate::driver::SelectionDriver;
use crate::error::EngineResult;
use crate::report::RunReport;
use crate::{expansion, oracle, reset, verifier, wait};

/// Runs scenario batches against one system under test.
///
/// The driver session is exclusively owned for the run's duration and
/// driven strictly sequentially. Scenarios are independent: each one
/// starts from a verified clean baseline, and a failure in one never
/// aborts the batch. Only an expansion timeout is fatal to the run,
/// since no scenario can proceed on a partially expanded tree.
pub struct ScenarioRunner<D: SelectionDriver> {
    driver: D,
    tree: Tree,
    config: RunnerConfig,
}

impl<D: SelectionDriver> ScenarioRunner<D> {
    pub fn new(driver: D, tree: Tree) -> Self {
        Self {
            driver,
            tree,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Expand the tree once, then run every scenario in order.
    #[instrument(skip_all, fields(scenarios = scenarios.len()))]
    pub async fn run(&self, scenarios: &[Scenario]) -> EngineResult<RunReport> {
        let started_at = Utc::now();

        let rounds = expansion::expand_tree(&self.driver, &self.config.expansion).await?;
        info!(rounds, "tree expansion complete");

        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_scenario(scenario).await;
            let failed = !result.passed;
            results.push(result);

            if failed && self.config.fail_fast {
                warn!(scenario = %scenario.name, "fail-fast stop");
                break;
            }
        }

        let skipped = scenarios.len() - results.len();
        Ok(RunReport::from_results(
            results,
            skipped,
            started_at,
            Utc::now(),
        ))
    }

    /// Run one scenario; every per-scenario error becomes a failing
    /// result here, so the batch always continues.
    async fn run_scenario(&self, scenario: &Scenario) -> VerificationResult {
        match self.execute(scenario).await {
            Ok(result) => {
                if result.passed {
                    info!(scenario = %scenario.name, "conformant");
                } else {
                    warn!(
                        scenario = %scenario.name,
                        node_mismatches = result.node_mismatches.len(),
                        "non-conformant"
                    );
                }
                result
            }
            Err(err) => {
                error!(scenario = %scenario.name, %err, "scenario aborted");
                VerificationResult::error(&scenario.name, err.to_string())
            }
        }
    }

    async fn execute(&self, scenario: &Scenario) -> EngineResult<VerificationResult> {
        reset::reset(&self.driver, &self.tree, &self.config.wait).await?;

        for label in &scenario.targets {
            let id = self.tree.id_by_label(label)?.clone();
            wait::bounded("click", &self.config.wait, self.driver.click(&id)).await?;
            tokio::time::sleep(self.config.wait.settle()).await;
        }

        let expected = oracle::expected_state(&self.tree, &scenario.targets)?;
        let expected_message = oracle::expected_message(&self.tree, &expected);

        let actual = self.capture_state().await?;
        let actual_message = wait::bounded(
            "read_status_message",
            &self.config.wait,
            self.driver.read_status_message(),
        )
        .await?;

        Ok(verifier::verify(
            &scenario.name,
            &self.tree,
            &expected,
            &actual,
            &expected_message,
            &actual_message,
        ))
    }

    async fn capture_state(&self) -> EngineResult<SelectionState> {
        let mut state = SelectionState::new();
        for id in self.tree.preorder() {
            let checked =
                wait::bounded("is_checked", &self.config.wait, self.driver.is_checked(&id))
                    .await?;
            state.set(id, checked);
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExpansionPolicy, WaitPolicy};
    use crate::fixture::{reference_scenarios, reference_tree};
    use crate::sim::{FaultInjection, SimulatedSelectionDriver};

    fn fast_config() -> RunnerConfig {
        let wait = WaitPolicy {
            op_timeout_ms: 1000,
            settle_ms: 0,
        };
        RunnerConfig {
            expansion: ExpansionPolicy {
                max_rounds: 16,
                wait,
            },
            wait,
            fail_fast: false,
        }
    }

    fn runner(faults: FaultInjection) -> ScenarioRunner<SimulatedSelectionDriver> {
        let tree = reference_tree().unwrap();
        let driver = SimulatedSelectionDriver::with_faults(tree.clone(), faults);
        ScenarioRunner::new(driver, tree).with_config(fast_config())
    }

    #[tokio::test]
    async fn test_reference_catalog_fully_conformant() {
        let report = runner(FaultInjection::default())
            .run(&reference_scenarios())
            .await
            .unwrap();
        assert!(report.all_passed(), "failures: {:?}", report.failures());
        assert_eq!(report.summary.total, 14);
    }

    #[tokio::test]
    async fn test_broken_cascade_up_detected() {
        let faults = FaultInjection {
            break_cascade_up: true,
            ..Default::default()
        };
        let scenarios = vec![
            Scenario::new("pair").targets(["Notes", "Commands"]),
            Scenario::new("single").target("Office"),
        ];
        let report = runner(faults).run(&scenarios).await.unwrap();
        // The pair case misses the parent; the single-leaf case has no
        // cascade to break and still passes.
        assert_eq!(report.summary.failed, 1);
        let failure = &report.failures()[0];
        assert_eq!(failure.scenario, "pair");
        assert!(failure
            .node_mismatches
            .iter()
            .any(|m| m.id.as_str() == "check-desktop" && m.expected && !m.actual));
    }

    #[tokio::test]
    async fn test_broken_status_message_detected() {
        let faults = FaultInjection {
            break_status_message: true,
            ..Default::default()
        };
        let scenarios = vec![Scenario::new("single").target("Notes")];
        let report = runner(faults).run(&scenarios).await.unwrap();
        let failure = &report.failures()[0];
        let mismatch = failure.message_mismatch.as_ref().unwrap();
        assert_eq!(mismatch.expected, "Notes");
        assert!(mismatch.actual.contains("You have selected"));
    }

    #[tokio::test]
    async fn test_driver_error_recorded_and_run_continues() {
        let faults = FaultInjection {
            fail_clicks_on: Some(canopy_types::NodeId::new("check-office")),
            ..Default::default()
        };
        let scenarios = vec![
            Scenario::new("blocked").target("Office"),
            Scenario::new("after").target("Notes"),
        ];
        let report = runner(faults).run(&scenarios).await.unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 1);
        assert!(report.results[0].error.as_deref().unwrap().contains("check-office"));
        assert!(report.results[1].passed);
    }

    #[tokio::test]
    async fn test_scenario_independence_after_forced_failure() {
        // The broken message makes scenario N fail; scenario N+1 must
        // still be compared against a freshly reset baseline, so its
        // per-node diff stays clean.
        let faults = FaultInjection {
            break_status_message: true,
            ..Default::default()
        };
        let scenarios = vec![
            Scenario::new("fails first").target("Notes"),
            Scenario::new("passes next").targets(["WorkSpace", "Office"]),
        ];
        let report = runner(faults).run(&scenarios).await.unwrap();
        assert!(!report.results[0].passed);
        // State capture for the second scenario still diffs correctly
        // against a freshly reset baseline.
        assert!(report.results[1].node_mismatches.is_empty());
    }

    #[tokio::test]
    async fn test_reset_residue_fails_scenario_and_run_continues() {
        // A node that refuses to uncheck leaves residue behind every
        // reset, so each scenario fails its baseline verification; the
        // batch must still run to completion.
        let faults = FaultInjection {
            sticky_node: Some(canopy_types::NodeId::new("check-office")),
            ..Default::default()
        };
        let scenarios = vec![
            Scenario::new("first").target("Notes"),
            Scenario::new("second").target("Commands"),
        ];
        let report = runner(faults).run(&scenarios).await.unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.failed, 2);
        for result in &report.results {
            assert!(!result.passed);
            assert!(result.error.as_deref().unwrap().contains("dirty baseline"));
        }
    }

    #[tokio::test]
    async fn test_expansion_timeout_aborts_run() {
        let faults = FaultInjection {
            refuse_expand: true,
            ..Default::default()
        };
        let err = runner(faults)
            .run(&reference_scenarios())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::EngineError::ExpansionTimeout { .. }));
    }

    #[tokio::test]
    async fn test_fail_fast_skips_remaining() {
        let faults = FaultInjection {
            break_cascade_up: true,
            ..Default::default()
        };
        let mut config = fast_config();
        config.fail_fast = true;
        let tree = reference_tree().unwrap();
        let driver = SimulatedSelectionDriver::with_faults(tree.clone(), faults);
        let runner = ScenarioRunner::new(driver, tree).with_config(config);

        let scenarios = vec![
            Scenario::new("pair").targets(["Notes", "Commands"]),
            Scenario::new("never runs").target("Office"),
        ];
        let report = runner.run(&scenarios).await.unwrap();
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.skipped, 1);
    }

    #[tokio::test]
    async fn test_unknown_label_becomes_scenario_failure() {
        let scenarios = vec![
            Scenario::new("typo").target("Dekstop"),
            Scenario::new("fine").target("Desktop"),
        ];
        let report = runner(FaultInjection::default())
            .run(&scenarios)
            .await
            .unwrap();
        assert!(!report.results[0].passed);
        assert!(report.results[0].error.as_deref().unwrap().contains("Dekstop"));
        assert!(report.results[1].passed);
    }
}
