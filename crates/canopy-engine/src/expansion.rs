//! One-time materialization of the lazily rendered tree.
//!
//! Selection and state reads require the target element to be
//! rendered, so every collapsed node must be expanded before the first
//! scenario runs.

use tracing::{debug, instrument};

use crate::config::ExpansionPolicy;
use crate::driver::SelectionDriver;
use crate::error::{EngineError, EngineResult};
use crate::wait;

/// Expand collapsed nodes until none remain, returning the number of
/// expansions performed.
///
/// Exactly one marker is expanded per round: expanding a node can
/// reveal nested collapsed markers that a stale snapshot would miss,
/// so the marker set is re-queried after each expansion. The budget
/// counts expansions, and the timeout verdict comes from a re-query:
/// a tree that converges on its final permitted expansion succeeds.
/// Markers remaining once the budget is spent fail with
/// [`EngineError::ExpansionTimeout`], which is fatal to the whole run.
#[instrument(skip_all)]
pub async fn expand_tree<D>(driver: &D, policy: &ExpansionPolicy) -> EngineResult<usize>
where
    D: SelectionDriver + ?Sized,
{
    let mut rounds = 0;
    loop {
        let markers =
            wait::bounded("collapsed_markers", &policy.wait, driver.collapsed_markers()).await?;
        if markers.is_empty() {
            debug!(rounds, "tree fully expanded");
            return Ok(rounds);
        }
        if rounds == policy.max_rounds {
            return Err(EngineError::ExpansionTimeout { rounds });
        }
        debug!(round = rounds, remaining = markers.len(), marker = %markers[0], "expanding");
        wait::bounded("expand", &policy.wait, driver.expand(&markers[0])).await?;
        tokio::time::sleep(policy.wait.settle()).await;
        rounds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaitPolicy;
    use crate::fixture::reference_tree;
    use crate::sim::{FaultInjection, SimulatedSelectionDriver};

    fn fast_policy() -> ExpansionPolicy {
        ExpansionPolicy {
            max_rounds: 16,
            wait: WaitPolicy {
                op_timeout_ms: 1000,
                settle_ms: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_expansion_leaves_no_markers() {
        let driver = SimulatedSelectionDriver::new(reference_tree().unwrap());
        let rounds = expand_tree(&driver, &fast_policy()).await.unwrap();
        // Root plus three branches.
        assert_eq!(rounds, 4);
        assert!(driver.collapsed_markers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expansion_idempotent() {
        let driver = SimulatedSelectionDriver::new(reference_tree().unwrap());
        expand_tree(&driver, &fast_policy()).await.unwrap();
        let rounds = expand_tree(&driver, &fast_policy()).await.unwrap();
        assert_eq!(rounds, 0);
    }

    #[tokio::test]
    async fn test_expansion_succeeds_on_exact_round_budget() {
        // Four expansions materialize the reference tree; a budget of
        // exactly four must converge, not spuriously time out.
        let driver = SimulatedSelectionDriver::new(reference_tree().unwrap());
        let policy = ExpansionPolicy {
            max_rounds: 4,
            ..fast_policy()
        };
        let rounds = expand_tree(&driver, &policy).await.unwrap();
        assert_eq!(rounds, 4);
        assert!(driver.collapsed_markers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expansion_round_budget_exceeded() {
        let faults = FaultInjection {
            refuse_expand: true,
            ..Default::default()
        };
        let driver =
            SimulatedSelectionDriver::with_faults(reference_tree().unwrap(), faults);
        let err = expand_tree(&driver, &fast_policy()).await.unwrap_err();
        assert_eq!(err, EngineError::ExpansionTimeout { rounds: 16 });
    }
}
