//! Reset to the all-unchecked baseline between scenarios.

use tracing::{debug, instrument};

use canopy_types::Tree;

use crate::config::WaitPolicy;
use crate::driver::SelectionDriver;
use crate::error::{EngineError, EngineResult};
use crate::wait;

/// Drive the target back to the fully unchecked baseline and verify
/// it got there.
///
/// If the root reads unchecked, it is clicked once first: that
/// normalizes any partial selection into the fully checked state.
/// The following click cascades down to fully unchecked. The result
/// is then verified node by node; any residue fails with
/// [`EngineError::ResetVerification`] rather than being coerced with
/// further clicks - scenarios must not run on a dirty baseline, and a
/// baseline that survives this protocol is a bug in the target worth
/// surfacing.
#[instrument(skip_all)]
pub async fn reset<D>(driver: &D, tree: &Tree, policy: &WaitPolicy) -> EngineResult<()>
where
    D: SelectionDriver + ?Sized,
{
    let root = tree.root()?;

    let root_checked = wait::bounded("is_checked", policy, driver.is_checked(root)).await?;
    if !root_checked {
        debug!(%root, "root unchecked; normalizing to fully checked first");
        wait::bounded("click", policy, driver.click(root)).await?;
        tokio::time::sleep(policy.settle()).await;
    }

    wait::bounded("click", policy, driver.click(root)).await?;
    tokio::time::sleep(policy.settle()).await;

    for id in tree.preorder() {
        let checked = wait::bounded("is_checked", policy, driver.is_checked(&id)).await?;
        if checked {
            return Err(EngineError::ResetVerification {
                detail: format!("node {} still checked after reset", id),
            });
        }
    }

    let message =
        wait::bounded("read_status_message", policy, driver.read_status_message()).await?;
    if !message.trim().is_empty() {
        return Err(EngineError::ResetVerification {
            detail: format!("status message not empty after reset: '{}'", message.trim()),
        });
    }

    debug!("baseline verified clean");
    Ok(())
}
