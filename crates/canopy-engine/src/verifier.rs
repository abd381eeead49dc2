//! Diff of observed state against the oracle's prediction.

use canopy_types::{MessageMismatch, NodeMismatch, SelectionState, Tree, VerificationResult};

/// Compare observed selection state and status message against the
/// oracle expectation.
///
/// Collects every per-node mismatch in canonical traversal order
/// rather than stopping at the first - seeing the whole set is what
/// tells a diagnoser which cascade direction broke. Message comparison
/// is exact after whitespace trim. Never errors: a mismatch is a
/// failing result.
pub fn verify(
    scenario: &str,
    tree: &Tree,
    expected: &SelectionState,
    actual: &SelectionState,
    expected_message: &str,
    actual_message: &str,
) -> VerificationResult {
    let mut node_mismatches = Vec::new();
    for id in tree.preorder() {
        let want = expected.checked(&id);
        let got = actual.checked(&id);
        if want != got {
            node_mismatches.push(NodeMismatch {
                id,
                expected: want,
                actual: got,
            });
        }
    }

    let message_mismatch = if expected_message.trim() != actual_message.trim() {
        Some(MessageMismatch {
            expected: expected_message.trim().to_string(),
            actual: actual_message.trim().to_string(),
        })
    } else {
        None
    };

    if node_mismatches.is_empty() && message_mismatch.is_none() {
        VerificationResult::pass(scenario)
    } else {
        VerificationResult::fail(scenario, node_mismatches, message_mismatch)
    }
}
