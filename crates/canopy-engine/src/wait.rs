//! Bounded waits around driver operations.

use std::future::Future;

use crate::config::WaitPolicy;
use crate::error::{DriverResult, EngineError, EngineResult};

/// Run one driver operation under the policy's timeout.
///
/// The caller suspends cooperatively while the system under test
/// settles; an elapsed timeout surfaces as [`EngineError::Wait`]
/// naming the operation.
pub(crate) async fn bounded<T, F>(
    operation: &'static str,
    policy: &WaitPolicy,
    future: F,
) -> EngineResult<T>
where
    F: Future<Output = DriverResult<T>>,
{
    match tokio::time::timeout(policy.op_timeout(), future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(EngineError::Driver(err)),
        Err(_) => Err(EngineError::Wait {
            operation,
            elapsed_ms: policy.op_timeout_ms,
        }),
    }
}
