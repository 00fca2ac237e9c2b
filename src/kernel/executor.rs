use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::PendingAction;

/// What the downstream system reported after acting on a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub message: Option<String>,
    /// Backend reference (message id, job id, ...), when there is one.
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("executor timed out after {0} ms")]
    TimedOut(u64),
    #[error("execution failed: {0}")]
    Failed(String),
}

/// The host side of an action: sends or opens the target document.
/// Implementations own retries; the reactor reports whatever comes back.
#[async_trait]
pub trait DocumentExecutor: Send + Sync + 'static {
    async fn execute(&self, action: &PendingAction) -> Result<ExecutionReport, ExecutionError>;
}
