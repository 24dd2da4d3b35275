// ABOUTME: Exec operations trait for container engines.
// ABOUTME: Execute commands inside running containers.

use super::error::EngineError;
use super::sealed::Sealed;
use super::shared_types::{ContainerHandle, ExecResult};
use crate::types::ExecId;
use async_trait::async_trait;

/// Exec operations: run commands in containers.
///
/// No timeout is applied here: a command that never exits keeps the caller
/// waiting until the engine client gives up.
#[async_trait]
pub trait ExecOps: Sealed + Send + Sync {
    /// Create and run an exec instance, returning exit code and output.
    async fn exec(
        &self,
        container: &ContainerHandle,
        cmd: &[String],
    ) -> Result<ExecResult, EngineError> {
        let exec_id = self.exec_create(container, cmd).await?;
        self.exec_start(&exec_id).await
    }

    /// Create an exec instance without starting it.
    async fn exec_create(
        &self,
        container: &ContainerHandle,
        cmd: &[String],
    ) -> Result<ExecId, EngineError>;

    /// Start a created exec instance and wait for it to finish.
    async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, EngineError>;
}
