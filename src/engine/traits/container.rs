// ABOUTME: Container operations trait for container engines.
// ABOUTME: List, resolve, start, stop, and remove containers.

use super::error::EngineError;
use super::sealed::Sealed;
use super::shared_types::{ContainerHandle, ContainerSummary};
use async_trait::async_trait;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Sealed + Send + Sync {
    /// List containers; stopped ones are included only when `all` is set.
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>, EngineError>;

    /// Resolve a full ID, unique ID prefix, or name to a container handle.
    async fn get_container(&self, id: &str) -> Result<ContainerHandle, EngineError>;

    /// Start a container. Starting a running container succeeds.
    async fn start_container(&self, container: &ContainerHandle) -> Result<(), EngineError>;

    /// Stop a container. Stopping a stopped container succeeds.
    async fn stop_container(&self, container: &ContainerHandle) -> Result<(), EngineError>;

    /// Remove a container; `force` also removes a running one.
    async fn remove_container(
        &self,
        container: &ContainerHandle,
        force: bool,
    ) -> Result<(), EngineError>;
}
