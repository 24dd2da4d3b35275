// ABOUTME: Log operations trait for container engines.
// ABOUTME: Read a bounded, non-streaming snapshot of container output.

use super::error::EngineError;
use super::sealed::Sealed;
use super::shared_types::ContainerHandle;
use async_trait::async_trait;

/// Number of lines returned by the logs endpoint.
pub const SNAPSHOT_TAIL: u64 = 100;

/// Log snapshot operations.
#[async_trait]
pub trait LogOps: Sealed + Send + Sync {
    /// Read recent output of a container as a single text blob.
    async fn container_logs(
        &self,
        container: &ContainerHandle,
        opts: &LogOptions,
    ) -> Result<String, EngineError>;
}

/// Options for a log snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Include stdout.
    pub stdout: bool,
    /// Include stderr.
    pub stderr: bool,
    /// Prefix each line with its timestamp.
    pub timestamps: bool,
    /// Number of lines to show from end (`None` = all).
    pub tail: Option<u64>,
}

impl LogOptions {
    /// Last `n` lines of stdout and stderr, without timestamps.
    pub fn tail(n: u64) -> Self {
        Self {
            stdout: true,
            stderr: true,
            timestamps: false,
            tail: Some(n),
        }
    }

    /// The snapshot served over HTTP: last 100 lines with timestamps.
    pub fn snapshot() -> Self {
        Self {
            timestamps: true,
            ..Self::tail(SNAPSHOT_TAIL)
        }
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self::snapshot()
    }
}
