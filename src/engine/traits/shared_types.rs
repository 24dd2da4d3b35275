// ABOUTME: Shared types used across engine trait definitions.
// ABOUTME: ContainerSummary, ContainerHandle, ExecResult, EngineMetadata.

use crate::types::ContainerId;

/// Image label reported when a container's image carries no tag.
pub const UNTAGGED_IMAGE: &str = "unknown";

/// Summary information about a container, recomputed on every listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    /// Full container ID.
    pub id: ContainerId,
    /// Container name without the leading slash.
    pub name: String,
    /// Engine lifecycle state ("running", "exited", ...).
    pub status: String,
    /// First repository tag of the image, or [`UNTAGGED_IMAGE`].
    pub image: String,
}

impl ContainerSummary {
    /// Whether the engine reports this container as running.
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// A container resolved by the engine from a full ID, ID prefix, or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    /// Full container ID as reported by the engine.
    pub id: ContainerId,
    /// Container name without the leading slash.
    pub name: String,
}

/// Result of an exec operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code of the executed process.
    pub exit_code: i64,
    /// Standard output and standard error, interleaved as received.
    pub output: Vec<u8>,
}

impl ExecResult {
    /// Output decoded as UTF-8, with invalid sequences replaced.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Engine metadata.
#[derive(Debug, Clone)]
pub struct EngineMetadata {
    /// Engine name (e.g., "Docker", "Podman").
    pub name: String,
    /// Engine version.
    pub version: String,
    /// API version used by the client.
    pub api_version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}
