// ABOUTME: Engine type definitions for Docker and Podman.
// ABOUTME: Includes RuntimeType, RuntimeInfo, and the engine section of the config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The container engine flavour behind the Docker-compatible API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    Docker,
    Podman,
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeType::Docker => write!(f, "docker"),
            RuntimeType::Podman => write!(f, "podman"),
        }
    }
}

/// Detected engine endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// The type of engine detected.
    pub runtime_type: RuntimeType,
    /// Path to the engine's Unix socket.
    pub socket_path: String,
}

/// Engine connection settings (the `engine:` section of `dockbridge.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Explicit engine type (overrides auto-detection).
    #[serde(default)]
    pub runtime: Option<RuntimeType>,
    /// Explicit socket path (overrides auto-detection).
    #[serde(default)]
    pub socket: Option<String>,
    /// Request timeout of the engine client.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            runtime: None,
            socket: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

impl EngineConfig {
    /// The client counts its timeout in whole seconds; anything shorter
    /// would time out every request.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout < Duration::from_secs(1) {
            return Err(format!(
                "engine timeout must be at least 1s, got {:?}",
                self.timeout
            ));
        }
        Ok(())
    }
}
