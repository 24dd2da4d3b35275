// ABOUTME: Engine endpoint detection on the local system.
// ABOUTME: Honors explicit config and DOCKER_HOST, then probes Docker and Podman sockets.

use super::types::{EngineConfig, RuntimeInfo, RuntimeType};
use std::path::Path;

/// Error during engine detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container engine found (checked DOCKER_HOST, Docker and Podman sockets)")]
    NoRuntimeFound,

    #[error("unsupported DOCKER_HOST (only unix:// sockets are supported): {0}")]
    UnsupportedHost(String),
}

const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const UNIX_SCHEME: &str = "unix://";

/// Detect the container engine on the local system.
///
/// Detection order:
/// 1. Explicit `runtime`/`socket` from the engine config
/// 2. `DOCKER_HOST`, when it names a `unix://` socket
/// 3. Docker socket (`/var/run/docker.sock`)
/// 4. Rootful Podman socket (`/run/podman/podman.sock`)
/// 5. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
pub fn detect_local(config: &EngineConfig) -> Result<RuntimeInfo, DetectionError> {
    // 1. Explicit override
    if let Some(socket) = &config.socket {
        let socket_path = socket.trim_start_matches(UNIX_SCHEME).to_string();
        let runtime_type = config
            .runtime
            .unwrap_or_else(|| guess_runtime_type(&socket_path));
        return Ok(RuntimeInfo {
            runtime_type,
            socket_path,
        });
    }

    if let Some(runtime_type) = config.runtime {
        return Ok(RuntimeInfo {
            runtime_type,
            socket_path: default_socket_path(runtime_type),
        });
    }

    // 2. DOCKER_HOST
    if let Some(host) = std::env::var("DOCKER_HOST").ok().filter(|h| !h.is_empty()) {
        let Some(socket_path) = host.strip_prefix(UNIX_SCHEME) else {
            return Err(DetectionError::UnsupportedHost(host));
        };
        return Ok(RuntimeInfo {
            runtime_type: guess_runtime_type(socket_path),
            socket_path: socket_path.to_string(),
        });
    }

    // 3. Docker
    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    // 4. Rootful Podman
    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    // 5. Rootless Podman
    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/podman/podman.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(RuntimeInfo {
                runtime_type: RuntimeType::Podman,
                socket_path: rootless_socket,
            });
        }
    }

    Err(DetectionError::NoRuntimeFound)
}

fn guess_runtime_type(socket_path: &str) -> RuntimeType {
    if socket_path.contains("podman") {
        RuntimeType::Podman
    } else {
        RuntimeType::Docker
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => ROOTFUL_PODMAN.to_string(),
    }
}
