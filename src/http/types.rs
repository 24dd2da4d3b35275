// ABOUTME: JSON response bodies of the REST API.
// ABOUTME: Health, container summaries, action results, logs, and exec output.

use super::command::ExecCommand;
use crate::engine::ContainerSummary;
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub docker_connected: bool,
}

/// One entry of `GET /containers` and `GET /containers/all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummaryResponse {
    /// 12-character ID prefix.
    pub id: String,
    pub name: String,
    pub status: String,
    pub image: String,
}

impl From<&ContainerSummary> for ContainerSummaryResponse {
    fn from(c: &ContainerSummary) -> Self {
        Self {
            id: c.id.short().to_string(),
            name: c.name.clone(),
            status: c.status.clone(),
            image: c.image.clone(),
        }
    }
}

/// Body of the start, stop, and remove endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub message: String,
    pub status: String,
}

impl ActionResponse {
    pub fn new(message: impl Into<String>, status: &str) -> Self {
        Self {
            message: message.into(),
            status: status.to_string(),
        }
    }
}

/// Body of `GET /containers/{id}/logs`.
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub container_id: String,
    pub logs: String,
}

/// Body of `POST /containers/{id}/exec`.
#[derive(Debug, Serialize)]
pub struct ExecResponse {
    pub container_id: String,
    pub command: ExecCommand,
    pub exit_code: i64,
    pub output: String,
}
