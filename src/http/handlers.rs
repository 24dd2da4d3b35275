// ABOUTME: Request handlers for the gateway's REST endpoints.
// ABOUTME: Each resolves the container, calls the engine once, and shapes JSON.

use super::AppState;
use super::command::ExecRequest;
use super::error::Result;
use super::types::{
    ActionResponse, ContainerSummaryResponse, ExecResponse, HealthResponse, LogsResponse,
};
use crate::engine::{ContainerOps, ExecOps, LogOps, LogOptions};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

/// Local time in ISO-8601 form without offset, e.g. `2024-05-01T12:30:00.123456`.
fn local_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Health check. Never touches the engine and never fails.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: local_timestamp(),
        docker_connected: state.is_connected(),
    })
}

/// List running containers.
pub async fn list_running(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerSummaryResponse>>> {
    list_containers(&state, false).await
}

/// List all containers, including stopped ones.
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerSummaryResponse>>> {
    list_containers(&state, true).await
}

async fn list_containers(
    state: &AppState,
    all: bool,
) -> Result<Json<Vec<ContainerSummaryResponse>>> {
    let engine = state.engine()?;
    let containers = engine.list_containers(all).await?;

    Ok(Json(
        containers
            .iter()
            .map(ContainerSummaryResponse::from)
            .collect(),
    ))
}

/// Start container.
pub async fn start_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    let engine = state.engine()?;
    let container = engine.get_container(&id).await?;
    engine.start_container(&container).await?;

    tracing::info!(container = %id, full_id = %container.id, "container started");
    Ok(Json(ActionResponse::new(
        format!("Container {id} iniciado com sucesso"),
        "started",
    )))
}

/// Stop container.
pub async fn stop_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse>> {
    let engine = state.engine()?;
    let container = engine.get_container(&id).await?;
    engine.stop_container(&container).await?;

    tracing::info!(container = %id, full_id = %container.id, "container stopped");
    Ok(Json(ActionResponse::new(
        format!("Container {id} parado com sucesso"),
        "stopped",
    )))
}

/// Snapshot of the last 100 log lines, with timestamps.
pub async fn container_logs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LogsResponse>> {
    let engine = state.engine()?;
    let container = engine.get_container(&id).await?;
    let logs = engine
        .container_logs(&container, &LogOptions::snapshot())
        .await?;

    Ok(Json(LogsResponse {
        container_id: id,
        logs,
    }))
}

/// Remove container query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct RemoveContainerQuery {
    /// Force removal of a running container.
    pub force: Option<String>,
}

/// `true` only for a case-insensitive "true"; anything else, or nothing, is false.
pub fn parse_force(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Remove container.
pub async fn remove_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RemoveContainerQuery>,
) -> Result<Json<ActionResponse>> {
    let force = parse_force(params.force.as_deref());
    let engine = state.engine()?;
    let container = engine.get_container(&id).await?;
    engine.remove_container(&container, force).await?;

    tracing::info!(container = %id, full_id = %container.id, force, "container removed");
    Ok(Json(ActionResponse::new(
        format!("Container {id} removido com sucesso"),
        "removed",
    )))
}

/// Run a command inside a container and wait for it to finish.
///
/// The body is validated before the engine is consulted, so a malformed
/// request is a 400 even when the engine is unavailable.
pub async fn exec_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ExecResponse>> {
    let request = ExecRequest::from_body(&body)?;
    let engine = state.engine()?;
    let container = engine.get_container(&id).await?;

    tracing::debug!(container = %id, argv = ?request.argv, "exec");
    let result = engine.exec(&container, &request.argv).await?;

    Ok(Json(ExecResponse {
        container_id: id,
        command: request.command,
        exit_code: result.exit_code,
        output: result.output_text(),
    }))
}
