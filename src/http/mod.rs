// ABOUTME: REST API for container operations: shared state and the router.
// ABOUTME: Without an engine every route except /health answers 503.

mod command;
mod error;
mod handlers;
mod server;
mod types;

pub use command::{ExecCommand, ExecRequest, SplitError, split_words};
pub use error::{ApiError, ErrorResponse, MISSING_COMMAND};
pub use handlers::{RemoveContainerQuery, parse_force};
pub use server::{connect_state, serve};
pub use types::{
    ActionResponse, ContainerSummaryResponse, ExecResponse, HealthResponse, LogsResponse,
};

use crate::engine::FullEngine;
use axum::Router;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared with handlers.
#[derive(Clone, Default)]
pub struct AppState {
    engine: Option<Arc<dyn FullEngine>>,
}

impl AppState {
    /// State backed by a connected engine.
    pub fn connected(engine: Arc<dyn FullEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// State for an engine that could not be reached at startup.
    pub fn disconnected() -> Self {
        Self { engine: None }
    }

    pub fn is_connected(&self) -> bool {
        self.engine.is_some()
    }

    /// The engine, or [`ApiError::Unavailable`] when it never connected.
    pub(crate) fn engine(&self) -> error::Result<&dyn FullEngine> {
        self.engine.as_deref().ok_or(ApiError::Unavailable)
    }
}

/// Creates the gateway router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/containers", get(handlers::list_running))
        .route("/containers/all", get(handlers::list_all))
        .route("/containers/{id}/start", post(handlers::start_container))
        .route("/containers/{id}/stop", post(handlers::stop_container))
        .route("/containers/{id}/logs", get(handlers::container_logs))
        .route("/containers/{id}/remove", delete(handlers::remove_container))
        .route("/containers/{id}/exec", post(handlers::exec_command))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::traits::sealed::Sealed;
    use crate::engine::{
        ContainerHandle, ContainerOps, ContainerSummary, EngineError, EngineInfo,
        EngineInfoError, EngineMetadata, ExecOps, ExecResult, LogOps, LogOptions,
    };
    use crate::types::{ContainerId, ExecId};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tower::ServiceExt;

    struct FakeContainer {
        id: String,
        name: String,
        running: bool,
        logs: String,
    }

    /// In-memory engine with Docker's resolution rules: full ID, unique ID
    /// prefix, or name.
    #[derive(Default)]
    struct FakeEngine {
        containers: Mutex<Vec<FakeContainer>>,
        execs: Mutex<HashMap<String, Vec<String>>>,
        start_calls: Mutex<usize>,
    }

    impl FakeEngine {
        fn with(self, id: &str, name: &str, running: bool) -> Self {
            self.containers.lock().push(FakeContainer {
                id: id.to_string(),
                name: name.to_string(),
                running,
                logs: format!("2024-01-01T00:00:00.000000000Z hello from {name}\n"),
            });
            self
        }

        fn resolve(&self, key: &str) -> Result<usize, EngineError> {
            let containers = self.containers.lock();
            let matches: Vec<usize> = containers
                .iter()
                .enumerate()
                .filter(|(_, c)| c.id == key || c.name == key || c.id.starts_with(key))
                .map(|(i, _)| i)
                .collect();
            match matches.as_slice() {
                [idx] if !key.is_empty() => Ok(*idx),
                _ => Err(EngineError::NotFound(format!("No such container: {key}"))),
            }
        }
    }

    impl Sealed for FakeEngine {}

    #[async_trait]
    impl ContainerOps for FakeEngine {
        async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>, EngineError> {
            Ok(self
                .containers
                .lock()
                .iter()
                .filter(|c| all || c.running)
                .map(|c| ContainerSummary {
                    id: ContainerId::new(c.id.clone()),
                    name: c.name.clone(),
                    status: if c.running { "running" } else { "exited" }.to_string(),
                    image: "alpine:latest".to_string(),
                })
                .collect())
        }

        async fn get_container(&self, id: &str) -> Result<ContainerHandle, EngineError> {
            let idx = self.resolve(id)?;
            let containers = self.containers.lock();
            Ok(ContainerHandle {
                id: ContainerId::new(containers[idx].id.clone()),
                name: containers[idx].name.clone(),
            })
        }

        async fn start_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
            let idx = self.resolve(container.id.as_str())?;
            *self.start_calls.lock() += 1;
            self.containers.lock()[idx].running = true;
            Ok(())
        }

        async fn stop_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
            let idx = self.resolve(container.id.as_str())?;
            self.containers.lock()[idx].running = false;
            Ok(())
        }

        async fn remove_container(
            &self,
            container: &ContainerHandle,
            force: bool,
        ) -> Result<(), EngineError> {
            let idx = self.resolve(container.id.as_str())?;
            let mut containers = self.containers.lock();
            if containers[idx].running && !force {
                return Err(EngineError::Runtime(format!(
                    "cannot remove container \"/{}\": container is running: stop the container before removing or force remove",
                    containers[idx].name
                )));
            }
            containers.remove(idx);
            Ok(())
        }
    }

    #[async_trait]
    impl ExecOps for FakeEngine {
        async fn exec_create(
            &self,
            container: &ContainerHandle,
            cmd: &[String],
        ) -> Result<ExecId, EngineError> {
            let idx = self.resolve(container.id.as_str())?;
            if !self.containers.lock()[idx].running {
                return Err(EngineError::Runtime(format!(
                    "container {} is not running",
                    container.id
                )));
            }
            let exec_id = format!("exec-{}", self.execs.lock().len());
            self.execs.lock().insert(exec_id.clone(), cmd.to_vec());
            Ok(ExecId::new(exec_id))
        }

        async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, EngineError> {
            let cmd = self
                .execs
                .lock()
                .remove(exec_id.as_str())
                .ok_or_else(|| EngineError::NotFound(format!("No such exec instance: {exec_id}")))?;
            match cmd.split_first() {
                Some((program, args)) if program == "echo" => Ok(ExecResult {
                    exit_code: 0,
                    output: format!("{}\n", args.join(" ")).into_bytes(),
                }),
                Some((program, _)) if program == "false" => Ok(ExecResult {
                    exit_code: 1,
                    output: Vec::new(),
                }),
                _ => Ok(ExecResult {
                    exit_code: 127,
                    output: b"command not found\n".to_vec(),
                }),
            }
        }
    }

    #[async_trait]
    impl LogOps for FakeEngine {
        async fn container_logs(
            &self,
            container: &ContainerHandle,
            opts: &LogOptions,
        ) -> Result<String, EngineError> {
            assert_eq!(*opts, LogOptions::snapshot());
            let idx = self.resolve(container.id.as_str())?;
            Ok(self.containers.lock()[idx].logs.clone())
        }
    }

    #[async_trait]
    impl EngineInfo for FakeEngine {
        async fn info(&self) -> Result<EngineMetadata, EngineInfoError> {
            Ok(EngineMetadata {
                name: "fake".to_string(),
                version: "0.0.0".to_string(),
                api_version: "1.43".to_string(),
                os: "linux".to_string(),
                arch: "amd64".to_string(),
            })
        }

        async fn ping(&self) -> Result<(), EngineInfoError> {
            Ok(())
        }
    }

    const WEB_ID: &str = "a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2";
    const DB_ID: &str = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100";

    fn fixture() -> Arc<FakeEngine> {
        Arc::new(
            FakeEngine::default()
                .with(WEB_ID, "web", true)
                .with(DB_ID, "db", false),
        )
    }

    fn router(engine: Arc<FakeEngine>) -> Router {
        create_router(AppState::connected(engine))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_connected() {
        let (status, body) = send(router(fixture()), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["docker_connected"], true);
    }

    #[tokio::test]
    async fn running_list_is_subset_of_all() {
        let engine = fixture();
        let (_, running) = send(router(engine.clone()), Method::GET, "/containers", None).await;
        let (_, all) = send(router(engine), Method::GET, "/containers/all", None).await;

        let running = running.as_array().unwrap();
        let all = all.as_array().unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(all.len(), 2);
        for entry in running {
            assert!(all.contains(entry));
        }
        assert_eq!(running[0]["id"], &WEB_ID[..12]);
        assert_eq!(running[0]["name"], "web");
        assert_eq!(running[0]["status"], "running");
    }

    #[tokio::test]
    async fn listed_short_id_resolves_to_same_container() {
        let engine = fixture();
        let (_, all) = send(router(engine.clone()), Method::GET, "/containers/all", None).await;
        let short = all[1]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            router(engine),
            Method::GET,
            &format!("/containers/{short}/logs"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["container_id"], short.as_str());
        assert!(body["logs"].as_str().unwrap().contains("hello from db"));
    }

    #[tokio::test]
    async fn unknown_container_is_404_everywhere() {
        let engine = fixture();
        let cases = [
            (Method::POST, "/containers/nope/start", None),
            (Method::POST, "/containers/nope/stop", None),
            (Method::GET, "/containers/nope/logs", None),
            (Method::DELETE, "/containers/nope/remove", None),
            (
                Method::POST,
                "/containers/nope/exec",
                Some(json!({"command": "echo hi"})),
            ),
        ];

        for (method, uri, body) in cases {
            let (status, json) = send(router(engine.clone()), method, uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(json["error"], "Container não encontrado");
        }
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let engine = fixture();
        let first = send(router(engine.clone()), Method::POST, "/containers/db/start", None).await;
        let second = send(router(engine.clone()), Method::POST, "/containers/db/start", None).await;

        assert_eq!(first, second);
        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first.1["message"], "Container db iniciado com sucesso");
        assert_eq!(first.1["status"], "started");
        assert_eq!(*engine.start_calls.lock(), 2);
    }

    #[tokio::test]
    async fn stop_echoes_path_identifier() {
        let (status, body) = send(
            router(fixture()),
            Method::POST,
            &format!("/containers/{}/stop", &WEB_ID[..12]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Container {} parado com sucesso", &WEB_ID[..12])
        );
        assert_eq!(body["status"], "stopped");
    }

    #[tokio::test]
    async fn removing_running_container_requires_force() {
        let engine = fixture();

        let (status, body) = send(
            router(engine.clone()),
            Method::DELETE,
            "/containers/web/remove",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("container is running"));

        let (status, _) = send(
            router(engine.clone()),
            Method::DELETE,
            "/containers/web/remove?force=yes",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, body) = send(
            router(engine.clone()),
            Method::DELETE,
            "/containers/web/remove?force=TRUE",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Container web removido com sucesso");
        assert_eq!(body["status"], "removed");

        let (status, _) = send(router(engine), Method::GET, "/containers/web/logs", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn exec_returns_output_and_echoes_command() {
        let (status, body) = send(
            router(fixture()),
            Method::POST,
            "/containers/web/exec",
            Some(json!({"command": "echo 'hello world'"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["container_id"], "web");
        assert_eq!(body["command"], "echo 'hello world'");
        assert_eq!(body["exit_code"], 0);
        assert_eq!(body["output"], "hello world\n");
    }

    #[tokio::test]
    async fn exec_reports_nonzero_exit_as_success() {
        let (status, body) = send(
            router(fixture()),
            Method::POST,
            "/containers/web/exec",
            Some(json!({"command": ["false"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["command"], json!(["false"]));
        assert_eq!(body["exit_code"], 1);
        assert_eq!(body["output"], "");
    }

    #[tokio::test]
    async fn exec_in_stopped_container_is_engine_error() {
        let (status, body) = send(
            router(fixture()),
            Method::POST,
            "/containers/db/exec",
            Some(json!({"command": "echo hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("not running"));
    }

    #[tokio::test]
    async fn exec_without_command_is_rejected_before_engine() {
        let engine = fixture();
        let (status, body) = send(
            router(engine.clone()),
            Method::POST,
            "/containers/nope/exec",
            Some(json!({"cmd": "ls"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_COMMAND);
        assert!(engine.execs.lock().is_empty());
    }
}
