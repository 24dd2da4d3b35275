// ABOUTME: Bollard-based container engine implementation.
// ABOUTME: Speaks the Docker-compatible API to Docker or Podman over a Unix socket.

use crate::engine::detection::detect_local;
use crate::engine::error::ConnectError;
use crate::engine::traits::sealed::Sealed;
use crate::engine::traits::{
    ContainerHandle, ContainerOps, ContainerSummary, EngineError, EngineInfo, EngineInfoError,
    EngineMetadata, ExecOps, ExecResult, LogOps, LogOptions, UNTAGGED_IMAGE,
};
use crate::engine::types::{EngineConfig, RuntimeInfo, RuntimeType};
use crate::types::{ContainerId, ExecId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::LogOutput;
use bollard::exec::{StartExecOptions, StartExecResults};
use bollard::models::ContainerSummaryStateEnum;
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, LogsOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use futures::StreamExt;
use std::collections::HashMap;
use std::time::Duration;

/// Tag the engine reports for images without a repository tag.
const NONE_TAG: &str = "<none>:<none>";

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_engine_error(e: bollard::errors::Error) -> EngineError {
    match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        } => EngineError::NotFound(message),
        bollard::errors::Error::DockerResponseServerError { message, .. } => {
            EngineError::Runtime(message)
        }
        other => EngineError::Runtime(other.to_string()),
    }
}

fn append_output(buffer: &mut Vec<u8>, output: LogOutput) {
    match output {
        LogOutput::StdOut { message }
        | LogOutput::StdErr { message }
        | LogOutput::StdIn { message }
        | LogOutput::Console { message } => buffer.extend_from_slice(&message),
    }
}

/// The engine's own spelling of a container state (`running`, `exited`, ...).
fn state_label(state: Option<ContainerSummaryStateEnum>) -> String {
    state.map(|s| s.to_string()).unwrap_or_default()
}

/// Pick the first real repository tag, ignoring the `<none>:<none>` placeholder.
fn primary_tag(repo_tags: Option<Vec<String>>) -> Option<String> {
    repo_tags?.into_iter().find(|tag| tag != NONE_TAG)
}

// =============================================================================
// BollardEngine
// =============================================================================

/// Container engine implementation using bollard.
///
/// Works against Docker and Podman through the Docker-compatible API.
pub struct BollardEngine {
    client: Docker,
    info: RuntimeInfo,
}

impl BollardEngine {
    /// Create a new BollardEngine from a Docker client.
    pub fn new(client: Docker, info: RuntimeInfo) -> Self {
        Self { client, info }
    }

    /// Open a client for a detected endpoint without talking to it yet.
    pub fn open(info: &RuntimeInfo, timeout: Duration) -> Result<Self, EngineInfoError> {
        let client = Docker::connect_with_unix(
            &info.socket_path,
            timeout.as_secs(),
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(|e| EngineInfoError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client, info.clone()))
    }

    /// Detect the local engine, open a client and ping it.
    ///
    /// This is attempted once at startup; there is no retry.
    pub async fn connect(config: &EngineConfig) -> Result<Self, ConnectError> {
        let info = detect_local(config)?;
        tracing::debug!(
            runtime = %info.runtime_type,
            socket = %info.socket_path,
            "detected container engine"
        );

        let engine = Self::open(&info, config.timeout)?;
        engine.ping().await?;
        Ok(engine)
    }

    /// The endpoint this engine talks to.
    pub fn runtime_info(&self) -> &RuntimeInfo {
        &self.info
    }

    async fn image_tag(&self, image_id: &str) -> Result<String, EngineError> {
        if image_id.is_empty() {
            return Ok(UNTAGGED_IMAGE.to_string());
        }

        match self.client.inspect_image(image_id).await {
            Ok(image) => {
                Ok(primary_tag(image.repo_tags).unwrap_or_else(|| UNTAGGED_IMAGE.to_string()))
            }
            // Image deleted while the container still exists.
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(UNTAGGED_IMAGE.to_string()),
            Err(e) => Err(map_engine_error(e)),
        }
    }
}

// Implement Sealed trait to allow engine trait implementations
impl Sealed for BollardEngine {}

#[async_trait]
impl EngineInfo for BollardEngine {
    async fn info(&self) -> Result<EngineMetadata, EngineInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| EngineInfoError::ConnectionFailed(e.to_string()))?;

        let name = match self.info.runtime_type {
            RuntimeType::Docker => "Docker".to_string(),
            RuntimeType::Podman => "Podman".to_string(),
        };

        Ok(EngineMetadata {
            name,
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), EngineInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| EngineInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardEngine {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>, EngineError> {
        let opts = ListContainersOptions {
            all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(map_engine_error)?;

        // Several containers usually share an image; inspect each image once.
        let mut tags: HashMap<String, String> = HashMap::new();
        let mut summaries = Vec::with_capacity(containers.len());

        for c in containers {
            let image_id = c.image_id.unwrap_or_default();
            let image = match tags.get(&image_id) {
                Some(tag) => tag.clone(),
                None => {
                    let tag = self.image_tag(&image_id).await?;
                    tags.insert(image_id, tag.clone());
                    tag
                }
            };

            let name = c
                .names
                .unwrap_or_default()
                .first()
                .map(|n| n.trim_start_matches('/').to_string())
                .unwrap_or_default();

            let status = state_label(c.state);

            summaries.push(ContainerSummary {
                id: ContainerId::new(c.id.unwrap_or_default()),
                name,
                status,
                image,
            });
        }

        Ok(summaries)
    }

    async fn get_container(&self, id: &str) -> Result<ContainerHandle, EngineError> {
        let details = self
            .client
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(map_engine_error)?;

        Ok(ContainerHandle {
            id: ContainerId::new(details.id.unwrap_or_else(|| id.to_string())),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
        })
    }

    async fn start_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
        // The engine answers 304 for an already running container, which
        // bollard reports as success.
        self.client
            .start_container(container.id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_engine_error)
    }

    async fn stop_container(&self, container: &ContainerHandle) -> Result<(), EngineError> {
        // No timeout: the engine applies the container's own stop grace period.
        self.client
            .stop_container(container.id.as_str(), None::<StopContainerOptions>)
            .await
            .map_err(map_engine_error)
    }

    async fn remove_container(
        &self,
        container: &ContainerHandle,
        force: bool,
    ) -> Result<(), EngineError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(container.id.as_str(), Some(opts))
            .await
            .map_err(map_engine_error)
    }
}

#[async_trait]
impl ExecOps for BollardEngine {
    async fn exec_create(
        &self,
        container: &ContainerHandle,
        cmd: &[String],
    ) -> Result<ExecId, EngineError> {
        let config = bollard::models::ExecConfig {
            cmd: Some(cmd.to_vec()),
            attach_stdin: Some(false),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            tty: Some(false),
            ..Default::default()
        };

        let response = self
            .client
            .create_exec(container.id.as_str(), config)
            .await
            .map_err(map_engine_error)?;

        Ok(ExecId::new(response.id))
    }

    async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, EngineError> {
        let opts = StartExecOptions {
            detach: false,
            ..Default::default()
        };

        let result = self
            .client
            .start_exec(exec_id.as_str(), Some(opts))
            .await
            .map_err(map_engine_error)?;

        let mut output = Vec::new();

        if let StartExecResults::Attached { output: mut stream, .. } = result {
            while let Some(item) = stream.next().await {
                let chunk = item.map_err(map_engine_error)?;
                append_output(&mut output, chunk);
            }
        }

        let details = self
            .client
            .inspect_exec(exec_id.as_str())
            .await
            .map_err(map_engine_error)?;

        Ok(ExecResult {
            exit_code: details.exit_code.unwrap_or(0),
            output,
        })
    }
}

#[async_trait]
impl LogOps for BollardEngine {
    async fn container_logs(
        &self,
        container: &ContainerHandle,
        opts: &LogOptions,
    ) -> Result<String, EngineError> {
        let log_opts = LogsOptions {
            stdout: opts.stdout,
            stderr: opts.stderr,
            follow: false,
            timestamps: opts.timestamps,
            tail: opts
                .tail
                .map(|n| n.to_string())
                .unwrap_or_else(|| "all".to_string()),
            ..Default::default()
        };

        let mut stream = self.client.logs(container.id.as_str(), Some(log_opts));
        let mut buffer = Vec::new();

        while let Some(item) = stream.next().await {
            let chunk = item.map_err(map_engine_error)?;
            append_output(&mut buffer, chunk);
        }

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
