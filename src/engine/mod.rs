// ABOUTME: Container engine adapter: detection, connection, and capability traits.
// ABOUTME: The only component that talks to the Docker-compatible engine API.

mod client;
mod detection;
mod error;
pub mod traits;
mod types;

pub use client::BollardEngine;
pub use detection::{DetectionError, detect_local};
pub use error::{ConnectError, ConnectErrorKind};
pub use traits::{
    ContainerHandle, ContainerOps, ContainerSummary, EngineError, EngineInfo, EngineInfoError,
    EngineMetadata, ExecOps, ExecResult, FullEngine, LogOps, LogOptions, SNAPSHOT_TAIL,
    UNTAGGED_IMAGE,
};
pub use types::{EngineConfig, RuntimeInfo, RuntimeType};
