// ABOUTME: Composable capability traits for container engines.
// ABOUTME: Defines ContainerOps, ExecOps, LogOps, EngineInfo, and FullEngine.

mod container;
mod engine_info;
mod error;
mod exec;
mod logs;
pub(crate) mod sealed;
mod shared_types;

pub use container::ContainerOps;
pub use engine_info::{EngineInfo, EngineInfoError};
pub use error::EngineError;
pub use exec::ExecOps;
pub use logs::{LogOps, LogOptions, SNAPSHOT_TAIL};
pub use shared_types::*;

/// Every capability the gateway needs from an engine.
///
/// Auto-implemented for any type implementing all capability traits, so the
/// HTTP layer can hold a single `Arc<dyn FullEngine>`.
pub trait FullEngine: ContainerOps + ExecOps + LogOps + EngineInfo {}

impl<T> FullEngine for T where T: ContainerOps + ExecOps + LogOps + EngineInfo {}
