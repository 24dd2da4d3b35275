// ABOUTME: Engine connection error types with SNAFU pattern.
// ABOUTME: Unifies detection and connection errors for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::EngineInfoError;

/// Unified error for establishing the engine connection at startup.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("engine detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("engine connection failed: {source}"))]
    Connection { source: EngineInfoError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// No engine socket found on the system.
    NoEngineFound,
    /// DOCKER_HOST points at something other than a Unix socket.
    UnsupportedHost,
    /// Failed to reach the engine socket.
    ConnectionFailed,
}

impl ConnectError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Detection { source } => match source {
                DetectionError::NoRuntimeFound => ConnectErrorKind::NoEngineFound,
                DetectionError::UnsupportedHost(_) => ConnectErrorKind::UnsupportedHost,
            },
            ConnectError::Connection {
                source: EngineInfoError::ConnectionFailed(_),
            } => ConnectErrorKind::ConnectionFailed,
        }
    }
}

impl From<DetectionError> for ConnectError {
    fn from(source: DetectionError) -> Self {
        ConnectError::Detection { source }
    }
}

impl From<EngineInfoError> for ConnectError {
    fn from(source: EngineInfoError) -> Self {
        ConnectError::Connection { source }
    }
}
