// ABOUTME: Error type shared by the container, exec and log capability traits.
// ABOUTME: Two tags only: the target does not exist, or the engine failed.

/// Errors from engine operations.
///
/// Any engine answer meaning "no such object" becomes [`EngineError::NotFound`];
/// everything else (conflicts, permission problems, transport failures)
/// is reported as [`EngineError::Runtime`] with the engine's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Runtime(String),
}
