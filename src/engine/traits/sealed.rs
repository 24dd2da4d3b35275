// ABOUTME: Sealed trait pattern for engine capability traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Sealed trait to prevent external implementations.
///
/// Only types inside this crate (the bollard-backed engine and test doubles)
/// can implement the engine traits, so methods can be added without a
/// breaking change.
pub trait Sealed {}
