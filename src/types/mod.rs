// ABOUTME: Type-safe identifiers shared by the engine adapter and the HTTP layer.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;

pub use id::{ContainerId, ExecId, SHORT_ID_LEN};
