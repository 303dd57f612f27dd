//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{NeutralTurnProvider, ScriptedTurnProvider, TurnProvider};
