//! Async orchestration for carousel battles.
//!
//! This crate runs a [`battle_core::Battle`] inside a background worker and
//! exposes the two-phase turn protocol (prepare, then complete) over channels.
//! Consumers embed [`Runtime`] to drive turns, plug in a [`TurnProvider`] to
//! decide what each actor does, and subscribe to [`BattleEvent`]s through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] lists what the worker broadcasts
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    NeutralTurnProvider, Result, RuntimeError, RuntimeHandle, ScriptedTurnProvider, TurnProvider,
};
pub use events::BattleEvent;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
