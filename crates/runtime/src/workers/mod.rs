//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the battle and serialises every command
//! against it.

mod simulation;

pub use simulation::{Command, SimulationWorker};
