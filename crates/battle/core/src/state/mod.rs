//! Ground-truth battle state.
//!
//! Actors, their status effects, and the roster that orders them. The
//! carousel reads this state through [`crate::schedule::Schedulable`] and only
//! mutates it through the real status countdown.
pub mod actor;
pub mod roster;
pub mod status;

pub use actor::{ActorId, ActorState, ActorTemplate, Species};
pub use roster::Roster;
pub use status::{StatusEffect, StatusEffects, StatusError, StatusKind};
