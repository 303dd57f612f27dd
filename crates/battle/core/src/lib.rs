//! Deterministic battle rules and the turn carousel.
//!
//! `battle-core` defines how combatants are ordered in a turn-based battle:
//! agility is banded into a tick speed, tick speed and skill rank produce a
//! counter value, and the [`schedule::Carousel`] runs a soonest-deadline-first
//! simulation over those counters to produce a lookahead queue of upcoming
//! turns. [`battle::Battle`] owns the roster and the carousel and is the
//! entry point for driving loops.
pub mod battle;
pub mod config;
pub mod error;
pub mod schedule;
pub mod state;
pub mod stats;

pub use battle::{Battle, BattleSnapshot, StatusApplication, TurnOutcome, TurnSummary};
pub use config::{BattleConfig, ConfigError};
pub use error::{BattleError, ErrorSeverity};
pub use schedule::{
    Carousel, CarouselError, Refill, Schedulable, ShadowHaste, TurnEntry, TurnReport,
};
pub use state::{
    ActorId, ActorState, ActorTemplate, Roster, Species, StatusEffect, StatusEffects, StatusError,
    StatusKind,
};
pub use stats::{compute_counter, resolve_tick_speed};
