//! Events emitted during a battle for front-ends to observe.
//!
//! Consumers subscribe to [`BattleEvent`] to react to turn changes without
//! blocking the worker loop.
use serde::{Deserialize, Serialize};

use battle_core::{ActorId, Refill, TurnEntry};

/// Events emitted by the runtime while a battle runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// An actor was handed its turn
    TurnStarted { owner: ActorId, turn: u64 },
    /// An actor finished its turn
    TurnCompleted {
        owner: ActorId,
        rank: i32,
        refill: Refill,
    },
    /// The lookahead queue changed after a completed turn
    QueueRefreshed { entries: Vec<TurnEntry> },
}
