//! Asynchronous abstraction for sourcing turn outcomes.
//!
//! Runtime users plug in [`TurnProvider`] implementations so the battle can
//! run with human input, scripted fixtures, or AI policies. The future
//! returned by [`TurnProvider::take_turn`] resolving is the "turn complete"
//! signal.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use battle_core::{ActorId, BattleSnapshot, TurnOutcome};

use super::errors::Result;

/// Trait for playing out an actor's turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy AI decisions
/// - Scripted/replayed turns
/// - Testing fixtures
#[async_trait]
pub trait TurnProvider: Send + Sync {
    /// Play the turn of `actor` and report what happened.
    ///
    /// # Arguments
    /// * `actor` - The actor at the head of the queue
    /// * `snapshot` - Read-only view of the battle when the turn started
    async fn take_turn(&self, actor: ActorId, snapshot: &BattleSnapshot) -> Result<TurnOutcome>;
}

/// A provider whose actors always take a neutral turn.
/// Useful for previews or as a fallback.
pub struct NeutralTurnProvider;

#[async_trait]
impl TurnProvider for NeutralTurnProvider {
    async fn take_turn(&self, _actor: ActorId, _snapshot: &BattleSnapshot) -> Result<TurnOutcome> {
        Ok(TurnOutcome::neutral())
    }
}

/// Replays a fixed skill-rank script per actor, cycling when exhausted.
///
/// Actors without a script (or with an empty one) take neutral turns.
#[derive(Debug, Default)]
pub struct ScriptedTurnProvider {
    scripts: HashMap<ActorId, Script>,
}

#[derive(Debug)]
struct Script {
    ranks: Vec<i32>,
    cursor: AtomicUsize,
}

impl ScriptedTurnProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rank `actor` uses on successive turns.
    pub fn with_script(mut self, actor: ActorId, ranks: impl Into<Vec<i32>>) -> Self {
        self.scripts.insert(
            actor,
            Script {
                ranks: ranks.into(),
                cursor: AtomicUsize::new(0),
            },
        );
        self
    }

    /// Rank `actor` will use on its next turn, advancing its script.
    fn next_rank(&self, actor: ActorId) -> Option<i32> {
        let script = self.scripts.get(&actor)?;
        if script.ranks.is_empty() {
            return None;
        }
        let turn = script.cursor.fetch_add(1, Ordering::Relaxed);
        script.ranks.get(turn % script.ranks.len()).copied()
    }
}

#[async_trait]
impl TurnProvider for ScriptedTurnProvider {
    async fn take_turn(&self, actor: ActorId, _snapshot: &BattleSnapshot) -> Result<TurnOutcome> {
        let outcome = match self.next_rank(actor) {
            Some(rank) => TurnOutcome::neutral().with_skill_rank(rank),
            None => TurnOutcome::neutral(),
        };
        Ok(outcome)
    }
}
