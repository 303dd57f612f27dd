//! Simulation worker that owns the authoritative [`Battle`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives the
//! carousel through [`Battle`], and publishes [`BattleEvent`]s.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, trace, warn};

use battle_core::{
    ActorId, Battle, BattleError, BattleSnapshot, CarouselError, TurnEntry, TurnOutcome,
    TurnSummary,
};

use crate::api::{Result, RuntimeError};
use crate::events::BattleEvent;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Determine which actor acts next.
    /// Returns the actor and a snapshot for its decision-making.
    PrepareNextTurn {
        reply: oneshot::Sender<Result<(ActorId, BattleSnapshot)>>,
    },
    /// Apply the outcome of the current turn and advance the queue.
    CompleteTurn {
        owner: ActorId,
        outcome: TurnOutcome,
        reply: oneshot::Sender<Result<TurnSummary>>,
    },
    /// Query the lookahead queue (read-only).
    QueryQueue {
        reply: oneshot::Sender<Vec<TurnEntry>>,
    },
    /// Query a snapshot of the battle (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Background task that processes turn commands.
///
/// The worker never talks to providers; the [`Runtime`](crate::Runtime)
/// awaits the provider between the two phases.
pub struct SimulationWorker {
    battle: Battle,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl SimulationWorker {
    /// Creates a new simulation worker around an initialised battle.
    pub fn new(
        battle: Battle,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        tracing::info!(
            actors = battle.roster().len(),
            active = battle.roster().active_count(),
            queued = battle.carousel().len(),
            "SimulationWorker initialized"
        );

        Self {
            battle,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Exits once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("SimulationWorker command channel closed, stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::PrepareNextTurn { reply } => {
                let result = self.handle_turn_preparation();
                if reply.send(result).is_err() {
                    debug!("PrepareNextTurn reply channel closed (caller dropped)");
                }
            }
            Command::CompleteTurn {
                owner,
                outcome,
                reply,
            } => {
                let result = self.handle_turn_completion(owner, outcome);
                if reply.send(result).is_err() {
                    debug!("CompleteTurn reply channel closed (caller dropped)");
                }
            }
            Command::QueryQueue { reply } => {
                if reply.send(self.battle.queue()).is_err() {
                    debug!("QueryQueue reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.battle.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_turn_preparation(&mut self) -> Result<(ActorId, BattleSnapshot)> {
        let owner = self.battle.peek_next_owner().map_err(|e| {
            if e == CarouselError::NoSchedulableActor {
                debug!(turn = self.battle.turn(), "battle over, no schedulable actor");
            } else {
                log_failure("turn preparation", &e);
            }
            RuntimeError::from(e)
        })?;

        self.publish(BattleEvent::TurnStarted {
            owner,
            turn: self.battle.turn(),
        });

        Ok((owner, self.battle.snapshot()))
    }

    fn handle_turn_completion(
        &mut self,
        owner: ActorId,
        outcome: TurnOutcome,
    ) -> Result<TurnSummary> {
        let expected = self.battle.peek_next_owner()?;
        if expected != owner {
            let e = RuntimeError::OwnerMismatch {
                expected,
                provided: owner,
            };
            log_failure("turn completion", &e);
            return Err(e);
        }

        let summary = self.battle.complete_turn(outcome).map_err(|e| {
            log_failure("turn completion", &e);
            RuntimeError::from(e)
        })?;

        self.publish(BattleEvent::TurnCompleted {
            owner: summary.owner,
            rank: summary.rank,
            refill: summary.refill,
        });
        self.publish(BattleEvent::QueueRefreshed {
            entries: self.battle.queue(),
        });

        Ok(summary)
    }

    fn publish(&self, event: BattleEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("no battle event subscribers");
        }
    }
}

/// Logs a failed command at a level matching its severity.
fn log_failure<E: BattleError>(stage: &'static str, e: &E) {
    let severity = e.severity();
    if severity.is_internal() {
        error!(stage, code = e.error_code(), severity = severity.as_str(), "{e}");
    } else if severity.is_recoverable() {
        debug!(stage, code = e.error_code(), severity = severity.as_str(), "{e}");
    } else {
        warn!(stage, code = e.error_code(), severity = severity.as_str(), "{e}");
    }
}
