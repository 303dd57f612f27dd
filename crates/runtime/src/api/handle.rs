//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for the
//! two-phase turn protocol and for streaming battle events.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActorId, BattleSnapshot, TurnEntry, TurnOutcome, TurnSummary};

use super::errors::{Result, RuntimeError};
use crate::events::BattleEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Prepare the next turn: determines which actor acts next and returns a
    /// snapshot of the battle for its decision.
    pub async fn prepare_next_turn(&self) -> Result<(ActorId, BattleSnapshot)> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::PrepareNextTurn { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Signal that `owner` finished its turn with `outcome`.
    pub async fn complete_turn(&self, owner: ActorId, outcome: TurnOutcome) -> Result<TurnSummary> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::CompleteTurn {
                owner,
                outcome,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the lookahead queue in dispatch order
    pub async fn query_queue(&self) -> Result<Vec<TurnEntry>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryQueue { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query a read-only snapshot of the battle
    pub async fn query_snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to battle events
    ///
    /// Only events published after this call are received.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }
}
