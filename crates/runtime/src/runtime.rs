//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the battle.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{Battle, TurnSummary};

use crate::api::{Result, RuntimeError, RuntimeHandle, TurnProvider};
use crate::events::BattleEvent;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates a battle
///
/// Runtime owns the worker and the turn provider.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Option<Box<dyn TurnProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to battle events
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe()
    }

    /// Execute a single turn: peek the owner, let the provider play it, then
    /// complete it.
    pub async fn step(&mut self) -> Result<TurnSummary> {
        let provider = self.provider.as_ref().ok_or(RuntimeError::ProviderNotSet)?;

        let (owner, snapshot) = self.handle.prepare_next_turn().await?;
        let outcome = provider.take_turn(owner, &snapshot).await?;

        self.handle.complete_turn(owner, outcome).await
    }

    /// Run up to `max_turns` turns.
    ///
    /// Stops early, without error, once no actor is left to schedule.
    pub async fn run(&mut self, max_turns: usize) -> Result<Vec<TurnSummary>> {
        let mut summaries = Vec::with_capacity(max_turns);
        for _ in 0..max_turns {
            match self.step().await {
                Ok(summary) => summaries.push(summary),
                Err(e) if e.is_exhausted() => {
                    tracing::info!(turns = summaries.len(), "no schedulable actor left");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summaries)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    battle: Option<Battle>,
    provider: Option<Box<dyn TurnProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            battle: None,
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the battle to run (required)
    ///
    /// The battle is (re)initialised by [`RuntimeBuilder::build`].
    pub fn battle(mut self, battle: Battle) -> Self {
        self.battle = Some(battle);
        self
    }

    /// Set the turn provider (optional, required by [`Runtime::step`])
    pub fn provider(mut self, provider: impl TurnProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let mut battle = self.battle.ok_or(RuntimeError::MissingBattle)?;
        battle.init()?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<BattleEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let sim_worker = SimulationWorker::new(battle, command_rx, event_tx);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider: self.provider,
            sim_worker_handle,
        })
    }
}
