//! High-level runtime orchestrator.
//!
//! The runtime owns the engine worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a game.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sparkle_core::{GameConfig, GameState, PcgRng, RngOracle, RuleBook};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::dispatcher::Dispatcher;
use crate::events::EventBus;
use crate::workers::{EngineWorker, WorkerCommand};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed for a new game. Ignored when an initial state is supplied.
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Sleep out `DELAYED_ACTION` events and resubmit their command (default: true)
    pub honor_delayed_actions: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
            honor_delayed_actions: true,
        }
    }
}

/// Main runtime that hosts one game.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime with a fresh game and the default RNG.
    pub async fn start(config: RuntimeConfig) -> Result<Runtime> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Delayed actions still pending are dropped.
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone if every other handle was dropped.
        if self.handle.shutdown_worker().await.is_err() {
            tracing::debug!("engine worker already stopped");
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    rules: Option<RuleBook>,
    rng: Option<Box<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            rules: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the rules configuration only.
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Resume from an existing state instead of starting a new game.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Play with this rule book instead of the standard one, e.g. one loaded
    /// from content files. Also applies to a resumed state.
    pub fn rules(mut self, rules: RuleBook) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Replace the default [`PcgRng`] oracle.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn honor_delayed_actions(mut self, honor: bool) -> Self {
        self.config.honor_delayed_actions = honor;
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        if self.config.event_buffer_size == 0 {
            return Err(RuntimeError::ZeroBufferSize {
                name: "event_buffer_size",
            });
        }
        if self.config.command_buffer_size == 0 {
            return Err(RuntimeError::ZeroBufferSize {
                name: "command_buffer_size",
            });
        }

        let rng = self.rng.unwrap_or_else(|| Box::new(PcgRng));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut state = match self.state {
            Some(state) => state,
            None => GameState::new_game(&self.config.game_config, rng.as_ref(), self.config.seed),
        };
        if let Some(rules) = self.rules {
            let enabled = rules.iter().filter(|rule| rule.enabled).count();
            tracing::debug!(enabled, "using custom rule book");
            state = state.with_rules(rules);
        }
        let dispatcher =
            Dispatcher::from_state(state, self.config.game_config, rng, event_bus.clone());

        let (command_tx, command_rx) =
            mpsc::channel::<WorkerCommand>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus);

        let worker = EngineWorker::new(
            dispatcher,
            command_rx,
            handle.downgrade_sender(),
            self.config.honor_delayed_actions,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
