//! Synchronous engine dispatcher.
//!
//! [`Dispatcher`] owns one game: its state, configuration, RNG oracle and
//! event bus. It runs each command through [`GameEngine`] and publishes the
//! resulting events before returning. It never sleeps; `DELAYED_ACTION`
//! events are left to whoever listens on the bus.

use sparkle_core::{
    Command, CommandEnv, ExecutionOutcome, GameConfig, GameEngine, GameError, GameState,
    RngOracle,
};
use tracing::{debug, warn};

use crate::events::EventBus;

pub struct Dispatcher {
    state: GameState,
    config: GameConfig,
    rng: Box<dyn RngOracle>,
    bus: EventBus,
}

impl Dispatcher {
    /// Starts a new game from `seed`.
    pub fn new(config: GameConfig, rng: Box<dyn RngOracle>, seed: u64, bus: EventBus) -> Self {
        let state = GameState::new_game(&config, rng.as_ref(), seed);
        Self::from_state(state, config, rng, bus)
    }

    /// Resumes a game, e.g. one rehydrated from storage.
    pub fn from_state(
        state: GameState,
        config: GameConfig,
        rng: Box<dyn RngOracle>,
        bus: EventBus,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            bus,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Executes `command` against the current state and publishes its events.
    pub fn dispatch(&mut self, command: &Command) -> ExecutionOutcome {
        debug!(
            command = command.name(),
            nonce = self.state.nonce,
            turn = self.state.turn_number,
            "dispatching command"
        );

        let env = CommandEnv::new(&self.config, self.rng.as_ref());
        let outcome = GameEngine::new(&mut self.state).execute(env, command);

        match &outcome.rejection {
            None => debug!(
                command = command.name(),
                events = outcome.events.len(),
                banked = self.state.banked_score,
                total = self.state.total_score,
                "command accepted"
            ),
            Some(rejection) => warn!(
                command = command.name(),
                code = rejection.error_code(),
                phase = rejection.phase.as_str(),
                "command rejected: {}",
                rejection.error
            ),
        }

        self.bus.publish_all(&outcome.events);
        outcome
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
