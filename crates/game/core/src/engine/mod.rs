//! Command execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! command runs against a private copy of the state; the copy replaces the
//! caller's state only if the command is accepted. A rejected command leaves
//! scores and dice untouched, updates `message`, and yields a single `ERROR`
//! event.

mod errors;
mod transition;

pub use errors::{Rejection, TransitionPhase, TransitionPhaseError};

use crate::command::Command;
use crate::config::GameConfig;
use crate::env::{CommandEnv, RngOracle};
use crate::error::GameError;
use crate::event::GameEvent;
use crate::state::GameState;

/// Complete outcome of command execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Events in emission order.
    pub events: Vec<GameEvent>,

    /// Set when the command was rejected; `events` then holds the matching `ERROR`.
    pub rejection: Option<Rejection>,
}

impl ExecutionOutcome {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Game engine that applies commands to a borrowed state.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes a command. Never fails: rejections are reported in the outcome.
    ///
    /// The nonce advances only for accepted commands that emitted events, so
    /// no-ops do not shift later rolls.
    pub fn execute(&mut self, env: CommandEnv<'_>, command: &Command) -> ExecutionOutcome {
        let mut working = self.state.clone();
        let mut events = Vec::new();

        match transition::execute_transition(command, &mut working, &env, &mut events) {
            Ok(()) => {
                if !events.is_empty() {
                    working.nonce = working.nonce.wrapping_add(1);
                }
                *self.state = working;
                ExecutionOutcome {
                    events,
                    rejection: None,
                }
            }
            Err(rejection) => {
                let message = rejection.error.to_string();
                self.state.message = message.clone();
                ExecutionOutcome {
                    events: vec![GameEvent::Error {
                        code: rejection.error_code().to_string(),
                        message,
                    }],
                    rejection: Some(rejection),
                }
            }
        }
    }
}

/// Pure form of [`GameEngine::execute`]: returns the next state instead of
/// mutating one.
pub fn reduce(
    state: &GameState,
    command: &Command,
    config: &GameConfig,
    rng: &dyn RngOracle,
) -> (GameState, ExecutionOutcome) {
    let mut next = state.clone();
    let outcome = GameEngine::new(&mut next).execute(CommandEnv::new(config, rng), command);
    (next, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandError;
    use crate::env::PcgRng;

    #[test]
    fn rejection_keeps_state_and_reports_error() {
        let config = GameConfig::default();
        let mut state = GameState::new_game(&config, &PcgRng, 9);
        let before = state.clone();

        let (next, outcome) = reduce(&state, &Command::bank(), &config, &PcgRng);

        assert_eq!(
            outcome.rejection,
            Some(TransitionPhaseError::new(
                TransitionPhase::PreValidate,
                CommandError::NothingSelected
            ))
        );
        assert_eq!(
            outcome.events,
            vec![GameEvent::Error {
                code: "NOTHING_SELECTED".into(),
                message: "nothing selected".into(),
            }]
        );
        assert_eq!(next.message, "nothing selected");
        assert_eq!(next.dice, before.dice);
        assert_eq!(next.nonce, before.nonce);

        state.message = "nothing selected".into();
        assert_eq!(next, state);
    }

    #[test]
    fn accepted_commands_advance_the_nonce() {
        let config = GameConfig::default();
        let mut state = GameState::new_game(&config, &PcgRng, 9);

        let outcome = GameEngine::new(&mut state).execute(
            CommandEnv::new(&config, &PcgRng),
            &Command::roll(),
        );

        assert!(outcome.is_accepted());
        assert_eq!(state.nonce, 1);
    }

    #[test]
    fn silent_no_op_keeps_the_nonce() {
        let config = GameConfig::default();
        let state = GameState::new_game(&config, &PcgRng, 9);

        let (next, outcome) = reduce(&state, &Command::select_upgrade(0), &config, &PcgRng);

        assert!(outcome.is_accepted());
        assert!(outcome.events.is_empty());
        assert_eq!(next, state);
    }
}
