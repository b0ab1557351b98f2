//! Command transition dispatch.

use crate::command::{Command, CommandError, CommandTransition};
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

use super::errors::{Rejection, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and collect events
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &CommandEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), TransitionPhaseError<CommandError>>
where
    T: CommandTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env, events)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))
}

/// Routes a command to its transition. The match is exhaustive, so a new
/// command variant cannot be left unhandled.
pub(super) fn execute_transition(
    command: &Command,
    state: &mut GameState,
    env: &CommandEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), Rejection> {
    match command {
        Command::ToggleDie(transition) => drive_transition(transition, state, env, events),
        Command::Roll(transition) => drive_transition(transition, state, env, events),
        Command::ReRoll(transition) => drive_transition(transition, state, env, events),
        Command::Bank(transition) => drive_transition(transition, state, env, events),
        Command::EndTurn(transition) => drive_transition(transition, state, env, events),
        Command::Reset(transition) => drive_transition(transition, state, env, events),
        Command::SelectUpgrade(transition) => drive_transition(transition, state, env, events),
        Command::AddExtraDie(transition) => drive_transition(transition, state, env, events),
        Command::DiscardUnscored(transition) => drive_transition(transition, state, env, events),
    }
}
