use crate::command::{CommandError, CommandTransition};
use crate::env::{CommandEnv, compute_seed, context};
use crate::event::GameEvent;
use crate::state::GameState;

/// Starts over: fresh pool, zero scores, turn 1, counters cleared.
///
/// The new game seed is derived from the old one, and die ids keep counting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetCommand;

impl CommandTransition for ResetCommand {
    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let seed = compute_seed(state.game_seed, state.nonce, 0, context::RESET);
        let mut next = state.restart(env.config(), env.rng(), seed);
        // nonce stays monotonic for the engine's lifetime
        next.nonce = state.nonce;
        *state = next;

        events.push(GameEvent::GameReset);
        Ok(())
    }
}
