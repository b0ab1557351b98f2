use super::CommandError;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Defines how a concrete command variant mutates game state.
///
/// `pre_validate` sees the state **before** mutation and must be side-effect
/// free. `apply` works on the engine's private copy of the state; if it fails,
/// the copy is discarded, so partial mutations never leak.
pub trait CommandTransition {
    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    /// Applies the command, pushing the events it produces in emission order.
    /// Implementations may assume `pre_validate` has already succeeded.
    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError>;
}
