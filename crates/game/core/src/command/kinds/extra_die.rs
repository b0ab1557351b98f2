use crate::command::{CommandError, CommandTransition};
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Spends an extra-die resource to put a freshly rolled die in the first free slot.
///
/// If the pool is sparkled and the new die scores, the sparkle is lifted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddExtraDieCommand;

impl CommandTransition for AddExtraDieCommand {
    fn pre_validate(&self, state: &GameState, env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_add_extra_die(env.config())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let position = state
            .first_free_position(env.config().pool_limit())
            .ok_or(CommandError::BoardFull)?;

        state.extra_dice = state.extra_dice.saturating_sub(1);
        let die = state.add_die(env.rng(), position);

        if state.last_roll_sparkled && !state.active_scoring().is_bust() {
            state.last_roll_sparkled = false;
            state.message.clear();
        }

        events.push(GameEvent::ExtraDieAdded { die, position });
        Ok(())
    }
}
