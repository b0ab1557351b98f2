use crate::command::effects::{finish_roll, roll_dice};
use crate::command::{CommandError, CommandTransition};
use crate::dice::DieId;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Spends reroll resource to re-roll unstaged active dice.
///
/// One unit per die. With fewer units than candidates, the lowest slots are
/// re-rolled. Staged and banked dice are left alone, and a re-roll may rescue
/// a sparkle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReRollCommand;

impl CommandTransition for ReRollCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_re_roll()
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let budget = usize::try_from(state.rerolls_remaining).unwrap_or(usize::MAX);
        let mut candidates: Vec<(u8, DieId)> = state
            .rerollable_dice()
            .map(|die| (die.position, die.id))
            .collect();
        candidates.sort_unstable();
        let rolled: Vec<DieId> = candidates
            .into_iter()
            .take(budget)
            .map(|(_, id)| id)
            .collect();
        if rolled.is_empty() {
            return Err(CommandError::NoRerollableDice);
        }

        state.rerolls_remaining -= rolled.len() as u32;
        roll_dice(state, env, &rolled);
        finish_roll(state, env, rolled, events);
        Ok(())
    }
}
