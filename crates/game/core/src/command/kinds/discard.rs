use crate::command::effects::{finish_roll, roll_dice};
use crate::command::{CommandError, CommandTransition};
use crate::dice::DieId;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Sparkle rescue: throws away the unbanked dice for good and rolls the
/// banked ones again as the new active pool. The banked score is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscardUnscoredCommand;

impl CommandTransition for DiscardUnscoredCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_discard_unscored()
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let discarded: Vec<DieId> = state.active_dice().map(|die| die.id).collect();
        state.dice.retain(|die| die.is_banked());
        if state.dice.is_empty() {
            return Err(CommandError::NothingToRecycle);
        }

        let recycled: Vec<DieId> = state.dice.iter().map(|die| die.id).collect();
        roll_dice(state, env, &recycled);

        events.push(GameEvent::UnscoredDiscarded { discarded });
        finish_roll(state, env, recycled, events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::kinds::test_support::{Scripted, faces, state_with};
    use crate::config::GameConfig;
    use crate::dice::DieStatus::{Active as A, Banked as B};

    #[test]
    fn recycles_banked_dice_into_a_new_pool() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A), (5, B), (3, A), (1, B)]);
        state.last_roll_sparkled = true;
        state.banked_score = 150;
        let mut events = Vec::new();

        DiscardUnscoredCommand
            .apply(&mut state, &env, &mut events)
            .unwrap();

        assert_eq!(faces(&state), vec![1, 1]);
        assert!(state.dice.iter().all(|die| die.is_active() && !die.is_staged()));
        assert_eq!(state.banked_score, 150);
        assert!(!state.last_roll_sparkled);
        assert_eq!(
            events[0],
            GameEvent::UnscoredDiscarded {
                discarded: vec![DieId(1), DieId(3)]
            }
        );
        assert_eq!(
            events[1],
            GameEvent::DiceRolled {
                dice: vec![DieId(2), DieId(4)],
                auto_rerolled: vec![],
                busted: false,
            }
        );
    }
}
