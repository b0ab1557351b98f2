use crate::command::effects::{bank_staged, finish_roll, roll_dice};
use crate::command::{CommandError, CommandTransition};
use crate::dice::DieId;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Rolls every active die.
///
/// A fully scoring staged selection is banked first. If that bank was a
/// landslide, the fresh pool it rolled is the roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollCommand;

impl CommandTransition for RollCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_roll()
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        if state.has_staged() {
            let landslides = state.landslides;
            bank_staged(state, env, events)?;
            if state.landslides != landslides {
                return Ok(());
            }
        }

        let rolled: Vec<DieId> = state.active_dice().map(|die| die.id).collect();
        roll_dice(state, env, &rolled);
        finish_roll(state, env, rolled, events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::command::kinds::test_support::{Scripted, faces, state_with};
    use crate::config::GameConfig;
    use crate::dice::DieStatus::{Active as A, Banked as B, Staged as S};
    use crate::dice::{Upgrade, UpgradeKind};

    #[test]
    fn rolls_only_unbanked_dice() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[5]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, B), (2, A), (3, A)]);
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(faces(&state), vec![1, 5, 5]);
        assert!(state.dice[0].is_banked());
        assert!(state.awaiting_bank);
        assert_eq!(
            events,
            vec![GameEvent::DiceRolled {
                dice: vec![DieId(2), DieId(3)],
                auto_rerolled: vec![],
                busted: false,
            }]
        );
    }

    #[test]
    fn banks_a_staged_selection_before_rolling() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(5, S), (2, A)]);
        state.awaiting_bank = true;
        let mut events = Vec::new();

        RollCommand.pre_validate(&state, &env).unwrap();
        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(state.banked_score, 50);
        assert!(state.dice[0].is_banked());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameEvent::DiceBanked { score: 50, .. }));
        assert!(matches!(events[1], GameEvent::DiceRolled { .. }));
    }

    #[test]
    fn sparkle_schedules_a_bust_end_turn() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[2, 3]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, A), (1, A)]);
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert!(state.last_roll_sparkled);
        assert_eq!(state.message, "Sparkle!");
        assert_eq!(
            events.last(),
            Some(&GameEvent::DelayedAction {
                command: Command::end_turn(true),
                delay_ms: config.bust_delay_ms,
            })
        );
    }

    #[test]
    fn hot_dice_bank_replaces_the_roll() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, S), (5, S)]);
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        let rolled = events
            .iter()
            .filter(|event| matches!(event, GameEvent::DiceRolled { .. }))
            .count();
        assert_eq!(rolled, 1);
        assert_eq!(state.landslides, 1);
        assert!(state.dice.iter().all(|die| !die.is_banked()));
    }

    fn auto_reroll_uses(state: &GameState, index: usize) -> Option<u32> {
        state.dice[index]
            .upgrades
            .iter()
            .find(|upgrade| upgrade.kind == UpgradeKind::AutoReroll)
            .and_then(|upgrade| upgrade.remaining_uses)
    }

    #[test]
    fn auto_reroll_rescues_a_sparkle() {
        let config = GameConfig::default();
        // the roll shows 2 and 3, the rescue shows 1
        let rng = Scripted::new(&[2, 3, 1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, A), (1, A)]);
        state.dice[1]
            .attach(Upgrade::new(UpgradeKind::AutoReroll))
            .unwrap();
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(faces(&state), vec![2, 1]);
        assert_eq!(auto_reroll_uses(&state, 1), Some(2));
        assert!(!state.last_roll_sparkled);
        assert_eq!(state.message, "");
        assert_eq!(
            events,
            vec![GameEvent::DiceRolled {
                dice: vec![DieId(1), DieId(2)],
                auto_rerolled: vec![DieId(2)],
                busted: false,
            }]
        );
    }

    #[test]
    fn auto_reroll_waits_for_a_sparkle() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1, 3]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A), (2, A)]);
        state.dice[1]
            .attach(Upgrade::new(UpgradeKind::AutoReroll))
            .unwrap();
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(faces(&state), vec![1, 3]);
        assert_eq!(auto_reroll_uses(&state, 1), Some(3));
        assert!(matches!(
            &events[0],
            GameEvent::DiceRolled { auto_rerolled, busted: false, .. } if auto_rerolled.is_empty()
        ));
    }

    #[test]
    fn failed_auto_reroll_still_spends_a_use() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[2, 3, 4]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, A), (1, A)]);
        state.dice[1]
            .attach(Upgrade::with_uses(UpgradeKind::AutoReroll, 1))
            .unwrap();
        let mut events = Vec::new();

        RollCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(faces(&state), vec![2, 4]);
        assert_eq!(auto_reroll_uses(&state, 1), Some(0));
        assert!(state.last_roll_sparkled);
        assert!(matches!(
            &events[0],
            GameEvent::DiceRolled { auto_rerolled, busted: true, .. } if auto_rerolled == &vec![DieId(2)]
        ));
        assert!(matches!(events.last(), Some(GameEvent::DelayedAction { .. })));

        // spent upgrades stay quiet on the next sparkle
        state.last_roll_sparkled = false;
        let mut events = Vec::new();
        RollCommand.apply(&mut state, &env, &mut events).unwrap();
        assert!(matches!(
            &events[0],
            GameEvent::DiceRolled { auto_rerolled, busted: true, .. } if auto_rerolled.is_empty()
        ));
    }
}
