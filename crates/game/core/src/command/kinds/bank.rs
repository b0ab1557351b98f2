use crate::command::effects::bank_staged;
use crate::command::{CommandError, CommandTransition};
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Locks the staged selection in for the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankCommand;

impl CommandTransition for BankCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_bank()
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        bank_staged(state, env, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::kinds::test_support::{Scripted, state_with};
    use crate::config::GameConfig;
    use crate::dice::DieStatus::{Active as A, Banked as B, Staged as S};
    use crate::dice::{Upgrade, UpgradeKind};
    use crate::scoring::RuleId;

    #[test]
    fn banking_adds_score_and_counts_rules_once() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[2]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, S), (1, S), (5, S), (3, A)]);
        let mut events = Vec::new();

        BankCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(state.banked_score, 250);
        assert_eq!(state.scoring_rules.activation_count(RuleId::SingleOne), 1);
        assert_eq!(state.scoring_rules.activation_count(RuleId::SingleFive), 1);
        assert!(!state.awaiting_bank);
        assert_eq!(
            events,
            vec![GameEvent::DiceBanked {
                score: 250,
                hot_dice: false,
                fired_rules: vec![RuleId::SingleOne, RuleId::SingleFive],
            }]
        );
    }

    #[test]
    fn limited_upgrades_are_spent_once_per_bank() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[2]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, S), (3, A)]);
        state.dice[0]
            .attach(Upgrade::new(UpgradeKind::TenXMultiplier))
            .unwrap();
        state.dice[0]
            .attach(Upgrade::new(UpgradeKind::ExtraDieGrant))
            .unwrap();
        let extra_before = state.extra_dice;
        let mut events = Vec::new();

        BankCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(state.banked_score, 1000);
        assert_eq!(state.dice[0].upgrades[0].remaining_uses, Some(0));
        assert_eq!(state.dice[0].upgrades[1].remaining_uses, Some(0));
        assert_eq!(state.extra_dice, extra_before + 1);
    }

    #[test]
    fn banking_everything_is_a_landslide() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1, 2, 3, 4, 6, 6]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(
            &config,
            &[(1, B), (5, B), (1, S), (1, S), (1, S), (5, S)],
        );
        state.banked_score = 150;
        let mut events = Vec::new();

        BankCommand.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(state.banked_score, 150 + 1050);
        assert_eq!(state.landslides, 1);
        assert_eq!(state.score_multiplier_percent, 110);
        assert_eq!(state.dice.len(), 6);
        assert!(state.dice.iter().all(|die| die.is_active() && !die.is_staged()));
        assert!(state.dice.iter().all(|die| die.id.0 > 6));
        assert!(matches!(
            events[0],
            GameEvent::DiceBanked { hot_dice: true, .. }
        ));
        assert!(matches!(events[1], GameEvent::DiceRolled { busted: false, .. }));
    }

    #[test]
    fn dead_weight_is_rejected() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[2]);
        let env = CommandEnv::new(&config, &rng);
        let state = state_with(&config, &[(1, S), (4, S)]);

        assert_eq!(
            BankCommand.pre_validate(&state, &env),
            Err(CommandError::SelectionDoesNotScore)
        );
    }
}
