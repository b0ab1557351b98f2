use crate::command::{CommandError, CommandTransition};
use crate::dice::Upgrade;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::{GameState, UpgradeOption};

/// Takes one option from the pending upgrade offer.
///
/// Without a pending offer this is a no-op that emits nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectUpgradeCommand {
    /// Index into the offer's options.
    pub option: usize,
}

impl SelectUpgradeCommand {
    pub fn new(option: usize) -> Self {
        Self { option }
    }
}

impl CommandTransition for SelectUpgradeCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        let Some(offer) = state.upgrade_offer.as_ref() else {
            return Ok(());
        };
        let option = offer
            .options
            .get(self.option)
            .ok_or(CommandError::NoSuchOption { index: self.option })?;

        if let UpgradeOption::Attach(_) = option {
            let die = state
                .die_at(offer.position)
                .ok_or(CommandError::UpgradeSlotMissing {
                    position: offer.position,
                })?;
            if die.upgrades.is_full() {
                return Err(CommandError::UpgradeSlotFull {
                    position: offer.position,
                });
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let Some(offer) = state.upgrade_offer.take() else {
            return Ok(());
        };
        let option = *offer
            .options
            .get(self.option)
            .ok_or(CommandError::NoSuchOption { index: self.option })?;

        let position = match option {
            UpgradeOption::Attach(kind) => {
                let die = state
                    .die_at_mut(offer.position)
                    .ok_or(CommandError::UpgradeSlotMissing {
                        position: offer.position,
                    })?;
                die.attach(Upgrade::new(kind))
                    .map_err(|_| CommandError::UpgradeSlotFull {
                        position: offer.position,
                    })?;
                Some(offer.position)
            }
            UpgradeOption::ExtraRerolls(amount) => {
                state.rerolls_remaining = state.rerolls_remaining.saturating_add(amount);
                None
            }
            UpgradeOption::ExtraDice(amount) => {
                state.extra_dice = state.extra_dice.saturating_add(amount);
                None
            }
        };

        events.push(GameEvent::UpgradeSelected { option, position });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::kinds::test_support::{Scripted, state_with};
    use crate::config::GameConfig;
    use crate::dice::DieStatus::Active as A;
    use crate::dice::UpgradeKind;
    use crate::state::UpgradeOffer;

    fn offer(options: &[UpgradeOption], position: u8) -> UpgradeOffer {
        UpgradeOffer {
            options: options.iter().copied().collect(),
            position,
        }
    }

    #[test]
    fn attaches_to_the_offered_slot() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A), (3, A)]);
        state.upgrade_offer = Some(offer(
            &[
                UpgradeOption::ExtraRerolls(2),
                UpgradeOption::Attach(UpgradeKind::SetBonus),
            ],
            2,
        ));
        let mut events = Vec::new();

        let command = SelectUpgradeCommand::new(1);
        command.pre_validate(&state, &env).unwrap();
        command.apply(&mut state, &env, &mut events).unwrap();

        assert!(state.upgrade_offer.is_none());
        assert!(state.dice[1].has_active(UpgradeKind::SetBonus));
        assert_eq!(
            events,
            vec![GameEvent::UpgradeSelected {
                option: UpgradeOption::Attach(UpgradeKind::SetBonus),
                position: Some(2),
            }]
        );
    }

    #[test]
    fn resource_options_grow_budgets() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A)]);
        state.rerolls_remaining = 1;
        state.upgrade_offer = Some(offer(&[UpgradeOption::ExtraRerolls(2)], 1));
        let mut events = Vec::new();

        SelectUpgradeCommand::new(0)
            .apply(&mut state, &env, &mut events)
            .unwrap();

        assert_eq!(state.rerolls_remaining, 3);
    }

    #[test]
    fn no_offer_is_a_silent_no_op() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A)]);
        let before = state.clone();
        let mut events = Vec::new();

        let command = SelectUpgradeCommand::new(0);
        command.pre_validate(&state, &env).unwrap();
        command.apply(&mut state, &env, &mut events).unwrap();

        assert_eq!(state, before);
        assert!(events.is_empty());
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(2, A)]);
        state.upgrade_offer = Some(offer(&[UpgradeOption::ExtraDice(1)], 1));

        assert_eq!(
            SelectUpgradeCommand::new(4).pre_validate(&state, &env),
            Err(CommandError::NoSuchOption { index: 4 })
        );
    }
}
