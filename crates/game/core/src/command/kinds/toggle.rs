use crate::command::{CommandError, CommandTransition};
use crate::dice::DieId;
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::GameState;

/// Flips a die between staged and unstaged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleDieCommand {
    pub die: DieId,
}

impl ToggleDieCommand {
    pub fn new(die: DieId) -> Self {
        Self { die }
    }
}

impl CommandTransition for ToggleDieCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_toggle(self.die)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let die = state
            .die_mut(self.die)
            .ok_or(CommandError::UnknownDie { die: self.die })?;
        let staged = die.toggle();
        state.message.clear();

        events.push(GameEvent::DieToggled {
            die: self.die,
            staged,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::kinds::test_support::{Scripted, state_with};
    use crate::config::GameConfig;
    use crate::dice::DieStatus;

    #[test]
    fn toggling_twice_restores_the_die() {
        let config = GameConfig::default();
        let rng = Scripted::new(&[1]);
        let env = CommandEnv::new(&config, &rng);
        let mut state = state_with(&config, &[(1, DieStatus::Active)]);
        state.message = "stale".into();
        let mut events = Vec::new();

        ToggleDieCommand::new(DieId(1))
            .apply(&mut state, &env, &mut events)
            .unwrap();
        assert!(state.dice[0].is_staged());
        assert!(state.message.is_empty());

        ToggleDieCommand::new(DieId(1))
            .apply(&mut state, &env, &mut events)
            .unwrap();
        assert!(!state.dice[0].is_staged());
        assert_eq!(
            events,
            vec![
                GameEvent::DieToggled {
                    die: DieId(1),
                    staged: true
                },
                GameEvent::DieToggled {
                    die: DieId(1),
                    staged: false
                },
            ]
        );
    }
}
