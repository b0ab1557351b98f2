use crate::command::{CommandError, CommandTransition};
use crate::env::CommandEnv;
use crate::event::GameEvent;
use crate::state::{GameState, UpgradeOffer};

/// Ends the current turn, either by cashing in the banked score or by
/// resolving a sparkle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnCommand {
    /// Set on the follow-up scheduled after a sparkle.
    pub bust: bool,
}

impl EndTurnCommand {
    pub fn new(bust: bool) -> Self {
        Self { bust }
    }
}

impl CommandTransition for EndTurnCommand {
    fn pre_validate(&self, state: &GameState, _env: &CommandEnv<'_>) -> Result<(), CommandError> {
        state.check_end_turn(self.bust)
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &CommandEnv<'_>,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        let config = env.config();
        let busted = state.last_roll_sparkled;
        let ended_turn = state.turn_number;

        if busted {
            state.game_over = state.total_score < state.threshold;
        } else {
            state.total_score = state.total_score.saturating_add(state.banked_score);
        }

        state.banked_score = 0;
        state.last_roll_sparkled = false;
        state.awaiting_bank = false;

        if state.game_over {
            state.message = "Game over".to_string();
            events.push(GameEvent::TurnEnded {
                turn_number: ended_turn,
                total_score: state.total_score,
                game_over: true,
                busted,
            });
            return Ok(());
        }

        state.turn_number = ended_turn.saturating_add(1);
        state.threshold = config.threshold.threshold(state.turn_number);
        state.roll_fresh_pool(env.rng());
        state.pool_rolled = false;
        state.message = if busted {
            "Sparkled, score kept".to_string()
        } else {
            format!("Turn {ended_turn} complete")
        };

        events.push(GameEvent::TurnEnded {
            turn_number: ended_turn,
            total_score: state.total_score,
            game_over: false,
            busted,
        });

        if config.offers_upgrade_after(ended_turn) {
            let positions: Vec<u8> = state.dice.iter().map(|die| die.position).collect();
            let offer = UpgradeOffer::draw(
                config,
                env.rng(),
                state.game_seed,
                state.nonce,
                &positions,
            );
            state.upgrade_offer = Some(offer.clone());
            events.push(GameEvent::UpgradeOffered { offer });
        }

        Ok(())
    }
}
