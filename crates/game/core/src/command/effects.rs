//! Roll and bank steps shared by several command handlers.

use super::{Command, CommandError};
use crate::dice::{DiceFactory, DieId, UpgradeKind};
use crate::env::{CommandEnv, context};
use crate::event::GameEvent;
use crate::state::GameState;

/// Re-rolls the given dice under the regular roll context.
pub(super) fn roll_dice(state: &mut GameState, env: &CommandEnv<'_>, dice: &[DieId]) {
    let factory = DiceFactory::new(env.rng(), state.game_seed, state.nonce);
    for &id in dice {
        if let Some(die) = state.die_mut(id) {
            factory.reroll(die, context::ROLL);
        }
    }
}

/// Settles a roll: fires auto-rerolls on a sparkle, sets the bust flags, and
/// emits `DICE_ROLLED` (plus `DELAYED_ACTION` on a bust).
///
/// The sparkle check covers every unbanked die, staged ones included.
pub(super) fn finish_roll(
    state: &mut GameState,
    env: &CommandEnv<'_>,
    rolled: Vec<DieId>,
    events: &mut Vec<GameEvent>,
) {
    let mut auto_rerolled = Vec::new();

    if state.active_scoring().is_bust() {
        let factory = DiceFactory::new(env.rng(), state.game_seed, state.nonce);
        for die in state.dice.iter_mut().filter(|die| die.is_active()) {
            let Some(upgrade) = die
                .upgrades
                .iter_mut()
                .find(|upgrade| upgrade.kind == UpgradeKind::AutoReroll && upgrade.is_active())
            else {
                continue;
            };
            upgrade.consume();
            factory.reroll(die, context::AUTO_REROLL);
            auto_rerolled.push(die.id);
        }
    }

    let busted = state.active_scoring().is_bust();
    state.last_roll_sparkled = busted;
    state.pool_rolled = true;
    state.awaiting_bank = true;
    state.message = if busted {
        "Sparkle!".to_string()
    } else {
        String::new()
    };

    events.push(GameEvent::DiceRolled {
        dice: rolled,
        auto_rerolled,
        busted,
    });
    if busted {
        events.push(GameEvent::DelayedAction {
            command: Command::end_turn(true),
            delay_ms: env.config().bust_delay_ms,
        });
    }
}

/// Banks the staged selection.
///
/// Spends one use of each limited upgrade that contributed, marks the dice
/// banked, counts fired rules once, and adds the previewed score. Banking the
/// last active dice is a landslide: the multiplier grows and a fresh pool is
/// rolled in the same slots.
pub(super) fn bank_staged(
    state: &mut GameState,
    env: &CommandEnv<'_>,
    events: &mut Vec<GameEvent>,
) -> Result<(), CommandError> {
    state.check_selection()?;

    let scoring = state.staged_scoring();
    let score = state.staged_score();
    let mut granted_dice = 0u32;

    for die in state.dice.iter_mut().filter(|die| die.is_staged()) {
        for upgrade in die.upgrades.iter_mut() {
            if !upgrade.is_active() || upgrade.kind.requires_banked() {
                continue;
            }
            if upgrade.kind == UpgradeKind::ExtraDieGrant {
                granted_dice += 1;
            }
            if upgrade.kind.consumed_on_bank() {
                upgrade.consume();
            }
        }
        die.bank();
    }

    for &rule in &scoring.fired_rules {
        state.scoring_rules.record_activation(rule);
    }

    state.extra_dice = state.extra_dice.saturating_add(granted_dice);
    state.banked_score = state.banked_score.saturating_add(score);
    state.awaiting_bank = false;
    state.message = format!("Banked {score}");

    let hot_dice = state.active_dice().next().is_none();
    events.push(GameEvent::DiceBanked {
        score,
        hot_dice,
        fired_rules: scoring.fired_rules,
    });

    if hot_dice {
        state.landslides = state.landslides.saturating_add(1);
        state.score_multiplier_percent = state
            .score_multiplier_percent
            .saturating_add(env.config().landslide_bonus_percent);
        let rolled = state.roll_fresh_pool(env.rng());
        finish_roll(state, env, rolled, events);
    }

    Ok(())
}
