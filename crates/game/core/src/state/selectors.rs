//! Pure derived queries over [`GameState`].
//!
//! The `check_*` functions are the single source of truth for command
//! legality: handlers run them in `pre_validate`, and the `can_*` helpers are
//! just `check_*(..).is_ok()`, so a UI asking "may I end the turn?" gets the
//! exact answer the handler would give.

use super::GameState;
use crate::command::CommandError;
use crate::config::GameConfig;
use crate::dice::{Die, DieId};
use crate::scoring::{GlobalModifiers, Scoring, apply_upgrades, evaluate};

impl GameState {
    /// Dice that are not banked (staged dice included).
    pub fn active_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter().filter(|die| die.is_active())
    }

    pub fn banked_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter().filter(|die| die.is_banked())
    }

    pub fn staged_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter().filter(|die| die.is_staged())
    }

    /// Active dice a RE_ROLL may touch, in slot order.
    pub fn rerollable_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice
            .iter()
            .filter(|die| die.is_active() && !die.is_staged())
    }

    pub fn has_staged(&self) -> bool {
        self.staged_dice().next().is_some()
    }

    pub fn staged_ids(&self) -> Vec<DieId> {
        self.staged_dice().map(|die| die.id).collect()
    }

    pub fn global_modifiers(&self) -> GlobalModifiers {
        GlobalModifiers {
            multiplier_percent: self.score_multiplier_percent,
        }
    }

    /// Raw evaluation of the staged selection.
    pub fn staged_scoring(&self) -> Scoring {
        evaluate(self.staged_dice(), &self.scoring_rules)
    }

    /// Evaluation of every unbanked die; a zero score here is a sparkle.
    pub fn active_scoring(&self) -> Scoring {
        evaluate(self.active_dice(), &self.scoring_rules)
    }

    /// Preview of what banking the staged selection would add, upgrades and
    /// the landslide multiplier included. Never spends upgrade uses.
    pub fn staged_score(&self) -> u64 {
        let scoring = self.staged_scoring();
        if scoring.is_bust() {
            return 0;
        }
        apply_upgrades(&scoring.groups, &self.dice, self.global_modifiers()).total
    }

    /// True iff every staged die belongs to a scoring group. Vacuously true
    /// with nothing staged.
    pub fn all_staged_dice_score(&self) -> bool {
        let scoring = self.staged_scoring();
        self.staged_dice().all(|die| scoring.scores(die.id))
    }

    /// Total the player would hold if the turn ended now.
    pub fn projected_total(&self) -> u64 {
        self.total_score
            .saturating_add(self.banked_score)
            .saturating_add(self.staged_score())
    }

    pub fn is_busted(&self) -> bool {
        self.last_roll_sparkled
    }

    // ===== legality =====

    fn check_not_over(&self) -> Result<(), CommandError> {
        if self.game_over {
            Err(CommandError::GameOver)
        } else {
            Ok(())
        }
    }

    /// The pool dealt at turn start has to be rolled before dice are chosen.
    pub fn check_pool_rolled(&self) -> Result<(), CommandError> {
        if self.pool_rolled {
            Ok(())
        } else {
            Err(CommandError::NotRolled)
        }
    }

    /// Staged selection is non-empty, scores, and carries no dead weight.
    pub fn check_selection(&self) -> Result<(), CommandError> {
        if !self.has_staged() {
            return Err(CommandError::NothingSelected);
        }
        let scoring = self.staged_scoring();
        if scoring.is_bust() || !self.staged_dice().all(|die| scoring.scores(die.id)) {
            return Err(CommandError::SelectionDoesNotScore);
        }
        Ok(())
    }

    pub fn check_toggle(&self, die: DieId) -> Result<(), CommandError> {
        self.check_not_over()?;
        self.check_pool_rolled()?;
        let target = self.die(die).ok_or(CommandError::UnknownDie { die })?;
        if target.is_banked() {
            return Err(CommandError::DieBanked { die });
        }
        Ok(())
    }

    pub fn check_roll(&self) -> Result<(), CommandError> {
        self.check_not_over()?;
        if self.last_roll_sparkled {
            return Err(CommandError::Sparkled);
        }
        if self.has_staged() {
            return self.check_selection();
        }
        if self.awaiting_bank {
            return Err(CommandError::NothingSelected);
        }
        Ok(())
    }

    pub fn check_re_roll(&self) -> Result<(), CommandError> {
        self.check_not_over()?;
        self.check_pool_rolled()?;
        if self.rerolls_remaining == 0 {
            return Err(CommandError::NoRerollResource);
        }
        if self.rerollable_dice().next().is_none() {
            return Err(CommandError::NoRerollableDice);
        }
        Ok(())
    }

    pub fn check_bank(&self) -> Result<(), CommandError> {
        self.check_not_over()?;
        self.check_selection()?;
        self.check_pool_rolled()
    }

    /// `bust` is the flag carried by the END_TURN command. A sparkled state is
    /// always resolved as a bust, whatever the flag says.
    pub fn check_end_turn(&self, bust: bool) -> Result<(), CommandError> {
        self.check_not_over()?;
        if self.last_roll_sparkled {
            return Ok(());
        }
        if bust {
            return Err(CommandError::NoSparkleToResolve);
        }
        if self.has_staged() {
            return Err(CommandError::SelectionNotBanked);
        }
        if self.banked_score == 0 {
            return Err(CommandError::MustBankBeforeEndingTurn);
        }
        let projected = self.projected_total();
        if projected < self.threshold {
            return Err(CommandError::ThresholdNotMet {
                projected,
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    pub fn check_add_extra_die(&self, config: &GameConfig) -> Result<(), CommandError> {
        self.check_not_over()?;
        if self.extra_dice == 0 {
            return Err(CommandError::NoExtraDice);
        }
        if self.first_free_position(config.pool_limit()).is_none() {
            return Err(CommandError::BoardFull);
        }
        Ok(())
    }

    pub fn check_discard_unscored(&self) -> Result<(), CommandError> {
        self.check_not_over()?;
        if !self.last_roll_sparkled {
            return Err(CommandError::OnlyAfterBust);
        }
        if self.banked_dice().next().is_none() {
            return Err(CommandError::NothingToRecycle);
        }
        Ok(())
    }

    pub fn can_roll(&self) -> bool {
        self.check_roll().is_ok()
    }

    pub fn can_re_roll(&self) -> bool {
        self.check_re_roll().is_ok()
    }

    pub fn can_bank(&self) -> bool {
        self.check_bank().is_ok()
    }

    /// Whether a plain END_TURN would be accepted.
    pub fn can_end_turn(&self) -> bool {
        self.check_end_turn(false).is_ok()
    }

    pub fn can_add_extra_die(&self, config: &GameConfig) -> bool {
        self.check_add_extra_die(config).is_ok()
    }

    pub fn can_discard_unscored(&self) -> bool {
        self.check_discard_unscored().is_ok()
    }
}
