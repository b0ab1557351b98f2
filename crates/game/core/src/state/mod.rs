//! Authoritative game state representation.
//!
//! [`GameState`] is created once per game and afterwards only ever replaced
//! wholesale by the engine. Derived queries live in [`selectors`].
mod offer;
pub mod selectors;

pub use offer::{UpgradeOffer, UpgradeOption};

use crate::config::GameConfig;
use crate::dice::{DiceFactory, Die, DieId, DieIdAllocator};
use crate::env::{RngOracle, context};
use crate::scoring::RuleBook;

/// Canonical snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed for every random draw in this game. Set at creation, never modified.
    pub game_seed: u64,

    /// Number of commands that produced events; mixed into every roll seed.
    pub nonce: u64,

    /// Die id allocator, carried across resets so ids never repeat.
    pub(crate) die_ids: DieIdAllocator,

    /// Dice in slot order.
    pub dice: Vec<Die>,
    /// Points locked in during the current turn.
    pub banked_score: u64,
    /// Points from all completed turns.
    pub total_score: u64,
    /// Score required to end the current turn.
    pub threshold: u64,
    /// 1-based turn counter.
    pub turn_number: u32,
    pub game_over: bool,
    /// Last human-readable status line. Derived, not game data.
    pub message: String,

    pub scoring_rules: RuleBook,

    pub rerolls_remaining: u32,
    pub extra_dice: u32,

    /// Cleared whenever a fresh pool is dealt at the start of a turn. Dice
    /// can only be chosen once the pool has been rolled.
    pub pool_rolled: bool,
    /// Set when the most recent roll left no scoring dice among the active pool.
    pub last_roll_sparkled: bool,
    /// Set by every roll and cleared by a bank: the player has to keep
    /// something before rolling again.
    pub awaiting_bank: bool,

    /// Hot-dice events this game.
    pub landslides: u32,
    /// Permanent multiplier in percent; 100 is neutral.
    pub score_multiplier_percent: u32,

    pub upgrade_offer: Option<UpgradeOffer>,
}

impl GameState {
    /// Creates a new game with a freshly rolled starting pool.
    pub fn new_game(config: &GameConfig, rng: &dyn RngOracle, game_seed: u64) -> Self {
        Self::with_allocator(config, rng, game_seed, DieIdAllocator::new())
    }

    fn with_allocator(
        config: &GameConfig,
        rng: &dyn RngOracle,
        game_seed: u64,
        mut die_ids: DieIdAllocator,
    ) -> Self {
        let factory = DiceFactory::new(rng, game_seed, 0);
        let count = config.starting_dice.min(config.pool_limit());
        let dice = factory.starting_pool(&mut die_ids, count, context::ROLL);

        Self {
            game_seed,
            nonce: 0,
            die_ids,
            dice,
            banked_score: 0,
            total_score: 0,
            threshold: config.threshold.threshold(1),
            turn_number: 1,
            game_over: false,
            message: String::new(),
            scoring_rules: RuleBook::standard(),
            rerolls_remaining: config.starting_rerolls,
            extra_dice: config.starting_extra_dice,
            pool_rolled: false,
            last_roll_sparkled: false,
            awaiting_bank: false,
            landslides: 0,
            score_multiplier_percent: 100,
            upgrade_offer: None,
        }
    }

    /// A fresh game that keeps this game's rule definitions (with counters
    /// zeroed) and continues its die id sequence.
    pub fn restart(&self, config: &GameConfig, rng: &dyn RngOracle, game_seed: u64) -> Self {
        let mut next = Self::with_allocator(config, rng, game_seed, self.die_ids.clone());
        next.scoring_rules = self.scoring_rules.clone();
        next.scoring_rules.reset_activations();
        next
    }

    /// Replaces the rule book, e.g. with one loaded from content files.
    pub fn with_rules(mut self, rules: RuleBook) -> Self {
        self.scoring_rules = rules;
        self
    }

    /// Id the next created die will receive.
    pub fn next_die_id(&self) -> DieId {
        self.die_ids.peek()
    }

    pub fn die(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|die| die.id == id)
    }

    pub fn die_mut(&mut self, id: DieId) -> Option<&mut Die> {
        self.dice.iter_mut().find(|die| die.id == id)
    }

    pub fn die_at(&self, position: u8) -> Option<&Die> {
        self.dice.iter().find(|die| die.position == position)
    }

    pub fn die_at_mut(&mut self, position: u8) -> Option<&mut Die> {
        self.dice.iter_mut().find(|die| die.position == position)
    }

    /// Lowest slot position in `1..=limit` without a die.
    pub fn first_free_position(&self, limit: u8) -> Option<u8> {
        (1..=limit).find(|&position| self.die_at(position).is_none())
    }

    /// Rolls a brand-new pool into the current slots.
    pub(crate) fn roll_fresh_pool(&mut self, rng: &dyn RngOracle) -> Vec<DieId> {
        let factory = DiceFactory::new(rng, self.game_seed, self.nonce);
        self.dice = factory.fresh_pool(&mut self.die_ids, &self.dice, context::ROLL);
        self.dice.iter().map(|die| die.id).collect()
    }

    /// Adds a freshly rolled die at `position`, keeping slot order.
    pub(crate) fn add_die(&mut self, rng: &dyn RngOracle, position: u8) -> DieId {
        let factory = DiceFactory::new(rng, self.game_seed, self.nonce);
        let die = factory.fresh_die(&mut self.die_ids, position, Default::default(), context::ROLL);
        let id = die.id;
        let index = self
            .dice
            .iter()
            .position(|existing| existing.position > position)
            .unwrap_or(self.dice.len());
        self.dice.insert(index, die);
        id
    }
}
