/// Step function deciding the score a player must hold to end a turn.
///
/// `threshold(turn) = base × growth^((turn − 1) / turns_per_tier)`, computed
/// with saturating arithmetic. Turn 1 (and turn 0, which never occurs in
/// play) always yields `base`, and the result never decreases as turns advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThresholdSchedule {
    pub base: u64,
    pub growth: u64,
    pub turns_per_tier: u32,
}

impl ThresholdSchedule {
    pub const DEFAULT_BASE: u64 = 500;
    pub const DEFAULT_GROWTH: u64 = 2;
    pub const DEFAULT_TURNS_PER_TIER: u32 = 3;

    pub const fn new(base: u64, growth: u64, turns_per_tier: u32) -> Self {
        Self {
            base,
            growth,
            turns_per_tier,
        }
    }

    /// Threshold in force during `turn` (1-based).
    pub fn threshold(&self, turn: u32) -> u64 {
        let tier = turn.saturating_sub(1) / self.turns_per_tier.max(1);
        let growth = self.growth.max(1);
        let mut value = self.base;
        for _ in 0..tier {
            value = value.saturating_mul(growth);
            if value == u64::MAX {
                break;
            }
        }
        value
    }
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BASE,
            Self::DEFAULT_GROWTH,
            Self::DEFAULT_TURNS_PER_TIER,
        )
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Pool size after RESET.
    pub starting_dice: u8,
    /// Largest pool ADD_EXTRA_DIE may grow to. Slot positions run `1..=max_dice`.
    pub max_dice: u8,
    /// RE_ROLL budget after RESET.
    pub starting_rerolls: u32,
    /// ADD_EXTRA_DIE budget after RESET.
    pub starting_extra_dice: u32,
    pub threshold: ThresholdSchedule,
    /// An upgrade offer appears after every Nth completed turn. Zero disables offers.
    pub upgrade_offer_interval: u32,
    /// Number of options drawn for each offer.
    pub upgrade_offer_size: usize,
    /// Delay attached to the follow-up END_TURN after a sparkle.
    pub bust_delay_ms: u64,
    /// Permanent score multiplier (in percent) gained per hot-dice event.
    pub landslide_bonus_percent: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum upgrades a single die slot can hold.
    pub const MAX_UPGRADES_PER_DIE: usize = 4;
    /// Upper bound on options in one upgrade offer.
    pub const MAX_OFFER_OPTIONS: usize = 8;
    /// Hard ceiling on pool size regardless of configuration.
    pub const MAX_POOL: u8 = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_DICE: u8 = 6;
    pub const DEFAULT_MAX_DICE: u8 = 8;
    pub const DEFAULT_STARTING_REROLLS: u32 = 3;
    pub const DEFAULT_STARTING_EXTRA_DICE: u32 = 1;
    pub const DEFAULT_UPGRADE_OFFER_INTERVAL: u32 = 3;
    pub const DEFAULT_UPGRADE_OFFER_SIZE: usize = 3;
    pub const DEFAULT_BUST_DELAY_MS: u64 = 1500;
    pub const DEFAULT_LANDSLIDE_BONUS_PERCENT: u32 = 10;

    pub fn new() -> Self {
        Self {
            starting_dice: Self::DEFAULT_STARTING_DICE,
            max_dice: Self::DEFAULT_MAX_DICE,
            starting_rerolls: Self::DEFAULT_STARTING_REROLLS,
            starting_extra_dice: Self::DEFAULT_STARTING_EXTRA_DICE,
            threshold: ThresholdSchedule::default(),
            upgrade_offer_interval: Self::DEFAULT_UPGRADE_OFFER_INTERVAL,
            upgrade_offer_size: Self::DEFAULT_UPGRADE_OFFER_SIZE,
            bust_delay_ms: Self::DEFAULT_BUST_DELAY_MS,
            landslide_bonus_percent: Self::DEFAULT_LANDSLIDE_BONUS_PERCENT,
        }
    }

    pub fn with_threshold(mut self, threshold: ThresholdSchedule) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_starting_dice(mut self, starting_dice: u8) -> Self {
        self.starting_dice = starting_dice;
        self
    }

    pub fn with_starting_rerolls(mut self, starting_rerolls: u32) -> Self {
        self.starting_rerolls = starting_rerolls;
        self
    }

    pub fn with_upgrade_offer_interval(mut self, interval: u32) -> Self {
        self.upgrade_offer_interval = interval;
        self
    }

    /// Pool size limit with the hard ceiling applied.
    pub fn pool_limit(&self) -> u8 {
        self.max_dice.min(Self::MAX_POOL)
    }

    /// Whether completing `turn` earns an upgrade offer.
    pub fn offers_upgrade_after(&self, turn: u32) -> bool {
        self.upgrade_offer_interval != 0
            && self.upgrade_offer_size != 0
            && turn % self.upgrade_offer_interval == 0
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_starts_at_base_and_steps_by_tier() {
        let schedule = ThresholdSchedule::default();
        assert_eq!(schedule.threshold(1), 500);
        assert_eq!(schedule.threshold(3), 500);
        assert_eq!(schedule.threshold(4), 1000);
        assert_eq!(schedule.threshold(7), 2000);
    }

    #[test]
    fn threshold_never_decreases() {
        let schedule = ThresholdSchedule::new(300, 10, 2);
        let mut previous = 0;
        for turn in 1..200 {
            let value = schedule.threshold(turn);
            assert!(value >= previous, "turn {turn} dropped to {value}");
            previous = value;
        }
        assert_eq!(schedule.threshold(199), u64::MAX);
    }

    #[test]
    fn doubling_schedule_is_strictly_increasing() {
        let schedule = ThresholdSchedule::new(100, 2, 1);
        assert_eq!(schedule.threshold(1), 100);
        assert_eq!(schedule.threshold(2), 200);
        assert_eq!(schedule.threshold(5), 1600);
    }

    #[test]
    fn offers_follow_interval() {
        let config = GameConfig::default();
        assert!(!config.offers_upgrade_after(1));
        assert!(config.offers_upgrade_after(3));
        assert!(config.offers_upgrade_after(6));
        assert!(!GameConfig::default().with_upgrade_offer_interval(0).offers_upgrade_after(3));
    }
}
