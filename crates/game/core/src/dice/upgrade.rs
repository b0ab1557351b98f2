//! Upgrades: persistent modifiers bound to a die slot.

/// Every upgrade the engine knows how to apply.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UpgradeKind {
    /// Flat bonus added to the die's scoring group.
    ScoreBonus,
    /// Multiplies the die's scoring group.
    ScoreMultiplier,
    /// Flat bonus that only counts once the die is banked.
    BankedScoreBonus,
    /// Multiplier that only counts once the die is banked.
    BankedScoreMultiplier,
    /// Re-rolls the die automatically when a roll would sparkle.
    AutoReroll,
    /// Multi-die groups score ×n³ for n carriers.
    SetBonus,
    /// Grants an extra-die resource when the die is banked.
    ExtraDieGrant,
    /// Multiplies the die's scoring group by ten.
    TenXMultiplier,
    /// The die's six face becomes a spark.
    SparkFace,
}

impl UpgradeKind {
    /// Uses granted when the upgrade is attached. `None` means unlimited.
    pub const fn default_uses(self) -> Option<u32> {
        match self {
            UpgradeKind::ScoreMultiplier => Some(5),
            UpgradeKind::AutoReroll => Some(3),
            UpgradeKind::ExtraDieGrant => Some(1),
            UpgradeKind::TenXMultiplier => Some(1),
            UpgradeKind::ScoreBonus
            | UpgradeKind::BankedScoreBonus
            | UpgradeKind::BankedScoreMultiplier
            | UpgradeKind::SetBonus
            | UpgradeKind::SparkFace => None,
        }
    }

    pub const fn flat_bonus(self) -> u64 {
        match self {
            UpgradeKind::ScoreBonus => 50,
            UpgradeKind::BankedScoreBonus => 100,
            _ => 0,
        }
    }

    /// Multiplicative factor, 1 for upgrades that do not multiply.
    pub const fn multiplier(self) -> u64 {
        match self {
            UpgradeKind::ScoreMultiplier | UpgradeKind::BankedScoreMultiplier => 2,
            UpgradeKind::TenXMultiplier => 10,
            _ => 1,
        }
    }

    /// Whether the die must already be banked for the upgrade to count.
    pub const fn requires_banked(self) -> bool {
        matches!(
            self,
            UpgradeKind::BankedScoreBonus | UpgradeKind::BankedScoreMultiplier
        )
    }

    /// Whether a scoring bank spends one use of this upgrade.
    ///
    /// Auto-rerolls are spent when they fire during a roll instead.
    pub const fn consumed_on_bank(self) -> bool {
        !matches!(self, UpgradeKind::AutoReroll)
    }
}

/// An upgrade attached to a die slot.
///
/// When `remaining_uses` reaches zero the upgrade stops applying but stays
/// attached so it can still be shown as used up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Upgrade {
    pub kind: UpgradeKind,
    pub remaining_uses: Option<u32>,
}

impl Upgrade {
    /// Creates an upgrade with the kind's default use budget.
    pub const fn new(kind: UpgradeKind) -> Self {
        Self {
            kind,
            remaining_uses: kind.default_uses(),
        }
    }

    pub const fn unlimited(kind: UpgradeKind) -> Self {
        Self {
            kind,
            remaining_uses: None,
        }
    }

    pub const fn with_uses(kind: UpgradeKind, uses: u32) -> Self {
        Self {
            kind,
            remaining_uses: Some(uses),
        }
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self.remaining_uses, Some(0))
    }

    pub const fn is_limited(&self) -> bool {
        self.remaining_uses.is_some()
    }

    /// Spends one use. Unlimited upgrades are unaffected.
    pub fn consume(&mut self) {
        if let Some(uses) = self.remaining_uses.as_mut() {
            *uses = uses.saturating_sub(1);
        }
    }
}
