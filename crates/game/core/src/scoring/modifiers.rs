//! Upgrade modifiers applied on top of the evaluator's raw groups.
//!
//! Fixed order, per group:
//! 1. raw group score
//! 2. flat bonuses from upgrades on the group's dice
//! 3. multipliers from upgrades on the group's dice
//! 4. set bonus (n³ for n carriers) on multi-die groups
//!
//! Groups are then summed, banked dice contribute their banked-only upgrades,
//! and the permanent landslide multiplier is applied to the total.
//!
//! Everything here is a preview: use counts are read, never spent. Spending
//! happens in the bank transition.

use super::evaluator::ScoringGroup;
use crate::dice::{Die, DieId, Upgrade, UpgradeKind};

/// Game-wide modifiers that scale the summed score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalModifiers {
    /// 100 means no change.
    pub multiplier_percent: u32,
}

impl Default for GlobalModifiers {
    fn default() -> Self {
        Self {
            multiplier_percent: 100,
        }
    }
}

/// Score after upgrades, with the per-group breakdown kept for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpgradedScore {
    pub raw: u64,
    pub group_scores: Vec<u64>,
    pub total: u64,
}

fn find<'a>(pool: &'a [Die], id: DieId) -> Option<&'a Die> {
    pool.iter().find(|die| die.id == id)
}

/// An upgrade applies if it has uses left and its banking requirement holds.
fn applicable<'a>(die: &'a Die) -> impl Iterator<Item = &'a Upgrade> + 'a {
    die.active_upgrades()
        .filter(move |upgrade| !upgrade.kind.requires_banked() || die.is_banked())
}

fn group_score(group: &ScoringGroup, pool: &[Die]) -> u64 {
    let dice: Vec<&Die> = group.dice.iter().filter_map(|&id| find(pool, id)).collect();

    let mut score = group.score;
    for die in &dice {
        for upgrade in applicable(die) {
            score = score.saturating_add(upgrade.kind.flat_bonus());
        }
    }
    for die in &dice {
        for upgrade in applicable(die) {
            score = score.saturating_mul(upgrade.kind.multiplier());
        }
    }

    if group.dice.len() > 1 && !group.rule.is_single() {
        let carriers = dice
            .iter()
            .filter(|die| die.has_active(UpgradeKind::SetBonus))
            .count() as u64;
        if carriers > 0 {
            score = score.saturating_mul(carriers.saturating_pow(3));
        }
    }

    score
}

/// Applies upgrades to `groups`, looking dice up in `pool`.
///
/// Banked dice in `pool` that are not part of any group add their
/// banked-only bonuses and multipliers, but only when the groups score.
pub fn apply_upgrades(groups: &[ScoringGroup], pool: &[Die], global: GlobalModifiers) -> UpgradedScore {
    let raw = groups
        .iter()
        .fold(0u64, |acc, group| acc.saturating_add(group.score));
    let group_scores: Vec<u64> = groups.iter().map(|group| group_score(group, pool)).collect();
    let mut total = group_scores
        .iter()
        .fold(0u64, |acc, &score| acc.saturating_add(score));

    if total > 0 {
        let in_groups = |id: DieId| groups.iter().any(|group| group.dice.contains(&id));
        let banked: Vec<&Die> = pool
            .iter()
            .filter(|die| die.is_banked() && !in_groups(die.id))
            .collect();

        for die in &banked {
            for upgrade in die.active_upgrades().filter(|u| u.kind.requires_banked()) {
                total = total.saturating_add(upgrade.kind.flat_bonus());
            }
        }
        for die in &banked {
            for upgrade in die.active_upgrades().filter(|u| u.kind.requires_banked()) {
                total = total.saturating_mul(upgrade.kind.multiplier());
            }
        }
    }

    let scaled = u128::from(total) * u128::from(global.multiplier_percent) / 100;
    let total = u64::try_from(scaled).unwrap_or(u64::MAX);

    UpgradedScore {
        raw,
        group_scores,
        total,
    }
}
