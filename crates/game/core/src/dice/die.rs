use arrayvec::ArrayVec;

use super::{Face, Upgrade, UpgradeKind};
use crate::config::GameConfig;

/// Unique die identity. Never reused for the lifetime of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieId(pub u64);

impl core::fmt::Display for DieId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`DieId`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieIdAllocator {
    next: u64,
}

impl DieIdAllocator {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> DieId {
        let id = DieId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Id the next call to [`allocate`](Self::allocate) will return.
    pub const fn peek(&self) -> DieId {
        DieId(self.next)
    }
}

impl Default for DieIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Selection state of a die within the current turn.
///
/// Staged and banked are separate variants so a die can never be both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieStatus {
    #[default]
    Active,
    Staged,
    Banked,
}

pub type UpgradeSlots = ArrayVec<Upgrade, { GameConfig::MAX_UPGRADES_PER_DIE }>;

/// One physical die in the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    pub id: DieId,
    pub value: Face,
    pub status: DieStatus,
    /// Stable slot index (1-based); upgrades follow the slot across rerolls.
    pub position: u8,
    pub upgrades: UpgradeSlots,
}

impl Die {
    pub fn new(id: DieId, value: Face, position: u8) -> Self {
        Self {
            id,
            value,
            status: DieStatus::Active,
            position,
            upgrades: UpgradeSlots::new(),
        }
    }

    pub fn with_upgrades(mut self, upgrades: UpgradeSlots) -> Self {
        self.upgrades = upgrades;
        self
    }

    pub fn with_status(mut self, status: DieStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_staged(&self) -> bool {
        self.status == DieStatus::Staged
    }

    pub fn is_banked(&self) -> bool {
        self.status == DieStatus::Banked
    }

    /// Not banked; staged dice are still active.
    pub fn is_active(&self) -> bool {
        !self.is_banked()
    }

    /// Flips staged/active. Banked dice are left untouched.
    pub fn toggle(&mut self) -> bool {
        self.status = match self.status {
            DieStatus::Active => DieStatus::Staged,
            DieStatus::Staged => DieStatus::Active,
            DieStatus::Banked => DieStatus::Banked,
        };
        self.is_staged()
    }

    pub fn bank(&mut self) {
        self.status = DieStatus::Banked;
    }

    /// Shows a new face and clears the selection. Position and upgrades persist.
    pub fn set_rolled(&mut self, value: Face) {
        self.value = value;
        self.status = DieStatus::Active;
    }

    pub fn active_upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(|upgrade| upgrade.is_active())
    }

    pub fn has_active(&self, kind: UpgradeKind) -> bool {
        self.active_upgrades().any(|upgrade| upgrade.kind == kind)
    }

    /// Attaches an upgrade, returning it back if the die has no free slot.
    pub fn attach(&mut self, upgrade: Upgrade) -> Result<(), Upgrade> {
        self.upgrades.try_push(upgrade).map_err(|err| err.element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = DieIdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
        assert_eq!(ids.peek(), DieId(3));
    }

    #[test]
    fn toggle_never_touches_banked_dice() {
        let mut die = Die::new(DieId(1), Face::One, 1);
        assert!(die.toggle());
        assert!(!die.toggle());
        die.bank();
        assert!(!die.toggle());
        assert!(die.is_banked());
        assert!(!die.is_staged());
    }

    #[test]
    fn reroll_keeps_slot_and_upgrades() {
        let mut die = Die::new(DieId(4), Face::Two, 3).with_status(DieStatus::Staged);
        die.attach(Upgrade::new(UpgradeKind::SetBonus)).unwrap();
        die.set_rolled(Face::Five);
        assert_eq!(die.position, 3);
        assert_eq!(die.upgrades.len(), 1);
        assert!(!die.is_staged());
        assert_eq!(die.value, Face::Five);
    }

    #[test]
    fn attach_fails_when_slots_are_full() {
        let mut die = Die::new(DieId(1), Face::One, 1);
        for _ in 0..GameConfig::MAX_UPGRADES_PER_DIE {
            die.attach(Upgrade::new(UpgradeKind::ScoreBonus)).unwrap();
        }
        let rejected = die.attach(Upgrade::new(UpgradeKind::SetBonus)).unwrap_err();
        assert_eq!(rejected.kind, UpgradeKind::SetBonus);
    }
}
