//! Dice, faces, and the upgrades attached to die slots.
mod die;
mod face;
mod factory;
mod upgrade;

pub use die::{Die, DieId, DieIdAllocator, DieStatus, UpgradeSlots};
pub use face::Face;
pub use factory::DiceFactory;
pub use upgrade::{Upgrade, UpgradeKind};
