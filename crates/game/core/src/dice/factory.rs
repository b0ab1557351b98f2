//! Dice creation and rolling.
//!
//! All faces are drawn from the [`RngOracle`] with a seed derived from the
//! game seed, the command nonce, and the die id, so a pool rolls the same way
//! every time the same command is replayed against the same state.

use super::{Die, DieIdAllocator, Face, UpgradeKind, UpgradeSlots};
use crate::env::{RngOracle, compute_seed};

/// Rolls faces and builds fresh dice for one command.
#[derive(Clone, Copy)]
pub struct DiceFactory<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
}

impl<'a> DiceFactory<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
        }
    }

    /// Draws a face for `die` under the given roll context.
    ///
    /// A die carrying an active `SparkFace` upgrade shows a spark instead of a six.
    pub fn roll_face(&self, die: &Die, context: u32) -> Face {
        let seed = compute_seed(self.game_seed, self.nonce, die.id.0, context);
        let face = self.rng.roll_face(seed);
        if face == Face::Six && die.has_active(UpgradeKind::SparkFace) {
            Face::Spark
        } else {
            face
        }
    }

    /// Re-rolls a die in place, clearing its selection.
    pub fn reroll(&self, die: &mut Die, context: u32) {
        let face = self.roll_face(die, context);
        die.set_rolled(face);
    }

    /// Creates and rolls a brand-new die for `position`.
    pub fn fresh_die(
        &self,
        ids: &mut DieIdAllocator,
        position: u8,
        upgrades: UpgradeSlots,
        context: u32,
    ) -> Die {
        let mut die = Die::new(ids.allocate(), Face::One, position).with_upgrades(upgrades);
        self.reroll(&mut die, context);
        die
    }

    /// Replaces every die with a freshly rolled one in the same slot.
    ///
    /// The new dice get new ids and keep their slot's upgrades; the result is
    /// ordered by position.
    pub fn fresh_pool(&self, ids: &mut DieIdAllocator, previous: &[Die], context: u32) -> Vec<Die> {
        let mut slots: Vec<(u8, UpgradeSlots)> = previous
            .iter()
            .map(|die| (die.position, die.upgrades.clone()))
            .collect();
        slots.sort_by_key(|(position, _)| *position);

        slots
            .into_iter()
            .map(|(position, upgrades)| self.fresh_die(ids, position, upgrades, context))
            .collect()
    }

    /// Creates the initial pool with slots `1..=count` and no upgrades.
    pub fn starting_pool(&self, ids: &mut DieIdAllocator, count: u8, context: u32) -> Vec<Die> {
        (1..=count)
            .map(|position| self.fresh_die(ids, position, UpgradeSlots::new(), context))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DieStatus, Upgrade};
    use crate::env::{PcgRng, context};

    /// Always rolls the same pip.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn starting_pool_fills_slots_in_order() {
        let rng = PcgRng;
        let factory = DiceFactory::new(&rng, 9, 0);
        let mut ids = DieIdAllocator::new();
        let pool = factory.starting_pool(&mut ids, 6, context::ROLL);

        let positions: Vec<u8> = pool.iter().map(|die| die.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
        assert!(pool.iter().all(|die| die.status == DieStatus::Active));
    }

    #[test]
    fn fresh_pool_keeps_upgrades_and_issues_new_ids() {
        let rng = PcgRng;
        let factory = DiceFactory::new(&rng, 1, 5);
        let mut ids = DieIdAllocator::new();
        let mut pool = factory.starting_pool(&mut ids, 3, context::ROLL);
        pool[1].attach(Upgrade::new(UpgradeKind::SetBonus)).unwrap();
        pool[2].bank();

        let fresh = factory.fresh_pool(&mut ids, &pool, context::ROLL);

        assert_eq!(fresh.len(), 3);
        assert!(fresh.iter().all(|die| !die.is_banked()));
        assert_eq!(fresh[1].upgrades.len(), 1);
        for (old, new) in pool.iter().zip(&fresh) {
            assert!(new.id > old.id);
            assert_eq!(new.position, old.position);
        }
    }

    #[test]
    fn spark_face_replaces_six() {
        let rng = Fixed(5);
        let factory = DiceFactory::new(&rng, 0, 0);
        let mut ids = DieIdAllocator::new();
        let mut upgrades = UpgradeSlots::new();
        upgrades.push(Upgrade::new(UpgradeKind::SparkFace));

        let plain = factory.fresh_die(&mut ids, 1, UpgradeSlots::new(), context::ROLL);
        let sparky = factory.fresh_die(&mut ids, 2, upgrades, context::ROLL);

        assert_eq!(plain.value, Face::Six);
        assert_eq!(sparky.value, Face::Spark);
    }
}
