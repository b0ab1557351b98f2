//! RNG oracle for deterministic dice rolls.
//!
//! Every random decision in the engine (die faces, automatic re-rolls, upgrade
//! offers, reset seeds) goes through [`RngOracle`] so that a game can be
//! replayed exactly from its seed and command log.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value.

use crate::dice::Face;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides) + 1
    }

    /// Roll a six-sided die and return its face.
    fn roll_face(&self, seed: u64) -> Face {
        // roll_die(_, 6) is always within 1..=6
        Face::from_pip(self.roll_die(seed, 6) as u8).unwrap_or(Face::One)
    }

    /// Pick an index in `0..len`. Returns 0 for empty ranges.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Each call is a single step from the supplied seed, so the
/// oracle itself carries no state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Context values that separate independent draws within one command.
pub mod context {
    /// Regular ROLL / RE_ROLL / fresh pool face.
    pub const ROLL: u32 = 0;
    /// Automatic re-roll granted by an upgrade after a sparkle.
    pub const AUTO_REROLL: u32 = 1;
    /// Upgrade offer option draws (offset by draw index).
    pub const OFFER: u32 = 16;
    /// Slot chosen for an upgrade offer.
    pub const OFFER_SLOT: u32 = 15;
    /// Seed derivation for a new game on RESET.
    pub const RESET: u32 = 2;
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Command sequence number (increments on each accepted command)
/// * `subject` - Die id (or another discriminator) the draw is for
/// * `context` - Separates multiple draws for the same subject in one command
pub fn compute_seed(game_seed: u64, nonce: u64, subject: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= subject.wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn roll_face_stays_on_the_die() {
        let rng = PcgRng;
        for seed in 0..500 {
            let pip = rng.roll_face(compute_seed(7, seed, 3, context::ROLL)).pip();
            assert!(matches!(pip, Some(1..=6)));
        }
    }

    #[test]
    fn seeds_differ_by_subject_and_context() {
        let base = compute_seed(1, 1, 1, context::ROLL);
        assert_ne!(base, compute_seed(1, 1, 2, context::ROLL));
        assert_ne!(base, compute_seed(1, 1, 1, context::AUTO_REROLL));
        assert_ne!(base, compute_seed(1, 2, 1, context::ROLL));
    }
}
