use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::dice::UpgradeKind;
use crate::env::{RngOracle, compute_seed, context};

/// One choice in an upgrade offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeOption {
    /// Attach this upgrade to the offered slot.
    Attach(UpgradeKind),
    ExtraRerolls(u32),
    ExtraDice(u32),
}

impl UpgradeOption {
    /// Everything an offer may draw from.
    pub fn catalogue() -> Vec<UpgradeOption> {
        use strum::IntoEnumIterator;

        UpgradeKind::iter()
            .map(UpgradeOption::Attach)
            .chain([UpgradeOption::ExtraRerolls(2), UpgradeOption::ExtraDice(1)])
            .collect()
    }
}

/// A pending choice surfaced at the end of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOffer {
    pub options: ArrayVec<UpgradeOption, { GameConfig::MAX_OFFER_OPTIONS }>,
    /// Slot an `Attach` option would go to.
    pub position: u8,
}

impl UpgradeOffer {
    /// Draws distinct options and a slot among `positions`.
    pub fn draw(
        config: &GameConfig,
        rng: &dyn RngOracle,
        game_seed: u64,
        nonce: u64,
        positions: &[u8],
    ) -> Self {
        let mut pool = UpgradeOption::catalogue();
        let wanted = config
            .upgrade_offer_size
            .min(GameConfig::MAX_OFFER_OPTIONS)
            .min(pool.len());

        let mut options = ArrayVec::new();
        for draw in 0..wanted {
            let seed = compute_seed(game_seed, nonce, 0, context::OFFER + draw as u32);
            let index = rng.pick_index(seed, pool.len());
            options.push(pool.swap_remove(index));
        }

        let seed = compute_seed(game_seed, nonce, 0, context::OFFER_SLOT);
        let position = positions
            .get(rng.pick_index(seed, positions.len()))
            .copied()
            .unwrap_or(1);

        Self { options, position }
    }
}
