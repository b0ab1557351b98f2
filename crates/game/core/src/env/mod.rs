//! Read-only collaborators handed to command handlers.
//!
//! Handlers never own configuration or randomness; the [`CommandEnv`]
//! aggregate bundles both so a transition stays a pure function of
//! `(state, command, env)`.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::config::GameConfig;

/// Environment visible to every command transition.
#[derive(Clone, Copy)]
pub struct CommandEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> CommandEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for CommandEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
