//! Deterministic rules engine for the Sparkle dice game.
//!
//! `sparkle-core` defines the canonical rules (dice, scoring, commands, game
//! state) and exposes pure APIs that can be reused by both the runtime and
//! offline tools. All state mutation flows through [`engine::GameEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod command;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod scoring;
pub mod state;

pub use command::{Command, CommandError, CommandTransition};
pub use config::{GameConfig, ThresholdSchedule};
pub use dice::{Die, DieId, DieStatus, Face, Upgrade, UpgradeKind};
pub use engine::{
    ExecutionOutcome, GameEngine, Rejection, TransitionPhase, TransitionPhaseError, reduce,
};
pub use env::{CommandEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use event::GameEvent;
pub use scoring::{
    GlobalModifiers, RuleBook, RuleId, RuleScore, Scoring, ScoringGroup, ScoringRule,
    apply_upgrades, evaluate, evaluate_faces, score_faces,
};
pub use state::{GameState, UpgradeOffer, UpgradeOption};
