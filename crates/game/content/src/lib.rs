//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the files a host uses to tune a game:
//! - Game configuration (data-driven via TOML)
//! - Scoring rule overrides (data-driven via RON)
//!
//! Content is handed to the engine at construction and never read again.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RuleSpec, RulesLoader};
