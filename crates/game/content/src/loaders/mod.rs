//! Content loaders for reading game data from files.
//!
//! `GameConfig` is read from TOML and rule-book overrides from RON.

pub mod config;
pub mod factory;
pub mod rules;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use rules::{RuleSpec, RulesLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
