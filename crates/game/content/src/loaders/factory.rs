//! Content factory for loading a data directory.

use std::path::{Path, PathBuf};

use sparkle_core::{GameConfig, RuleBook};

use crate::loaders::{ConfigLoader, LoadResult, RulesLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── rules.ron
/// ```
///
/// Either file may be absent, in which case the built-in defaults are used.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the rule book from `rules.ron`.
    pub fn load_rules(&self) -> LoadResult<RuleBook> {
        let path = self.data_dir.join("rules.ron");
        if !path.exists() {
            return Ok(RuleBook::standard());
        }
        RulesLoader::load(&path)
    }
}
