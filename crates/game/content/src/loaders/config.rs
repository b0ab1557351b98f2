//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use sparkle_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to [`GameConfig::default`], so a file only needs
/// the values it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.starting_dice == 0 {
            anyhow::bail!("starting_dice must be at least 1");
        }
        if config.starting_dice > config.pool_limit() {
            anyhow::bail!(
                "starting_dice ({}) exceeds max_dice ({})",
                config.starting_dice,
                config.pool_limit()
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::ThresholdSchedule;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            starting_rerolls = 5
            bust_delay_ms = 250

            [threshold]
            base = 300
            growth = 10
            turns_per_tier = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.starting_rerolls, 5);
        assert_eq!(config.bust_delay_ms, 250);
        assert_eq!(config.threshold.threshold(5), 3000);
        assert_eq!(config.starting_dice, GameConfig::DEFAULT_STARTING_DICE);
    }

    #[test]
    fn threshold_table_may_be_partial() {
        let config = ConfigLoader::parse("[threshold]\nbase = 250\n").unwrap();

        assert_eq!(config.threshold.base, 250);
        assert_eq!(config.threshold.growth, ThresholdSchedule::DEFAULT_GROWTH);
        assert_eq!(
            config.threshold.turns_per_tier,
            ThresholdSchedule::DEFAULT_TURNS_PER_TIER
        );
    }

    #[test]
    fn oversized_pool_is_rejected() {
        let error = ConfigLoader::parse("starting_dice = 9\nmax_dice = 8").unwrap_err();
        assert!(error.to_string().contains("exceeds max_dice"));
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "starting_dice = \"six\"").unwrap();

        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(format!("{error:#}").contains("config.toml"));
    }
}
