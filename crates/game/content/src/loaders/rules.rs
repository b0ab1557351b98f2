//! Rule-book loader.
//!
//! A rules file is a RON list of overrides applied on top of the standard
//! book. Rules not mentioned keep their standard definition.
//!
//! ```ron
//! [
//!     (id: Straight, enabled: false),
//!     (id: ThreePairs, score: Some(Fixed(750)), description: Some("Any three pairs")),
//! ]
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sparkle_core::{RuleBook, RuleId, RuleScore, ScoringRule};

use crate::loaders::{LoadResult, read_file};

/// Override for one rule.
#[derive(Clone, Debug, Deserialize)]
pub struct RuleSpec {
    pub id: RuleId,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<RuleScore>,
}

fn enabled_by_default() -> bool {
    true
}

impl RuleSpec {
    fn apply(&self, rule: &mut ScoringRule) {
        rule.enabled = self.enabled;
        if let Some(description) = &self.description {
            rule.description = description.clone();
        }
        if let Some(score) = self.score {
            rule.score = score;
        }
    }
}

/// Loader for rule books from RON files.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load(path: &Path) -> LoadResult<RuleBook> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<RuleBook> {
        let specs: Vec<RuleSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules RON: {}", e))?;
        Self::build(&specs)
    }

    /// Applies `specs` to the standard rule book. A rule may be overridden once.
    pub fn build(specs: &[RuleSpec]) -> LoadResult<RuleBook> {
        let mut rules: Vec<ScoringRule> = RuleBook::standard().iter().cloned().collect();

        for (index, spec) in specs.iter().enumerate() {
            if specs[..index].iter().any(|earlier| earlier.id == spec.id) {
                anyhow::bail!("rule {} is overridden more than once", spec.id);
            }
            let rule = rules
                .iter_mut()
                .find(|rule| rule.id == spec.id)
                .ok_or_else(|| anyhow::anyhow!("rule {} is not part of the standard book", spec.id))?;
            spec.apply(rule);
        }

        Ok(RuleBook::new(rules))
    }
}
