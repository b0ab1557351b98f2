//! Scoring: rule definitions, the pure evaluator, and upgrade modifiers.
mod evaluator;
mod modifiers;
mod rules;

pub use evaluator::{Scoring, ScoringGroup, evaluate, evaluate_faces, score_faces};
pub use modifiers::{GlobalModifiers, UpgradedScore, apply_upgrades};
pub use rules::{RuleBook, RuleId, RuleScore, ScoringRule};
