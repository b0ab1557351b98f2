//! Named, toggleable scoring rules and their activation counters.

use crate::dice::Face;

/// Identifies a scoring rule.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RuleId {
    SingleOne,
    SingleFive,
    ThreeOfAKind,
    FourOfAKind,
    FiveOfAKind,
    /// Six or more of a kind; each die beyond six doubles the score again.
    SixOfAKind,
    Straight,
    ThreePairs,
}

impl RuleId {
    pub const fn is_single(self) -> bool {
        matches!(self, RuleId::SingleOne | RuleId::SingleFive)
    }

    /// Rule that scores `count` matching dice, if any.
    pub const fn of_a_kind(count: usize) -> Option<Self> {
        match count {
            0..=2 => None,
            3 => Some(RuleId::ThreeOfAKind),
            4 => Some(RuleId::FourOfAKind),
            5 => Some(RuleId::FiveOfAKind),
            _ => Some(RuleId::SixOfAKind),
        }
    }
}

/// How a rule's points are computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleScore {
    Fixed(u64),
    /// `ace` for ones, `per_pip × face` otherwise, then scaled by `factor`.
    OfAKind { ace: u64, per_pip: u64, factor: u64 },
}

impl RuleScore {
    /// Points for a group showing `face`. Fixed rules ignore the face.
    pub fn points(&self, face: Option<Face>) -> u64 {
        match *self {
            RuleScore::Fixed(points) => points,
            RuleScore::OfAKind {
                ace,
                per_pip,
                factor,
            } => {
                let base = match face {
                    Some(Face::One) => ace,
                    Some(face) => per_pip.saturating_mul(face.pip().unwrap_or(0) as u64),
                    None => 0,
                };
                base.saturating_mul(factor)
            }
        }
    }
}

/// A rule definition plus its per-game activation counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringRule {
    pub id: RuleId,
    pub description: String,
    pub score: RuleScore,
    pub enabled: bool,
    /// Incremented once per bank in which the rule contributed.
    pub activation_count: u32,
}

impl ScoringRule {
    pub fn new(id: RuleId, description: impl Into<String>, score: RuleScore) -> Self {
        Self {
            id,
            description: description.into(),
            score,
            enabled: true,
            activation_count: 0,
        }
    }
}

/// The active rule set. Lives in game state so counters persist across turns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleBook {
    rules: Vec<ScoringRule>,
}

impl RuleBook {
    pub fn new(rules: Vec<ScoringRule>) -> Self {
        Self { rules }
    }

    /// Standard rules on the 100/50 scale.
    pub fn standard() -> Self {
        let of_a_kind = |factor| RuleScore::OfAKind {
            ace: 1000,
            per_pip: 100,
            factor,
        };
        Self::new(vec![
            ScoringRule::new(RuleId::SingleOne, "Each 1", RuleScore::Fixed(100)),
            ScoringRule::new(RuleId::SingleFive, "Each 5", RuleScore::Fixed(50)),
            ScoringRule::new(
                RuleId::ThreeOfAKind,
                "Three of a kind: 1000 for 1s, face × 100 otherwise",
                of_a_kind(1),
            ),
            ScoringRule::new(
                RuleId::FourOfAKind,
                "Four of a kind: double three of a kind",
                of_a_kind(2),
            ),
            ScoringRule::new(
                RuleId::FiveOfAKind,
                "Five of a kind: four times three of a kind",
                of_a_kind(4),
            ),
            ScoringRule::new(
                RuleId::SixOfAKind,
                "Six of a kind: eight times three of a kind, doubling per extra die",
                of_a_kind(8),
            ),
            ScoringRule::new(RuleId::Straight, "1-2-3-4-5-6", RuleScore::Fixed(1500)),
            ScoringRule::new(RuleId::ThreePairs, "Three distinct pairs", RuleScore::Fixed(1500)),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoringRule> {
        self.rules.iter()
    }

    pub fn rule(&self, id: RuleId) -> Option<&ScoringRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    fn rule_mut(&mut self, id: RuleId) -> Option<&mut ScoringRule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }

    pub fn is_enabled(&self, id: RuleId) -> bool {
        self.rule(id).is_some_and(|rule| rule.enabled)
    }

    /// Returns false if the rule is not part of this book.
    pub fn set_enabled(&mut self, id: RuleId, enabled: bool) -> bool {
        match self.rule_mut(id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Points an enabled rule awards for `face`. `None` if disabled, missing, or worthless.
    pub fn points(&self, id: RuleId, face: Option<Face>) -> Option<u64> {
        self.rule(id)
            .filter(|rule| rule.enabled)
            .map(|rule| rule.score.points(face))
            .filter(|&points| points > 0)
    }

    pub fn activation_count(&self, id: RuleId) -> u32 {
        self.rule(id).map_or(0, |rule| rule.activation_count)
    }

    pub fn record_activation(&mut self, id: RuleId) {
        if let Some(rule) = self.rule_mut(id) {
            rule.activation_count = rule.activation_count.saturating_add(1);
        }
    }

    pub fn reset_activations(&mut self) {
        for rule in &mut self.rules {
            rule.activation_count = 0;
        }
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn standard_book_covers_every_rule() {
        let book = RuleBook::standard();
        for id in RuleId::iter() {
            assert!(book.is_enabled(id), "{id} missing");
        }
    }

    #[test]
    fn of_a_kind_points_scale_geometrically() {
        let book = RuleBook::standard();
        assert_eq!(book.points(RuleId::ThreeOfAKind, Some(Face::One)), Some(1000));
        assert_eq!(book.points(RuleId::ThreeOfAKind, Some(Face::Four)), Some(400));
        assert_eq!(book.points(RuleId::FourOfAKind, Some(Face::Four)), Some(800));
        assert_eq!(book.points(RuleId::FiveOfAKind, Some(Face::Two)), Some(800));
        assert_eq!(book.points(RuleId::SixOfAKind, Some(Face::Two)), Some(1600));
    }

    #[test]
    fn disabled_rules_award_nothing() {
        let mut book = RuleBook::standard();
        assert!(book.set_enabled(RuleId::Straight, false));
        assert_eq!(book.points(RuleId::Straight, None), None);
    }

    #[test]
    fn activations_count_and_reset() {
        let mut book = RuleBook::standard();
        book.record_activation(RuleId::SingleOne);
        book.record_activation(RuleId::SingleOne);
        assert_eq!(book.activation_count(RuleId::SingleOne), 2);
        book.reset_activations();
        assert_eq!(book.activation_count(RuleId::SingleOne), 0);
    }
}
