//! Pure dice-to-score evaluation.
//!
//! Rules are applied in priority order and each consumes the dice it matches:
//! 1. full-set specials (straight, three pairs) on exactly six dice
//! 2. N-of-a-kind for every face showing three or more
//! 3. leftover 1s and 5s as singles
//!
//! Anything left over scores nothing and is excluded from `scored_dice`.
//! Sparks are wild: every way of reading them as pip faces is scored and the
//! best reading wins.

use core::cmp::Reverse;

use super::rules::{RuleBook, RuleId};
use crate::dice::{Die, DieId, Face};

/// Dice consumed together by one rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringGroup {
    pub rule: RuleId,
    pub dice: Vec<DieId>,
    pub score: u64,
}

/// Result of evaluating a set of dice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoring {
    pub score: u64,
    pub groups: Vec<ScoringGroup>,
    pub scored_dice: Vec<DieId>,
    /// Each rule at most once, in the order it first fired.
    pub fired_rules: Vec<RuleId>,
}

impl Scoring {
    /// Nothing scored: the sparkle condition.
    pub fn is_bust(&self) -> bool {
        self.score == 0
    }

    pub fn scores(&self, die: DieId) -> bool {
        self.scored_dice.contains(&die)
    }
}

/// Scores the given dice.
pub fn evaluate<'a, I>(dice: I, rules: &RuleBook) -> Scoring
where
    I: IntoIterator<Item = &'a Die>,
{
    let entries: Vec<(DieId, Face)> = dice.into_iter().map(|die| (die.id, die.value)).collect();
    evaluate_entries(&entries, rules)
}

/// Scores bare faces. Group dice ids are the zero-based input indices.
pub fn evaluate_faces(faces: &[Face], rules: &RuleBook) -> Scoring {
    let entries: Vec<(DieId, Face)> = faces
        .iter()
        .enumerate()
        .map(|(index, &face)| (DieId(index as u64), face))
        .collect();
    evaluate_entries(&entries, rules)
}

/// Shorthand for the points a set of faces is worth under `rules`.
pub fn score_faces(faces: &[Face], rules: &RuleBook) -> u64 {
    evaluate_faces(faces, rules).score
}

#[derive(Default)]
struct ScoringBuilder {
    scoring: Scoring,
}

impl ScoringBuilder {
    fn push(&mut self, rule: RuleId, dice: Vec<DieId>, score: u64) {
        self.scoring.score = self.scoring.score.saturating_add(score);
        self.scoring.scored_dice.extend(dice.iter().copied());
        if !self.scoring.fired_rules.contains(&rule) {
            self.scoring.fired_rules.push(rule);
        }
        self.scoring.groups.push(ScoringGroup { rule, dice, score });
    }

    fn finish(self) -> Scoring {
        self.scoring
    }
}

/// Dice bucketed by pip (index 0 holds the 1s), with sparks kept apart.
#[derive(Clone)]
struct Buckets {
    pips: [Vec<DieId>; 6],
    sparks: Vec<DieId>,
}

impl Buckets {
    fn new(entries: &[(DieId, Face)]) -> Self {
        let mut buckets = Self {
            pips: Default::default(),
            sparks: Vec::new(),
        };
        for &(id, face) in entries {
            match face.pip() {
                Some(pip) => buckets.pips[usize::from(pip - 1)].push(id),
                None => buckets.sparks.push(id),
            }
        }
        buckets
    }

    /// Reads `reading[i]` of the sparks as pip `i + 1`.
    fn resolve(&self, reading: &[usize; 6]) -> Buckets {
        let mut resolved = Buckets {
            pips: self.pips.clone(),
            sparks: Vec::new(),
        };
        let mut sparks = self.sparks.iter().copied();
        for (bucket, &count) in resolved.pips.iter_mut().zip(reading) {
            bucket.extend(sparks.by_ref().take(count));
        }
        resolved
    }

    fn len(&self) -> usize {
        self.pips.iter().map(Vec::len).sum::<usize>() + self.sparks.len()
    }

    fn all_ids(&self) -> Vec<DieId> {
        self.pips
            .iter()
            .flatten()
            .chain(self.sparks.iter())
            .copied()
            .collect()
    }
}

fn evaluate_entries(entries: &[(DieId, Face)], rules: &RuleBook) -> Scoring {
    if entries.is_empty() {
        return Scoring::default();
    }

    let buckets = Buckets::new(entries);
    if buckets.sparks.is_empty() {
        return evaluate_pips(buckets, rules);
    }

    let mut best: Option<Scoring> = None;
    for reading in spark_readings(buckets.sparks.len()) {
        let candidate = evaluate_pips(buckets.resolve(&reading), rules);
        if best.as_ref().is_none_or(|current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }
    best.unwrap_or_default()
}

/// Every split of `sparks` wild dice across the six faces, most 1s first.
fn spark_readings(sparks: usize) -> Vec<[usize; 6]> {
    fn split(
        remaining: usize,
        face: usize,
        reading: &mut [usize; 6],
        out: &mut Vec<[usize; 6]>,
    ) {
        if face == 5 {
            reading[5] = remaining;
            out.push(*reading);
            return;
        }
        for count in (0..=remaining).rev() {
            reading[face] = count;
            split(remaining - count, face + 1, reading, out);
        }
        reading[face] = 0;
    }

    let mut out = Vec::new();
    split(sparks, 0, &mut [0; 6], &mut out);
    out
}

/// Scores buckets that hold no sparks.
fn evaluate_pips(mut buckets: Buckets, rules: &RuleBook) -> Scoring {
    let mut builder = ScoringBuilder::default();

    if buckets.len() == 6 {
        if let Some((rule, points)) = full_set(&buckets, rules) {
            builder.push(rule, buckets.all_ids(), points);
            return builder.finish();
        }
    }

    take_of_a_kind(&mut buckets, rules, &mut builder);
    take_singles(&mut buckets, rules, &mut builder);

    builder.finish()
}

/// Straight or three pairs over exactly six dice.
fn full_set(buckets: &Buckets, rules: &RuleBook) -> Option<(RuleId, u64)> {
    let counts = buckets.pips.iter().map(Vec::len);

    if counts.clone().all(|count| count == 1) {
        if let Some(points) = rules.points(RuleId::Straight, None) {
            return Some((RuleId::Straight, points));
        }
    }

    if counts.clone().all(|count| count == 0 || count == 2) {
        if let Some(points) = rules.points(RuleId::ThreePairs, None) {
            return Some((RuleId::ThreePairs, points));
        }
    }

    None
}

fn take_of_a_kind(buckets: &mut Buckets, rules: &RuleBook, builder: &mut ScoringBuilder) {
    let mut order: Vec<usize> = (0..6).collect();
    order.sort_by_key(|&index| Reverse((buckets.pips[index].len(), triple_rank(index))));

    for index in order {
        let count = buckets.pips[index].len();
        let Some(rule) = RuleId::of_a_kind(count) else {
            continue;
        };
        let face = Face::PIPS[index];
        let Some(points) = rules.points(rule, Some(face)) else {
            continue;
        };
        let extra = count.saturating_sub(6) as u32;
        let points = points.saturating_mul(2u64.saturating_pow(extra));
        let dice = core::mem::take(&mut buckets.pips[index]);
        builder.push(rule, dice, points);
    }
}

/// Ones outrank sixes, which outrank the rest in descending order.
fn triple_rank(index: usize) -> usize {
    if index == 0 { 6 } else { index }
}

fn take_singles(buckets: &mut Buckets, rules: &RuleBook, builder: &mut ScoringBuilder) {
    for (index, rule) in [(0, RuleId::SingleOne), (4, RuleId::SingleFive)] {
        let Some(points) = rules.points(rule, Some(Face::PIPS[index])) else {
            continue;
        };
        for id in core::mem::take(&mut buckets.pips[index]) {
            builder.push(rule, vec![id], points);
        }
    }
}
