use crate::discretize::{Discretizer, StateMatrix};
use crate::error::IdabilityError;
use crate::model::Table;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Everything a prioritizer may look at when ranking one subject's features.
pub struct RankContext<'a> {
    pub table: &'a Table,
    pub states: &'a StateMatrix,
    pub discretizer: &'a Discretizer,
}

/// Orders the candidate features of one subject, best candidate first.
pub trait Prioritizer {
    /// Return the subject's present features (row indices) in the order the
    /// builder should try them. The order must be total and deterministic.
    fn order(&self, ctx: &RankContext<'_>, subject: usize) -> Vec<usize>;

    fn name(&self) -> &'static str;
}

/// Rarest features first: fewest other subjects in which the feature is present.
pub struct Rarity;

/// Features whose value in the subject stands furthest above everyone else's.
pub struct AbundanceGap;

impl Prioritizer for Rarity {
    fn order(&self, ctx: &RankContext<'_>, subject: usize) -> Vec<usize> {
        let mut features = ctx.states.present_features(subject);
        features.sort_by(|&a, &b| by_rarity(ctx, subject, a, b));
        features
    }

    fn name(&self) -> &'static str {
        "rarity"
    }
}

impl Prioritizer for AbundanceGap {
    fn order(&self, ctx: &RankContext<'_>, subject: usize) -> Vec<usize> {
        let floor = ctx.discretizer.absence_floor();
        let mut scored: Vec<(usize, Decimal)> = ctx
            .states
            .present_features(subject)
            .into_iter()
            .map(|f| (f, abundance_gap(ctx.table.row(f), subject, floor)))
            .collect();
        scored.sort_by(|(a, gap_a), (b, gap_b)| {
            gap_b
                .cmp(gap_a)
                .then_with(|| by_rarity(ctx, subject, *a, *b))
        });
        scored.into_iter().map(|(f, _)| f).collect()
    }

    fn name(&self) -> &'static str {
        "abundance_gap"
    }
}

fn by_rarity(ctx: &RankContext<'_>, subject: usize, a: usize, b: usize) -> Ordering {
    ctx.states
        .present_elsewhere(a, subject)
        .cmp(&ctx.states.present_elsewhere(b, subject))
        .then_with(|| ctx.table.features()[a].cmp(&ctx.table.features()[b]))
}

/// Distance between the subject's value and the next lower value held by any
/// other subject, never measured below `floor`.
pub fn abundance_gap(row: &[Decimal], subject: usize, floor: Decimal) -> Decimal {
    let focal = row[subject];
    let next_lower = row
        .iter()
        .enumerate()
        .filter(|&(s, v)| s != subject && *v <= focal)
        .map(|(_, v)| *v)
        .fold(floor, Decimal::max);
    focal - next_lower
}

/// The selectable prioritization strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    #[default]
    Rarity,
    AbundanceGap,
}

impl Ranking {
    pub const ALL: &'static [Ranking] = &[Ranking::Rarity, Ranking::AbundanceGap];

    pub fn prioritizer(self) -> &'static dyn Prioritizer {
        match self {
            Ranking::Rarity => &Rarity,
            Ranking::AbundanceGap => &AbundanceGap,
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prioritizer().name())
    }
}

impl FromStr for Ranking {
    type Err = IdabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ranking::ALL
            .iter()
            .copied()
            .find(|r| r.prioritizer().name() == s)
            .ok_or_else(|| {
                IdabilityError::InvalidConfig(format!(
                    "unknown ranking '{s}' (expected rarity or abundance_gap)"
                ))
            })
    }
}
