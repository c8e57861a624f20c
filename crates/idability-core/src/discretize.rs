use crate::error::IdabilityError;
use crate::model::{FeatureState, Table};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Turns raw measurements into presence labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discretizer {
    /// Single boundary at zero: positive values are present, the rest absent.
    #[default]
    Simple,
    /// `value >= presence` is present, `value <= absence` is absent, anything
    /// in between is ambiguous.
    Thresholds { presence: Decimal, absence: Decimal },
}

impl Discretizer {
    pub fn thresholds(presence: Decimal, absence: Decimal) -> Result<Self, IdabilityError> {
        let d = Discretizer::Thresholds { presence, absence };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<(), IdabilityError> {
        if let Discretizer::Thresholds { presence, absence } = self {
            if absence > presence {
                return Err(IdabilityError::InvalidConfig(format!(
                    "absence threshold {absence} is above presence threshold {presence}"
                )));
            }
        }
        Ok(())
    }

    pub fn state(&self, value: Decimal) -> FeatureState {
        match self {
            Discretizer::Simple => {
                if value > Decimal::ZERO {
                    FeatureState::Present
                } else {
                    FeatureState::Absent
                }
            }
            Discretizer::Thresholds { presence, absence } => {
                if value >= *presence {
                    FeatureState::Present
                } else if value <= *absence {
                    FeatureState::Absent
                } else {
                    FeatureState::Ambiguous
                }
            }
        }
    }

    /// Value at or below which a measurement counts as absent.
    pub fn absence_floor(&self) -> Decimal {
        match self {
            Discretizer::Simple => Decimal::ZERO,
            Discretizer::Thresholds { absence, .. } => *absence,
        }
    }
}

/// Labels of every cell of a table under one discretizer.
#[derive(Debug, Clone)]
pub struct StateMatrix {
    /// `states[feature][subject]`
    states: Vec<Vec<FeatureState>>,
}

impl StateMatrix {
    pub fn new(table: &Table, discretizer: &Discretizer) -> Self {
        let states = (0..table.features().len())
            .map(|f| {
                table
                    .row(f)
                    .iter()
                    .map(|v| discretizer.state(*v))
                    .collect()
            })
            .collect();
        StateMatrix { states }
    }

    pub fn get(&self, feature: usize, subject: usize) -> FeatureState {
        self.states[feature][subject]
    }

    pub fn is_present(&self, feature: usize, subject: usize) -> bool {
        self.get(feature, subject) == FeatureState::Present
    }

    pub fn is_absent(&self, feature: usize, subject: usize) -> bool {
        self.get(feature, subject) == FeatureState::Absent
    }

    /// Features present in `subject`, in table row order.
    pub fn present_features(&self, subject: usize) -> Vec<usize> {
        (0..self.states.len())
            .filter(|&f| self.is_present(f, subject))
            .collect()
    }

    /// Number of subjects other than `subject` in which `feature` is present.
    pub fn present_elsewhere(&self, feature: usize, subject: usize) -> usize {
        self.states[feature]
            .iter()
            .enumerate()
            .filter(|&(s, state)| s != subject && *state == FeatureState::Present)
            .count()
    }

    /// Subjects in which `feature` is not absent (present or ambiguous).
    pub fn carriers(&self, feature: usize) -> Vec<usize> {
        self.states[feature]
            .iter()
            .enumerate()
            .filter(|(_, state)| **state != FeatureState::Absent)
            .map(|(s, _)| s)
            .collect()
    }

    pub fn count(&self, state: FeatureState) -> usize {
        self.states
            .iter()
            .flat_map(|row| row.iter())
            .filter(|s| **s == state)
            .count()
    }
}
