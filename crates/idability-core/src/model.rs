use crate::error::IdabilityError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Presence label of one feature in one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureState {
    Present,
    Absent,
    Ambiguous,
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureState::Present => write!(f, "present"),
            FeatureState::Absent => write!(f, "absent"),
            FeatureState::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// A feature-by-subject measurement table.
///
/// Rows are features, columns are subjects. Both keep the order they were
/// given in, which is what tie-breaks and match listings rely on.
#[derive(Debug, Clone)]
pub struct Table {
    label: String,
    subjects: Vec<String>,
    features: Vec<String>,
    /// `values[feature][subject]`
    values: Vec<Vec<Decimal>>,
    subject_index: HashMap<String, usize>,
    feature_index: HashMap<String, usize>,
}

impl Table {
    /// Build a table from subject ids and `(feature id, values)` rows.
    ///
    /// Every row must carry exactly one value per subject. Duplicate and
    /// empty ids are rejected. Reported line numbers assume the header is
    /// line 1 and row `i` is line `i + 2`.
    pub fn new(
        label: impl Into<String>,
        subjects: Vec<String>,
        rows: Vec<(String, Vec<Decimal>)>,
    ) -> Result<Self, IdabilityError> {
        let mut subject_index = HashMap::with_capacity(subjects.len());
        for (i, subject) in subjects.iter().enumerate() {
            if subject.is_empty() {
                return Err(IdabilityError::TableParse {
                    line: 1,
                    reason: format!("empty subject id in column {}", i + 2),
                });
            }
            if subject_index.insert(subject.clone(), i).is_some() {
                return Err(IdabilityError::TableParse {
                    line: 1,
                    reason: format!("duplicate subject id '{subject}'"),
                });
            }
        }

        let mut features = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        let mut feature_index = HashMap::with_capacity(rows.len());
        for (i, (feature, row)) in rows.into_iter().enumerate() {
            let line = i + 2;
            if feature.is_empty() {
                return Err(IdabilityError::TableParse {
                    line,
                    reason: "empty feature id".into(),
                });
            }
            if row.len() != subjects.len() {
                return Err(IdabilityError::TableParse {
                    line,
                    reason: format!(
                        "feature '{}' has {} values but the header lists {} subjects",
                        feature,
                        row.len(),
                        subjects.len()
                    ),
                });
            }
            if feature_index.insert(feature.clone(), i).is_some() {
                return Err(IdabilityError::TableParse {
                    line,
                    reason: format!("duplicate feature id '{feature}'"),
                });
            }
            features.push(feature);
            values.push(row);
        }

        Ok(Table {
            label: label.into(),
            subjects,
            features,
            values,
            subject_index,
            feature_index,
        })
    }

    /// Header text of the id column.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn subject_position(&self, subject: &str) -> Option<usize> {
        self.subject_index.get(subject).copied()
    }

    pub fn feature_position(&self, feature: &str) -> Option<usize> {
        self.feature_index.get(feature).copied()
    }

    /// All values of one feature, in subject order.
    pub fn row(&self, feature: usize) -> &[Decimal] {
        &self.values[feature]
    }

    pub fn value(&self, feature: usize, subject: usize) -> Decimal {
        self.values[feature][subject]
    }

    /// Value lookup by ids; unknown ids read as zero.
    pub fn value_of(&self, feature: &str, subject: &str) -> Decimal {
        match (self.feature_position(feature), self.subject_position(subject)) {
            (Some(f), Some(s)) => self.value(f, s),
            _ => Decimal::ZERO,
        }
    }
}

/// Ordered, duplicate-free feature ids identifying one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code(Vec<String>);

impl Code {
    /// Wrap a feature list, rejecting repeated features.
    pub fn new(features: Vec<String>) -> Result<Self, String> {
        for (i, feature) in features.iter().enumerate() {
            if features[..i].contains(feature) {
                return Err(format!("feature '{feature}' appears twice in one code"));
            }
        }
        Ok(Code(features))
    }

    /// Wrap a feature list already known to be duplicate-free.
    pub(crate) fn from_distinct(features: Vec<String>) -> Self {
        debug_assert!(Code::new(features.clone()).is_ok());
        Code(features)
    }

    pub fn features(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Codes keyed by subject id. `None` marks a subject no code could be built for.
pub type CodeSet = BTreeMap<String, Option<Code>>;
