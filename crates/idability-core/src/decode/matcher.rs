use crate::decode::outcome::{categorize, Category, Confusion, Evaluation, SubjectHits};
use crate::discretize::{Discretizer, StateMatrix};
use crate::error::IdabilityError;
use crate::model::{Code, CodeSet, Table};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Subjects in which every feature of `code` is present.
///
/// Features missing from the table are never present, so a code that uses
/// one matches nobody.
pub fn match_code(table: &Table, states: &StateMatrix, code: &Code) -> Vec<usize> {
    let rows: Option<Vec<usize>> = code
        .features()
        .iter()
        .map(|f| table.feature_position(f))
        .collect();
    let Some(rows) = rows else {
        return Vec::new();
    };
    (0..table.subjects().len())
        .filter(|&s| rows.iter().all(|&f| states.is_present(f, s)))
        .collect()
}

/// Apply every code of `codes` to `table` and tally the outcomes.
pub fn evaluate(
    table: &Table,
    codes: &CodeSet,
    discretizer: &Discretizer,
) -> Result<Evaluation, IdabilityError> {
    discretizer.validate()?;
    let states = StateMatrix::new(table, discretizer);

    info!(
        codes = codes.len(),
        subjects = table.subjects().len(),
        "matching codes against table"
    );

    let mut confusion = Confusion::default();
    let mut subjects = BTreeMap::new();
    for (owner, code) in codes {
        let hits = match code {
            None => SubjectHits {
                category: categorize(false, 0, true),
                matches: None,
                unknown_features: Vec::new(),
            },
            Some(code) => evaluate_one(table, &states, owner, code),
        };
        confusion.add(hits.category);
        subjects.insert(owner.clone(), hits);
    }

    Ok(Evaluation {
        confusion,
        subjects,
    })
}

fn evaluate_one(table: &Table, states: &StateMatrix, owner: &str, code: &Code) -> SubjectHits {
    let unknown_features: Vec<String> = code
        .features()
        .iter()
        .filter(|f| table.feature_position(f).is_none())
        .cloned()
        .collect();
    if !unknown_features.is_empty() {
        debug!(subject = %owner, unknown = ?unknown_features, "code uses features missing from table");
    }

    let matched = match_code(table, states, code);
    let category = match table.subject_position(owner) {
        Some(position) => categorize(matched.contains(&position), matched.len(), false),
        None => {
            debug!(subject = %owner, "code owner missing from table");
            Category::Na
        }
    };

    SubjectHits {
        category,
        matches: Some(
            matched
                .into_iter()
                .map(|s| table.subjects()[s].clone())
                .collect(),
        ),
        unknown_features,
    }
}
