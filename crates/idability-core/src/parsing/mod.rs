pub mod codes;
pub mod values;

use crate::error::IdabilityError;
use crate::model::Table;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use values::parse_value;

pub use codes::{load_codes, parse_codes};

/// Load a tab-delimited feature table from a file.
pub fn load_table(path: &Path) -> Result<Table, IdabilityError> {
    let content = std::fs::read_to_string(path)?;
    let table = parse_table(&content)?;
    debug!(
        path = %path.display(),
        subjects = table.subjects().len(),
        features = table.features().len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse a tab-delimited feature table.
///
/// The first non-blank line is the header: a label cell followed by subject
/// ids. Every further non-blank line is a feature id followed by exactly one
/// value per subject; blank cells read as zero.
pub fn parse_table(content: &str) -> Result<Table, IdabilityError> {
    let mut lines = numbered_lines(content);

    let Some((header_line, header)) = lines.next() else {
        return Err(IdabilityError::TableParse {
            line: 1,
            reason: "no header row found".into(),
        });
    };
    let mut cells = header.split('\t');
    let label = cells.next().unwrap_or_default().trim().to_string();
    let subjects: Vec<String> = cells.map(|c| c.trim().to_string()).collect();
    if subjects.is_empty() {
        return Err(IdabilityError::TableParse {
            line: header_line,
            reason: "header lists no subjects".into(),
        });
    }
    let mut seen_subjects = HashSet::new();
    for (i, subject) in subjects.iter().enumerate() {
        if subject.is_empty() {
            return Err(IdabilityError::TableParse {
                line: header_line,
                reason: format!("empty subject id in column {}", i + 2),
            });
        }
        if !seen_subjects.insert(subject.as_str()) {
            return Err(IdabilityError::TableParse {
                line: header_line,
                reason: format!("duplicate subject id '{subject}'"),
            });
        }
    }

    let mut rows = Vec::new();
    let mut seen_features = HashSet::new();
    for (line, text) in lines {
        let cells: Vec<&str> = text.split('\t').collect();
        let feature = cells[0].trim().to_string();
        if feature.is_empty() {
            return Err(IdabilityError::TableParse {
                line,
                reason: "empty feature id".into(),
            });
        }
        if cells.len() - 1 != subjects.len() {
            return Err(IdabilityError::TableParse {
                line,
                reason: format!(
                    "row has {} values but the header lists {} subjects",
                    cells.len() - 1,
                    subjects.len()
                ),
            });
        }
        if !seen_features.insert(feature.clone()) {
            return Err(IdabilityError::TableParse {
                line,
                reason: format!("duplicate feature id '{feature}'"),
            });
        }

        let mut row = Vec::with_capacity(subjects.len());
        for (i, cell) in cells[1..].iter().enumerate() {
            let value = parse_value(cell).map_err(|reason| IdabilityError::TableParse {
                line,
                reason: format!("column {}: {}", i + 2, reason),
            })?;
            row.push(value);
        }
        rows.push((feature, row));
    }

    Table::new(label, subjects, rows)
}

/// Non-blank lines with their 1-based line numbers, line endings stripped.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty())
}
