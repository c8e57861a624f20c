use crate::error::IdabilityError;
use crate::model::{Code, CodeSet};
use std::path::Path;

/// Marker some codes files use for a subject without a code.
pub const NULL_MARKER: &str = "#N/A";

/// Load a codes file written by an earlier encode run.
pub fn load_codes(path: &Path) -> Result<CodeSet, IdabilityError> {
    let content = std::fs::read_to_string(path)?;
    parse_codes(&content)
}

/// Parse a codes file.
///
/// Lines starting with `#` are comments. Each other line holds a subject id
/// followed by its code's features; a line with no features (or with the
/// `#N/A` marker) is a subject without a code.
pub fn parse_codes(content: &str) -> Result<CodeSet, IdabilityError> {
    let mut codes = CodeSet::new();

    for (i, raw) in content.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim_end_matches('\r');
        if text.trim().is_empty() || text.starts_with('#') {
            continue;
        }

        let mut cells = text.split('\t').map(str::trim);
        let subject = cells.next().unwrap_or_default().to_string();
        if subject.is_empty() {
            return Err(IdabilityError::CodesParse {
                line,
                reason: "empty subject id".into(),
            });
        }
        let features: Vec<String> = cells
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let code = if features.is_empty() || features.iter().any(|f| f == NULL_MARKER) {
            None
        } else {
            let code = Code::new(features).map_err(|reason| IdabilityError::CodesParse {
                line,
                reason: format!("subject '{subject}': {reason}"),
            })?;
            Some(code)
        };

        if codes.insert(subject.clone(), code).is_some() {
            return Err(IdabilityError::CodesParse {
                line,
                reason: format!("duplicate subject id '{subject}'"),
            });
        }
    }

    Ok(codes)
}
