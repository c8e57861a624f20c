pub mod naming;

use crate::decode::{Category, Evaluation};
use crate::error::IdabilityError;
use crate::model::CodeSet;
use crate::parsing::codes::NULL_MARKER;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub use naming::{codes_output_name, hits_output_name};

pub const CODES_HEADER: &str = "#SAMPLE\tCODE";

/// Render a code set in codes-file format, one subject per line in id order.
pub fn render_codes(codes: &CodeSet) -> String {
    let mut out = String::new();
    out.push_str(CODES_HEADER);
    out.push('\n');
    for (subject, code) in codes {
        out.push_str(subject);
        if let Some(code) = code {
            for feature in code.features() {
                out.push('\t');
                out.push_str(feature);
            }
        }
        out.push('\n');
    }
    out
}

/// Render an evaluation in hits-file format: the confusion summary as
/// comment lines, then one line per subject.
pub fn render_hits(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        out.push_str(&format!(
            "# {}|{}: {}\n",
            category.rank(),
            category,
            evaluation.confusion.get(category)
        ));
    }
    for (subject, hits) in &evaluation.subjects {
        out.push_str(subject);
        match &hits.matches {
            None => {
                out.push_str("\tno_code\t");
                out.push_str(NULL_MARKER);
            }
            Some(matches) if matches.is_empty() => out.push_str("\tno_matches"),
            Some(matches) => {
                out.push_str("\tmatches");
                for m in matches {
                    out.push('\t');
                    out.push_str(m);
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Output text written to a temporary file next to its destination, not yet
/// visible there. Dropping it without [`StagedFile::commit`] deletes it.
pub struct StagedFile {
    file: NamedTempFile,
    path: PathBuf,
}

impl StagedFile {
    /// Move the text into place, replacing any existing file.
    pub fn commit(self) -> Result<(), IdabilityError> {
        self.file
            .persist(&self.path)
            .map_err(|e| IdabilityError::Io(e.error))?;
        Ok(())
    }
}

/// Write `contents` to a temporary file in the directory of `path`.
pub fn stage(path: &Path, contents: &str) -> Result<StagedFile, IdabilityError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(StagedFile {
        file,
        path: path.to_path_buf(),
    })
}

/// Write `contents` to `path` through a temporary file in the same directory,
/// so the destination either receives the whole text or is left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), IdabilityError> {
    stage(path, contents)?.commit()
}
