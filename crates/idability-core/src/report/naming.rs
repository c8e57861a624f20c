use std::path::{Path, PathBuf};

pub const CODES_EXTENSION: &str = "codes.txt";
pub const HITS_EXTENSION: &str = "hits.txt";

/// File name up to its first dot: `data/visit1.v2.pcl` -> `visit1`.
pub fn stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.split('.').next().unwrap_or_default();
    stem.to_string()
}

/// Default output for an encode run: `<table-stem>.codes.txt`.
pub fn codes_output_name(table: &Path) -> PathBuf {
    PathBuf::from(format!("{}.{}", stem(table), CODES_EXTENSION))
}

/// Default output for a decode run: `<table-stem>.<codes-stem>.hits.txt`.
pub fn hits_output_name(table: &Path, codes: &Path) -> PathBuf {
    PathBuf::from(format!(
        "{}.{}.{}",
        stem(table),
        stem(codes),
        HITS_EXTENSION
    ))
}
