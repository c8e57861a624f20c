use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IdabilityError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown preset '{name}'. Available: {available}")]
    UnknownPreset { name: String, available: String },

    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("table line {line}: {reason}")]
    TableParse { line: usize, reason: String },

    #[error("codes line {line}: {reason}")]
    CodesParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
