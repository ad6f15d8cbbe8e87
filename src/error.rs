use std::io;
use std::path::PathBuf;

/// Failures at the crate's outer surfaces. Parsing and layout never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid row `{0}`, expected table.column")]
    InvalidRow(String),
}
