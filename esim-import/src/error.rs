use std::path::PathBuf;

use esim_db::{OperationError, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file not found. Tried: {}", display_paths(.tried))]
    FileNotFound { tried: Vec<PathBuf> },
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Database error: {0}")]
    Schema(#[from] SchemaError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
