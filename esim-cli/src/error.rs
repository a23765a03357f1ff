use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Locating, parsing, or writing the spreadsheet import failed
    #[error("{0}")]
    Import(#[from] esim_import::ImportError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
