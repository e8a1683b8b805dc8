//! CLI error type

use std::path::{Path, PathBuf};

use tabula_lib::TableError;
use thiserror::Error;

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("invalid filter '{0}': expected column=value")]
    InvalidFilter(String),
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("no row with key '{0}'")]
    UnknownRow(String),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl CliError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
