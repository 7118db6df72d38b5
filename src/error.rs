//! Error taxonomy for the migration pipeline.
//!
//! Config and style failures are recoverable (empty fallbacks, warnings);
//! per-file parse/transform failures are caught by the orchestrator without
//! aborting the batch; only `Fatal` tears down a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    /// Malformed or unreadable manifest / alias config. Recovered locally
    /// with an empty-object fallback and a warning.
    #[error("failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A source file failed to parse into a syntax tree. The file is skipped
    /// for AST-dependent analysis and falls through to a pass-through copy.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A stylesheet failed to parse. Its style record becomes empty.
    #[error("failed to parse stylesheet {path}: {message}")]
    StyleParse { path: PathBuf, message: String },

    /// A per-file adaptation step failed. Caught per file during migration.
    #[error("failed to transform {path}: {message}")]
    Transform { path: PathBuf, message: String },

    /// Unrecoverable top-level failure, e.g. a project root that cannot be
    /// read at all. Aborts the run; already-written files are not rolled back.
    #[error("fatal: {0}")]
    Fatal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MigrateError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn transform(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        MigrateError::Transform {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
