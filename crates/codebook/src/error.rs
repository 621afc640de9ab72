//! Error types for codebook generation.

use std::io;

use thiserror::Error;

use crate::source::DataSourceError;

/// The main error type for codebook generation.
///
/// Only genuinely fatal conditions surface here; most irregularities in net
/// dumps are tolerated with a logged warning instead, since the dumps are
/// machine-generated and a best-effort codebook is more useful than none.
#[derive(Debug, Error)]
pub enum CodebookError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("caption overwrite file {path} does not start with the line {expected}")]
    OverwriteHeader { path: String, expected: String },

    #[error("unknown codebook type: {0}")]
    UnknownCodebookType(String),

    #[error("configuration error: {0}")]
    Config(String),
}
