//! Adapts [`CodebookError`] into standalone [`miette`] diagnostics.
//!
//! The library's error type stays free of reporting concerns; this module
//! wraps each failure in a [`Reportable`] carrying the diagnostic code and
//! help text the terminal report shows.

use miette::Diagnostic;
use thiserror::Error;

use codebook::CodebookError;

/// One renderable diagnostic derived from a run failure.
#[derive(Debug, Error, Diagnostic)]
pub enum Reportable {
    #[error("I/O error: {0}")]
    #[diagnostic(code(codebook::io))]
    Io(String),

    #[error("data source error: {0}")]
    #[diagnostic(
        code(codebook::data_source),
        help("check that the workspace directory holds the protocol's .net dumps and its settings file")
    )]
    DataSource(String),

    #[error("caption overwrite file {path} does not start with the line {expected}")]
    #[diagnostic(
        code(codebook::overwrite_header),
        help("the first line of an overwrite file names the protocol it belongs to; regenerate the file for this protocol")
    )]
    OverwriteHeader { path: String, expected: String },

    #[error("unknown codebook type: {0}")]
    #[diagnostic(code(codebook::unknown_type))]
    UnknownCodebookType(String),

    #[error("configuration error: {0}")]
    #[diagnostic(code(codebook::config))]
    Config(String),
}

/// Converts a run failure into the diagnostics to render.
pub fn to_reportables(err: &CodebookError) -> Vec<Reportable> {
    let reportable = match err {
        CodebookError::Io(inner) => Reportable::Io(inner.to_string()),
        CodebookError::DataSource(inner) => Reportable::DataSource(inner.to_string()),
        CodebookError::OverwriteHeader { path, expected } => Reportable::OverwriteHeader {
            path: path.clone(),
            expected: expected.clone(),
        },
        CodebookError::UnknownCodebookType(inner) => {
            Reportable::UnknownCodebookType(inner.clone())
        }
        CodebookError::Config(inner) => Reportable::Config(inner.clone()),
    };
    vec![reportable]
}
