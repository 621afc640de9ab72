//! Protocol codebook generation.
//!
//! A pathology protocol is authored as a set of workflow "nets": graphs of
//! typed nodes whose form and process steps collect data fields. This crate
//! turns the raw net dumps of one protocol into codebooks — tabular
//! descriptions of every collected concept, its caption, type, options,
//! validation rules, and the boolean condition under which the field is
//! reached — in the column layouts the downstream consumers expect.
//!
//! The pipeline: fetch net dumps through a [`DataSource`], parse each with
//! [`codebook_parser`], aggregate items per concept path, merge duplicates
//! under the variant's policy, and write one workbook per selected variant.
//! [`run`] drives the whole thing.

pub mod book;
pub mod captions;
pub mod config;
pub mod error;
pub mod protocol;
pub mod source;
pub mod variant;
pub mod workbook;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use codebook_core::item::CodebookItem;
use codebook_parser::parse_net;

pub use crate::captions::CaptionOverwriter;
pub use crate::config::RunConfig;
pub use crate::error::CodebookError;
pub use crate::protocol::Protocol;
pub use crate::source::{DataSource, DirectorySource};
pub use crate::variant::CodebookSelector;

/// Everything one generation run needs besides the data source.
#[derive(Debug)]
pub struct RunParameters {
    /// Protocol table prefix, e.g. `LPROCthorax_`.
    pub protocol_prefix: String,
    /// Explicit net selection; `None` takes every net of the protocol.
    pub nets: Option<Vec<String>>,
    /// Caption override file, when the curator has one.
    pub overwrite_file: Option<PathBuf>,
    /// Directory receiving the codebooks and the conflict report.
    pub output_dir: PathBuf,
    /// Which codebook variants to produce.
    pub selector: CodebookSelector,
    /// Options-in-separate-sheets layout for single-variant selectors.
    pub separate_sheets: bool,
}

/// Runs one full generation: parse, aggregate, merge, write.
///
/// A variant whose file cannot be written is logged and skipped; the
/// remaining variants and the conflict report are still produced.
pub fn run(params: &RunParameters, source: &dyn DataSource) -> Result<(), CodebookError> {
    let protocol = Protocol::load(&params.protocol_prefix, source)?;
    let names = match &params.nets {
        Some(names) => names.clone(),
        None => source.net_names(&params.protocol_prefix)?,
    };
    info!(protocol = protocol.name(), nets = names.len(); "generating codebooks");

    let mut items: BTreeMap<String, Vec<CodebookItem>> = BTreeMap::new();
    for name in &names {
        let data = source.net_data(name)?;
        parse_net(&data).collect_items(&mut items);
    }

    let mut overwriter = CaptionOverwriter::new(protocol.name());
    if let Some(file) = &params.overwrite_file {
        overwriter.read_file(file)?;
    }

    fs::create_dir_all(&params.output_dir)?;
    for mut book in params.selector.codebooks(params.separate_sheets) {
        // Every variant merges its own copy; merging mutates items and the
        // policies differ per variant.
        book.build(items.clone(), &mut overwriter);
        match book.write(&protocol, &params.output_dir) {
            Ok(()) => info!(file = book.file_name(&protocol); "codebook written"),
            Err(err) => {
                warn!(file = book.file_name(&protocol), err:?; "failed to write codebook, skipping")
            }
        }
    }
    overwriter.write_conflicts(&params.output_dir)?;
    Ok(())
}
