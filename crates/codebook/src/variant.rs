//! Codebook variants and selection.

use std::fmt;
use std::str::FromStr;

use codebook_core::merge::MergePolicy;

use crate::book::Codebook;
use crate::error::CodebookError;

/// The downstream consumer a codebook is shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodebookKind {
    /// The registry's own column layout, entry conditions included.
    Palga,
    /// The web variant: the registry layout without entry conditions.
    PalgaWeb,
    /// The institute layout meant for translation and ontology curation.
    Nki,
    /// Everything, node bookkeeping columns included.
    Debug,
}

impl CodebookKind {
    /// The uppercase tag used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            CodebookKind::Palga => "PALGA",
            CodebookKind::PalgaWeb => "PALGAWEB",
            CodebookKind::Nki => "NKI",
            CodebookKind::Debug => "DEBUG",
        }
    }

    /// NKI output feeds curation tooling that reconciles near-equivalent
    /// types later; everyone else needs exact agreement.
    pub fn merge_policy(self) -> MergePolicy {
        match self {
            CodebookKind::Nki => MergePolicy::Lenient,
            _ => MergePolicy::Strict,
        }
    }
}

impl fmt::Display for CodebookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which codebooks one run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodebookSelector {
    Palga,
    PalgaWeb,
    Nki,
    Debug,
    /// The delivery bundle: NKI (separate sheets) plus PALGA and PALGAWEB
    /// in both layouts.
    Combined,
}

impl FromStr for CodebookSelector {
    type Err = CodebookError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let selector = if value.eq_ignore_ascii_case("PALGA") {
            CodebookSelector::Palga
        } else if value.eq_ignore_ascii_case("PALGAWEB") {
            CodebookSelector::PalgaWeb
        } else if value.eq_ignore_ascii_case("NKI") {
            CodebookSelector::Nki
        } else if value.eq_ignore_ascii_case("DEBUG") {
            CodebookSelector::Debug
        } else if value.eq_ignore_ascii_case("PALGA & NKI") {
            CodebookSelector::Combined
        } else {
            return Err(CodebookError::UnknownCodebookType(format!(
                "{value}. Valid options: {{PALGA, PALGAWEB, NKI, DEBUG, PALGA & NKI}}"
            )));
        };
        Ok(selector)
    }
}

impl CodebookSelector {
    /// The codebooks to produce. A single selector takes the caller's
    /// sheet layout; the combined bundle has its layouts fixed.
    pub fn codebooks(self, separate_sheets: bool) -> Vec<Codebook> {
        match self {
            CodebookSelector::Palga => vec![Codebook::new(CodebookKind::Palga, separate_sheets)],
            CodebookSelector::PalgaWeb => {
                vec![Codebook::new(CodebookKind::PalgaWeb, separate_sheets)]
            }
            CodebookSelector::Nki => vec![Codebook::new(CodebookKind::Nki, separate_sheets)],
            CodebookSelector::Debug => vec![Codebook::new(CodebookKind::Debug, separate_sheets)],
            CodebookSelector::Combined => vec![
                Codebook::new(CodebookKind::Nki, true),
                Codebook::new(CodebookKind::Palga, false),
                Codebook::new(CodebookKind::Palga, true),
                Codebook::new(CodebookKind::PalgaWeb, false),
                Codebook::new(CodebookKind::PalgaWeb, true),
            ],
        }
    }
}
