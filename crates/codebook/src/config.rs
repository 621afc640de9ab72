//! Run configuration loaded from an external file.

use serde::Deserialize;

/// Optional defaults for a generation run. All fields may be absent;
/// whatever the caller passes explicitly wins over these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Default codebook type selector (`PALGA`, `NKI`, ...).
    #[serde(default)]
    pub codebook_type: Option<String>,

    /// Default for the separate-sheets layout flag.
    #[serde(default)]
    pub separate_sheets: Option<bool>,

    /// Default output directory.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Default caption overwrite file.
    #[serde(default)]
    pub overwrite_file: Option<String>,
}
