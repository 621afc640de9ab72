//! Protocol identity and version metadata.

use codebook_parser::quoted_field;

use crate::source::{DataSource, DataSourceError};

/// One protocol as identified by its table prefix.
///
/// The display name is the prefix minus its trailing separator character;
/// the small version is the text after the last dot of the full version
/// string (the part that changes between protocol releases).
#[derive(Debug, Clone)]
pub struct Protocol {
    table_prefix: String,
    name: String,
    version: String,
    small_version: String,
}

impl Protocol {
    /// Reads the protocol metadata from the source's settings blob.
    pub fn load(table_prefix: &str, source: &dyn DataSource) -> Result<Self, DataSourceError> {
        let settings = source.settings()?;
        let version = quoted_field(&settings, "version");
        let small_version = match version.rfind('.') {
            Some(idx) if idx > 0 => version[idx + 1..].to_string(),
            _ => version.clone(),
        };
        let mut name = table_prefix.to_string();
        name.pop();
        Ok(Self {
            table_prefix: table_prefix.to_string(),
            name,
            version,
            small_version,
        })
    }

    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn small_version(&self) -> &str {
        &self.small_version
    }
}
