//! Data-source abstraction for protocol workspaces.
//!
//! A protocol lives somewhere as a set of named net dumps plus a settings
//! blob. The pipeline only needs the three operations of [`DataSource`];
//! where the data actually resides (a directory, an export, a database
//! snapshot) is the caller's concern. [`DirectorySource`] is the shipped
//! implementation over a plain directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while fetching protocol data. Always fatal to the run.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("I/O error reading the data source: {0}")]
    Io(#[from] io::Error),

    #[error("net {0} not found in the data source")]
    MissingNet(String),

    #[error("no settings found in the data source")]
    MissingSettings,
}

/// Read access to one protocol's raw data.
pub trait DataSource {
    /// Names of the nets belonging to the protocol with the given table
    /// prefix. Nets marked `_discontinued` are excluded.
    fn net_names(&self, prefix: &str) -> Result<Vec<String>, DataSourceError>;

    /// The raw dump text of one net.
    fn net_data(&self, name: &str) -> Result<String, DataSourceError>;

    /// The raw settings blob, holding among others `version = "…"`.
    fn settings(&self) -> Result<String, DataSourceError>;
}

/// A [`DataSource`] over a workspace directory holding `<name>.net` files
/// and a `settings` file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirectorySource {
    fn net_names(&self, prefix: &str) -> Result<Vec<String>, DataSourceError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "net") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.starts_with(prefix) && !stem.contains("_discontinued") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn net_data(&self, name: &str) -> Result<String, DataSourceError> {
        let path = self.root.join(format!("{name}.net"));
        match fs::read_to_string(&path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(DataSourceError::MissingNet(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn settings(&self) -> Result<String, DataSourceError> {
        let path = self.root.join("settings");
        match fs::read_to_string(&path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(DataSourceError::MissingSettings)
            }
            Err(err) => Err(err.into()),
        }
    }
}
