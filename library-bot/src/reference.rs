//! Reference document: static library data supplied as context to every completion request.
//!
//! The YAML file is read and parsed on every call to [`ReferenceDocument::load`]; nothing is
//! cached between requests, so edits to the file take effect on the next message.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Failure to load the reference document. Fatal for the request that triggered it.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("failed to read reference data {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reference data {path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("reference data {path} is empty")]
    Empty { path: PathBuf },
}

/// Immutable reference text for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocument {
    text: String,
}

impl ReferenceDocument {
    /// Reads and parses the YAML file at `path`, then renders it back to canonical YAML text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading reference document");
        let raw = std::fs::read_to_string(path).map_err(|source| ReferenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_yaml(&raw, path)
    }

    fn parse_yaml(raw: &str, path: &Path) -> Result<Self, ReferenceError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(raw).map_err(|source| ReferenceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if value.is_null() {
            return Err(ReferenceError::Empty {
                path: path.to_path_buf(),
            });
        }
        let text = serde_yaml::to_string(&value).map_err(|source| ReferenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.trim_end().to_string();
        debug!(text_len = text.len(), "Reference document loaded");
        Ok(Self { text })
    }

    /// Wraps already-rendered reference text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ReferenceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
