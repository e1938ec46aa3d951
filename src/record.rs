//! Game record parsing and link extraction

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed `game.json` metadata file
///
/// Records are produced by an external build pipeline and are read-only
/// here. All keys are retained so callers can pull out whichever link
/// field is configured, plus the optional `title` for log context.
#[derive(Debug, Clone)]
pub struct GameRecord {
    path: PathBuf,
    data: Map<String, Value>,
}

impl GameRecord {
    /// Load and parse a record from disk.
    ///
    /// An unreadable file is a [`Error::RecordRead`]; anything other than
    /// a JSON object (including non-UTF-8 bytes) is a [`Error::DataFormat`].
    /// Both carry the record's path so one broken record can be reported
    /// and skipped without stopping the batch.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read(path).map_err(|source| Error::RecordRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Map<String, Value> =
            serde_json::from_slice(&contents).map_err(|source| Error::DataFormat {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Path of the source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the record; artifacts are written here
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Optional game title, used for log context only
    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(Value::as_str)
    }

    /// Extract the string value of `field`.
    ///
    /// A missing key and a present-but-non-string value both surface as
    /// [`Error::MissingField`] naming the record path.
    pub fn link(&self, field: &str) -> Result<&str> {
        self.data
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MissingField {
                path: self.path.clone(),
                field: field.to_string(),
            })
    }
}
