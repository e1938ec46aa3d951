//! Filesystem enumeration of game records

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Name a metadata file must carry exactly to count as a record
pub const RECORD_FILE_NAME: &str = "game.json";

/// Find all record files one level below `root`.
///
/// A match is an immediate subdirectory of `root` containing a file named
/// exactly `game.json`. Deeper nesting is ignored, as are loose files at
/// the root. Results are sorted by path so repeated runs process records
/// in a stable order.
pub fn discover_records(root: &Path) -> Result<Vec<PathBuf>> {
    let mut records = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let candidate = dir.join(RECORD_FILE_NAME);
        if candidate.is_file() {
            records.push(candidate);
        }
    }

    records.sort();
    Ok(records)
}
