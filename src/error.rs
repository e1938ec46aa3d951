//! Error types for gameqr operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using gameqr's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gameqr operations
#[derive(Error, Debug)]
pub enum Error {
    /// A game record file could not be read from disk
    #[error("Failed to read record {path}: {source}")]
    RecordRead {
        /// Path of the offending record file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A game record file is not valid JSON
    #[error("Invalid game record {path}: {source}")]
    DataFormat {
        /// Path of the offending record file
        path: PathBuf,
        /// Underlying JSON parse error
        source: serde_json::Error,
    },

    /// The link field is absent from a game record, or is not a string
    #[error("Record {path} has no string field '{field}'")]
    MissingField {
        /// Path of the offending record file
        path: PathBuf,
        /// Name of the field that was expected
        field: String,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed (verification pass only)
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// The artifact image could not be written
    #[error("Failed to write {path}: {source}")]
    ImageWrite {
        /// Target path of the artifact
        path: PathBuf,
        /// Underlying image error
        source: image::ImageError,
    },

    /// A written artifact did not decode back to its source link
    #[error("Verification failed for {path}: {reason}")]
    Verify {
        /// Path of the artifact that failed verification
        path: PathBuf,
        /// What went wrong while decoding or comparing
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is tied to a single record rather than the whole run.
    ///
    /// Record-scoped errors can be skipped under [`FailureMode::Skip`];
    /// everything else aborts the batch regardless of policy.
    ///
    /// [`FailureMode::Skip`]: crate::config::FailureMode::Skip
    pub fn is_record_scoped(&self) -> bool {
        matches!(
            self,
            Error::RecordRead { .. }
                | Error::DataFormat { .. }
                | Error::MissingField { .. }
                | Error::QrEncode(_)
                | Error::ImageWrite { .. }
                | Error::Verify { .. }
        )
    }
}
