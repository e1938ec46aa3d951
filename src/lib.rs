//! gameqr - batch QR code generator for game metadata trees
//!
//! Scans a directory of game entries, reads the `download_link` field out
//! of each `game.json`, and writes a scannable `qr.png` next to it.
//!
//! # Example
//!
//! ```no_run
//! use gameqr::{BatchGenerator, GameQrConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = GameQrConfig::default();
//!     let report = BatchGenerator::new(&config).run(Path::new("build/games"))?;
//!
//!     println!("Generated {} artifact(s)", report.generated);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod qr;
pub mod record;

// Re-exports for convenience
pub use batch::{BatchGenerator, BatchReport, RecordFailure};
pub use config::{
    BatchOptions, EccLevel, EncodingOptions, FailureMode, GameQrConfig, LogRotation, LoggingOptions,
};
pub use discovery::{RECORD_FILE_NAME, discover_records};
pub use error::{Error, Result};
pub use qr::{QrDecoder, QrEncoder};
pub use record::GameRecord;
