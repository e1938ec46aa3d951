//! Sequential batch runner
//!
//! Walks the discovered records one at a time, turning each
//! `download_link` into a PNG artifact next to its source file. There is
//! deliberately no concurrency: each record is opened, read, and closed
//! before the next one is touched, so a failure can never corrupt an
//! artifact already written for another record.

use crate::config::{BatchOptions, FailureMode, GameQrConfig};
use crate::discovery::discover_records;
use crate::error::{Error, Result};
use crate::qr::{QrDecoder, QrEncoder};
use crate::record::GameRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Batch QR generator over a game metadata tree
pub struct BatchGenerator {
    options: BatchOptions,
    encoder: QrEncoder,
    decoder: QrDecoder,
    dry_run: bool,
}

impl BatchGenerator {
    /// Create a generator from resolved configuration
    pub fn new(config: &GameQrConfig) -> Self {
        Self {
            options: config.batch.clone(),
            encoder: QrEncoder::new(&config.encoding),
            decoder: QrDecoder::new(),
            dry_run: false,
        }
    }

    /// Discover and parse records without writing any artifacts
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the batch over every record found under `root`.
    ///
    /// Under [`FailureMode::Skip`] a record-scoped error is reported and
    /// counted but does not stop the run; under [`FailureMode::Abort`] the
    /// first error is returned as-is. Errors not tied to a single record
    /// (an unreadable root, a broken config) always abort.
    pub fn run(&self, root: &Path) -> Result<BatchReport> {
        let records = discover_records(root)?;
        info!(
            root = %root.display(),
            records = records.len(),
            "Starting QR batch"
        );

        let mut report = BatchReport {
            dry_run: self.dry_run,
            ..BatchReport::default()
        };

        for record_path in &records {
            match self.process(record_path) {
                Ok(artifact) => {
                    report.generated += 1;
                    if !self.dry_run {
                        report.artifacts.push(artifact);
                    }
                }
                Err(err) if err.is_record_scoped() => match self.options.on_error {
                    FailureMode::Skip => {
                        warn!(record = %record_path.display(), "Skipping record: {err}");
                        report.failures.push(RecordFailure {
                            path: record_path.clone(),
                            error: err.to_string(),
                        });
                    }
                    FailureMode::Abort => return Err(err),
                },
                Err(err) => return Err(err),
            }
        }

        info!(
            generated = report.generated,
            failed = report.failures.len(),
            "QR batch finished"
        );
        Ok(report)
    }

    /// Process a single record, returning the path of the written artifact.
    fn process(&self, record_path: &Path) -> Result<PathBuf> {
        info!(record = %record_path.display(), "Generating QR code");

        let record = GameRecord::load(record_path)?;
        let link = record.link(&self.options.field)?;
        if let Some(title) = record.title() {
            tracing::debug!(title, link, "Parsed record");
        }

        let target = record.dir().join(&self.options.output_name);
        if self.dry_run {
            return Ok(target);
        }

        let image = self.encoder.encode_str(link)?;
        image.save(&target).map_err(|source| Error::ImageWrite {
            path: target.clone(),
            source,
        })?;

        if self.options.verify {
            self.verify(&target, link)?;
        }

        Ok(target)
    }

    /// Read a freshly written artifact back and compare its payload.
    fn verify(&self, artifact: &Path, expected: &str) -> Result<()> {
        let image = image::open(artifact).map_err(|e| Error::Verify {
            path: artifact.to_path_buf(),
            reason: format!("could not reopen artifact: {e}"),
        })?;

        let decoded = self.decoder.decode(&image).map_err(|e| Error::Verify {
            path: artifact.to_path_buf(),
            reason: e.to_string(),
        })?;

        if decoded != expected {
            return Err(Error::Verify {
                path: artifact.to_path_buf(),
                reason: format!("decoded payload '{decoded}' does not match source link"),
            });
        }

        Ok(())
    }
}

/// Aggregate outcome of one batch run
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Number of records successfully processed
    pub generated: usize,
    /// Paths of the artifacts written this run
    pub artifacts: Vec<PathBuf>,
    /// Records that failed and were skipped
    pub failures: Vec<RecordFailure>,
    /// Whether this run wrote anything at all
    pub dry_run: bool,
}

impl BatchReport {
    /// True when every discovered record was processed successfully
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary lines for non-JSON output
    pub fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.dry_run {
            lines.push(format!("Dry run: {} record(s) parsed", self.generated));
        } else {
            lines.push(format!("Generated {} QR artifact(s)", self.generated));
        }
        for failure in &self.failures {
            lines.push(format!("  failed: {}", failure.error));
        }
        lines
    }
}

/// A single record that could not be processed
#[derive(Debug, Serialize)]
pub struct RecordFailure {
    /// Path of the record file
    pub path: PathBuf,
    /// Rendered error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn seed_game(root: &Path, name: &str, contents: &str) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("game.json"), contents).unwrap();
    }

    #[test]
    fn test_empty_root_is_clean() {
        let root = TempDir::new().unwrap();
        let generator = BatchGenerator::new(&GameQrConfig::default());

        let report = generator.run(root.path()).unwrap();
        assert_eq!(report.generated, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_generates_artifact_per_record() {
        let root = TempDir::new().unwrap();
        seed_game(
            root.path(),
            "alpha",
            r#"{"download_link": "https://example.com/a"}"#,
        );
        seed_game(
            root.path(),
            "beta",
            r#"{"download_link": "https://example.com/b"}"#,
        );

        let generator = BatchGenerator::new(&GameQrConfig::default());
        let report = generator.run(root.path()).unwrap();

        assert_eq!(report.generated, 2);
        assert!(root.path().join("alpha").join("qr.png").is_file());
        assert!(root.path().join("beta").join("qr.png").is_file());
    }

    #[test]
    fn test_skip_mode_continues_past_bad_record() {
        let root = TempDir::new().unwrap();
        seed_game(root.path(), "bad", "{ this is not json");
        seed_game(
            root.path(),
            "good",
            r#"{"download_link": "https://example.com/good"}"#,
        );

        let generator = BatchGenerator::new(&GameQrConfig::default());
        let report = generator.run(root.path()).unwrap();

        assert_eq!(report.generated, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad/game.json"));
        assert!(root.path().join("good").join("qr.png").is_file());
    }

    #[test]
    fn test_skip_mode_continues_past_non_utf8_record() {
        let root = TempDir::new().unwrap();
        let bad = root.path().join("bad");
        fs::create_dir(&bad).unwrap();
        fs::write(bad.join("game.json"), [0xFF, 0xFE, 0x00, b'{']).unwrap();
        seed_game(
            root.path(),
            "good",
            r#"{"download_link": "https://example.com/good"}"#,
        );

        let generator = BatchGenerator::new(&GameQrConfig::default());
        let report = generator.run(root.path()).unwrap();

        assert_eq!(report.generated, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad/game.json"));
        assert!(root.path().join("good").join("qr.png").is_file());
    }

    #[test]
    fn test_abort_mode_stops_on_first_error() {
        let root = TempDir::new().unwrap();
        // "aa" sorts before "bb", so the bad record is hit first
        seed_game(root.path(), "aa-bad", r#"{"title": "no link"}"#);
        seed_game(
            root.path(),
            "bb-good",
            r#"{"download_link": "https://example.com/late"}"#,
        );

        let mut config = GameQrConfig::default();
        config.batch.on_error = FailureMode::Abort;
        let generator = BatchGenerator::new(&config);

        let err = generator.run(root.path()).unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
        assert!(!root.path().join("bb-good").join("qr.png").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let root = TempDir::new().unwrap();
        seed_game(
            root.path(),
            "alpha",
            r#"{"download_link": "https://example.com/a"}"#,
        );

        let generator = BatchGenerator::new(&GameQrConfig::default()).with_dry_run(true);
        let report = generator.run(root.path()).unwrap();

        assert_eq!(report.generated, 1);
        assert!(report.artifacts.is_empty());
        assert!(!root.path().join("alpha").join("qr.png").exists());
    }

    #[test]
    fn test_verify_pass_accepts_own_output() {
        let root = TempDir::new().unwrap();
        seed_game(
            root.path(),
            "alpha",
            r#"{"download_link": "https://example.com/verified"}"#,
        );

        let mut config = GameQrConfig::default();
        config.batch.verify = true;
        let generator = BatchGenerator::new(&config);

        let report = generator.run(root.path()).unwrap();
        assert_eq!(report.generated, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_verify_rejects_mismatched_artifact() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("qr.png");
        QrEncoder::default()
            .encode_str("https://example.com/other")
            .unwrap()
            .save(&artifact)
            .unwrap();

        let generator = BatchGenerator::new(&GameQrConfig::default());
        let err = generator
            .verify(&artifact, "https://example.com/expected")
            .unwrap_err();
        assert!(matches!(err, Error::Verify { .. }));
        assert!(err.is_record_scoped());
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_verify_rejects_undecodable_artifact() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("qr.png");
        fs::write(&artifact, b"not a png").unwrap();

        let generator = BatchGenerator::new(&GameQrConfig::default());
        let err = generator
            .verify(&artifact, "https://example.com/expected")
            .unwrap_err();
        assert!(matches!(err, Error::Verify { .. }));
    }

    #[test]
    fn test_custom_output_name() {
        let root = TempDir::new().unwrap();
        seed_game(
            root.path(),
            "alpha",
            r#"{"download_link": "https://example.com/a"}"#,
        );

        let mut config = GameQrConfig::default();
        config.batch.output_name = "download-qr.png".to_string();
        let generator = BatchGenerator::new(&config);

        generator.run(root.path()).unwrap();
        assert!(root.path().join("alpha").join("download-qr.png").is_file());
    }
}
