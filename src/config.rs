//! gameqr runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameQrConfig {
    /// Batch processing configuration overrides
    pub batch: BatchOptions,
    /// QR encoding configuration overrides
    pub encoding: EncodingOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Path of the file this configuration was loaded from, if any.
    ///
    /// Recorded so callers can log the config source once the tracing
    /// subscriber is installed; loading happens before logging is up.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for GameQrConfig {
    fn default() -> Self {
        Self {
            batch: BatchOptions::default(),
            encoding: EncodingOptions::default(),
            logging: LoggingOptions::default(),
            source: None,
        }
    }
}

impl GameQrConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            let mut config = Self::from_file(path)?;
            config.source = Some(path.to_path_buf());
            config
        } else if let Some(path) = Self::discover_file()? {
            let mut config = Self::from_file(&path)?;
            config.source = Some(path);
            config
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["gameqr.toml", "gameqr.yaml", "gameqr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("gameqr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.batch.apply_env_overrides();
        self.encoding.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Batch processing overrides merged on top of the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Metadata key whose value is encoded (default `download_link`)
    pub field: String,
    /// Filename for the generated artifact in each record directory
    pub output_name: String,
    /// What to do when a single record fails
    pub on_error: FailureMode,
    /// Decode each written artifact and compare against the source link
    pub verify: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            field: "download_link".to_string(),
            output_name: "qr.png".to_string(),
            on_error: FailureMode::Skip,
            verify: false,
        }
    }
}

impl BatchOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(field) = env::var("GAMEQR_FIELD") {
            if !field.trim().is_empty() {
                self.field = field;
            }
        }
        if let Ok(name) = env::var("GAMEQR_OUTPUT_NAME") {
            if !name.trim().is_empty() {
                self.output_name = name;
            }
        }
        if let Ok(mode) = env::var("GAMEQR_ON_ERROR") {
            if let Ok(parsed) = mode.parse::<FailureMode>() {
                self.on_error = parsed;
            }
        }
        if let Ok(verify) = env::var("GAMEQR_VERIFY") {
            match verify.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => self.verify = true,
                "0" | "false" | "off" => self.verify = false,
                _ => {}
            }
        }
    }
}

/// Policy applied when a single record cannot be processed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Report the record's error and continue with the rest of the batch
    Skip,
    /// Terminate the whole run on the first record error
    Abort,
}

impl FailureMode {
    /// Parse a failure mode identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

impl FromStr for FailureMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| format!("Unsupported failure mode '{value}', expected 'skip' or 'abort'"))
    }
}

/// QR encoding overrides merged on top of [`EncodingOptions::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOptions {
    /// Error correction level: `l`, `m`, `q`, or `h`
    pub ecc: EccLevel,
    /// Minimum rendered width/height in pixels
    pub min_size: u32,
    /// Render the standard 4-module quiet zone around the code
    pub quiet_zone: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            ecc: EccLevel::Medium,
            min_size: 400,
            quiet_zone: true,
        }
    }
}

impl EncodingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(ecc) = env::var("GAMEQR_ECC") {
            if let Ok(parsed) = ecc.parse::<EccLevel>() {
                self.ecc = parsed;
            }
        }
        if let Ok(size) = env::var("GAMEQR_MIN_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.min_size = parsed;
            }
        }
    }
}

/// QR error correction level exposed through configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    /// ~7% recovery
    #[serde(alias = "l")]
    Low,
    /// ~15% recovery
    #[serde(alias = "m")]
    Medium,
    /// ~25% recovery
    #[serde(alias = "q")]
    Quartile,
    /// ~30% recovery
    #[serde(alias = "h")]
    High,
}

impl EccLevel {
    /// Parse an ECC identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl FromStr for EccLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| format!("Unsupported ECC level '{value}', expected L, M, Q, or H"))
    }
}

impl From<EccLevel> for qrcode::EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::Low => qrcode::EcLevel::L,
            EccLevel::Medium => qrcode::EcLevel::M,
            EccLevel::Quartile => qrcode::EcLevel::Q,
            EccLevel::High => qrcode::EcLevel::H,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `GAMEQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("GAMEQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("GAMEQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("GAMEQR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("GAMEQR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
