//! gameqr CLI entrypoint

use anyhow::Context;
use clap::Parser;
use gameqr::{BatchGenerator, BatchReport, EccLevel, FailureMode, GameQrConfig, logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "gameqr",
    version,
    about = "Generate QR code artifacts for a tree of game metadata files"
)]
struct Cli {
    /// Root directory containing one subdirectory per game
    root: PathBuf,

    /// Optional configuration file (toml/yaml). Defaults to gameqr.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Metadata key whose value is encoded
    #[arg(long, value_name = "NAME")]
    field: Option<String>,

    /// Filename for the generated artifact in each game directory
    #[arg(long, value_name = "NAME")]
    output_name: Option<String>,

    /// Error correction level (L, M, Q, or H)
    #[arg(long, value_name = "LEVEL")]
    ecc: Option<EccLevel>,

    /// Minimum rendered width/height in pixels
    #[arg(long, value_name = "PX")]
    min_size: Option<u32>,

    /// Render without the standard quiet zone border
    #[arg(long)]
    no_quiet_zone: bool,

    /// What to do when a single record fails (`skip` or `abort`)
    #[arg(long, value_name = "MODE")]
    on_error: Option<FailureMode>,

    /// Decode each written artifact and check it matches the source link
    #[arg(long)]
    verify: bool,

    /// Discover and parse records without writing any artifacts
    #[arg(long)]
    dry_run: bool,

    /// Output the final report as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<BatchReport> {
    let cli = Cli::parse();

    let mut config = GameQrConfig::load(cli.config.as_deref())?;

    if let Some(field) = cli.field {
        config.batch.field = field;
    }
    if let Some(name) = cli.output_name {
        config.batch.output_name = name;
    }
    if let Some(ecc) = cli.ecc {
        config.encoding.ecc = ecc;
    }
    if let Some(size) = cli.min_size {
        config.encoding.min_size = size;
    }
    if cli.no_quiet_zone {
        config.encoding.quiet_zone = false;
    }
    if let Some(mode) = cli.on_error {
        config.batch.on_error = mode;
    }
    if cli.verify {
        config.batch.verify = true;
    }

    logging::init(&config.logging)?;

    match &config.source {
        Some(path) => tracing::info!("Using configuration file: {}", path.display()),
        None => tracing::debug!("No gameqr.toml / gameqr.yaml found, using defaults"),
    }

    let generator = BatchGenerator::new(&config).with_dry_run(cli.dry_run);
    let report = generator
        .run(&cli.root)
        .with_context(|| format!("QR batch failed for {}", cli.root.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.human_lines() {
            println!("{line}");
        }
    }

    Ok(report)
}
