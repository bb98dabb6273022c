//! passchart CLI: pass locations from chart images as JSON.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use passchart::{
    extract_batch_files, load::load_rgb, run_job, BatchManifest, ChartJob, ExtractionReport,
    PassChartExtractor, PipelineParams,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "passchart")]
#[command(about = "Extract field-relative pass locations from pass-chart images")]
#[command(version)]
struct Cli {
    /// Log filter: off, error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit JSON log lines (tracing builds only).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one chart.
    Extract(ExtractArgs),

    /// Extract every chart listed in a JSON manifest.
    Batch(BatchArgs),

    /// Print the default pipeline parameters as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// Pipeline parameters (JSON); missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ExtractArgs {
    /// Chart image.
    #[arg(long)]
    image: PathBuf,

    /// Chart metadata (JSON).
    #[arg(long)]
    meta: PathBuf,

    /// Week label for the records; overrides the metadata's own.
    #[arg(long)]
    week: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Args)]
struct BatchArgs {
    /// Manifest: `{ "jobs": [ { "image": ..., "meta": ..., "week": ... } ] }`.
    #[arg(long)]
    manifest: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Batch(args) => run_batch(args),
        Commands::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&PipelineParams::default())?);
            Ok(())
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> CliResult<()> {
    let level = parse_level(&cli.log_level)?;
    passchart::core::init_tracing(cli.log_json, level);
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> CliResult<()> {
    let level = parse_level(&cli.log_level)?;
    if cli.log_json {
        eprintln!("--log-json needs the `tracing` feature; using plain logs");
    }
    passchart::core::init_with_level(level).map_err(|e| format!("logger: {e}"))?;
    Ok(())
}

fn parse_level(s: &str) -> CliResult<LevelFilter> {
    Ok(LevelFilter::from_str(s).map_err(|e| format!("--log-level {s}: {e}"))?)
}

fn extractor(config: Option<&Path>) -> CliResult<PassChartExtractor> {
    let params = match config {
        Some(path) => PipelineParams::load_json(path)?,
        None => PipelineParams::default(),
    };
    Ok(PassChartExtractor::new(params))
}

fn run_extract(args: ExtractArgs) -> CliResult<()> {
    let extractor = extractor(args.common.config.as_deref())?;
    let job = ChartJob {
        image: args.image,
        meta: args.meta,
        week: args.week,
    };
    let records = run_job(&extractor, &job, &|p: &Path| load_rgb(p))?;
    write_report(
        &ExtractionReport {
            records,
            failures: Vec::new(),
        },
        args.common.out.as_deref(),
    )
}

fn run_batch(args: BatchArgs) -> CliResult<()> {
    let extractor = extractor(args.common.config.as_deref())?;
    let manifest = BatchManifest::load_json(&args.manifest)?;
    let report = extract_batch_files(&extractor, &manifest.jobs);
    write_report(&report, args.common.out.as_deref())
}

fn write_report(report: &ExtractionReport, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            report.write_json(path)?;
            log::info!("wrote {} records to {}", report.records.len(), path.display());
        }
        None => println!("{}", report.to_json()?),
    }
    Ok(())
}
