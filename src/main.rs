use analytics::{
    AnalyticsEngine, ImpactRanking, IndicatorKind, LabeledImpact, SharpeParams, SortOrder,
    SummaryMetric, rank_impacts, sort_summaries,
};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use configuration::{LogFormat, LoggingSettings, Settings};
use core_types::{Bar, DataFileName, Field};
use data_source::{DataDirectory, load_csv, parse_timestamp};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

mod render;

/// The main entry point for the Coinscope analysis tool.
fn main() {
    // Load COINSCOPE_* overrides and RUST_LOG from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Price, volume and risk analytics for cryptocurrency OHLCV exports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./coinscope.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the CSV exports; overrides `data.directory`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Log line format; overrides `logging.format`.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available data files grouped by coin.
    Files,
    /// Compute a moving average or Bollinger Bands over one file.
    Indicator(IndicatorArgs),
    /// Return, volatility and drawdown analysis of one file.
    Analyze(AnalyzeArgs),
    /// Side-by-side summary statistics of several files.
    Compare(CompareArgs),
    /// Average price and volume before and after an event.
    Impact(ImpactArgs),
    /// Headline metrics of one file.
    Metrics(MetricsArgs),
}

#[derive(Args)]
struct IndicatorArgs {
    /// File name inside the data directory, or a path to a CSV file.
    file: String,

    /// sma, ema or bollinger; defaults to `indicators.default_kind`.
    #[arg(long)]
    kind: Option<IndicatorKind>,

    /// Window length; defaults to `indicators.default_period`.
    #[arg(long)]
    period: Option<usize>,

    #[arg(long, default_value = "close")]
    field: Field,
}

#[derive(Args)]
struct AnalyzeArgs {
    file: String,

    #[arg(long, default_value = "close")]
    field: Field,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(required = true)]
    files: Vec<String>,

    #[arg(long, default_value = "close")]
    field: Field,

    /// Rank by min, max, mean, median, std or percent_change.
    #[arg(long)]
    sort_by: Option<SummaryMetric>,

    /// Sort in descending order.
    #[arg(long, requires = "sort_by")]
    desc: bool,
}

#[derive(Args)]
struct ImpactArgs {
    /// Files spanning the event, each split at `--split`.
    #[arg(conflicts_with_all = ["pre", "post"])]
    files: Vec<String>,

    /// Event instant; defaults to `impact.split_at`.
    #[arg(long, value_parser = parse_split, conflicts_with_all = ["pre", "post"])]
    split: Option<DateTime<Utc>>,

    /// Pre-event file, compared against `--post`.
    #[arg(long, requires = "post")]
    pre: Option<String>,

    #[arg(long, requires = "pre")]
    post: Option<String>,

    /// Rank by volume change (descending) instead of price change (ascending).
    #[arg(long)]
    by_volume: bool,
}

#[derive(Args)]
struct MetricsArgs {
    file: String,
}

fn parse_split(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw).ok_or_else(|| format!("'{raw}' is not a date or timestamp"))
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn run(cli: Cli) -> Result<()> {
    let mut settings = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        settings.data.directory = dir;
    }
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }

    // Held until exit so buffered file logs are flushed.
    let _guard = init_tracing(&settings.logging)?;

    let engine = AnalyticsEngine::new(
        settings.indicators.default_period,
        SharpeParams {
            risk_free_rate: settings.metrics.risk_free_rate,
            periods_per_year: settings.metrics.periods_per_year,
        },
    );
    let directory = DataDirectory::new(&settings.data.directory);
    info!("Using data directory {}", directory.root().display());

    match cli.command {
        Commands::Files => handle_files(&directory, cli.json),
        Commands::Indicator(args) => handle_indicator(args, &engine, &directory, &settings, cli.json),
        Commands::Analyze(args) => handle_analyze(args, &engine, &directory, cli.json),
        Commands::Compare(args) => handle_compare(args, &engine, &directory, cli.json),
        Commands::Impact(args) => handle_impact(args, &engine, &directory, &settings, cli.json),
        Commands::Metrics(args) => handle_metrics(args, &engine, &directory, cli.json),
    }
}

fn handle_files(directory: &DataDirectory, json: bool) -> Result<()> {
    let files = directory
        .describe_all()
        .with_context(|| format!("Failed to list {}", directory.root().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        println!("{}", render::files_table(&files));
    }
    Ok(())
}

fn handle_indicator(
    args: IndicatorArgs,
    engine: &AnalyticsEngine,
    directory: &DataDirectory,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let kind = match args.kind {
        Some(kind) => kind,
        None => settings
            .indicators
            .default_kind
            .parse()
            .context("Invalid indicators.default_kind")?,
    };
    let period = args.period.unwrap_or(engine.default_period());
    if period == 0 {
        bail!("--period must be at least 1");
    }

    let bars = load_bars(directory, &args.file)?;
    let output = engine.indicator(kind, &bars, args.field, Some(period));

    if json {
        let report = render::IndicatorReport {
            file: &args.file,
            kind,
            period,
            field: args.field,
            timestamps: bars.iter().map(|b| b.timestamp).collect(),
            output: &output,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} ({}) over {} of {}", kind, period, args.field, args.file);
        println!("{}", render::indicator_table(&bars, args.field, &output));
    }
    Ok(())
}

fn handle_analyze(
    args: AnalyzeArgs,
    engine: &AnalyticsEngine,
    directory: &DataDirectory,
    json: bool,
) -> Result<()> {
    let bars = load_bars(directory, &args.file)?;
    let analysis = engine.analyze(&bars, args.field);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("Analysis of {} ({})", args.file, args.field);
        println!("{}", render::analysis_table(&analysis));
    }
    Ok(())
}

fn handle_compare(
    args: CompareArgs,
    engine: &AnalyticsEngine,
    directory: &DataDirectory,
    json: bool,
) -> Result<()> {
    let mut loaded = Vec::with_capacity(args.files.len());
    for file in &args.files {
        loaded.push((file.as_str(), load_bars(directory, file)?));
    }

    let mut summaries = engine.compare(
        loaded.iter().map(|(name, bars)| (*name, bars.as_slice())),
        args.field,
    );
    if let Some(metric) = args.sort_by {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        sort_summaries(&mut summaries, metric, order);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("Comparison of {}", args.field);
        println!("{}", render::comparison_table(&summaries));
    }
    Ok(())
}

fn handle_impact(
    args: ImpactArgs,
    engine: &AnalyticsEngine,
    directory: &DataDirectory,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let split_at = args.split.unwrap_or(settings.impact.split_at);

    let mut impacts: Vec<LabeledImpact> = Vec::new();
    if let (Some(pre), Some(post)) = (&args.pre, &args.post) {
        let stats = engine.impact_between(&load_bars(directory, pre)?, &load_bars(directory, post)?);
        impacts.push(LabeledImpact {
            label: coin_label(pre),
            stats,
        });
    } else if !args.files.is_empty() {
        for file in &args.files {
            let bars = load_bars(directory, file)?;
            impacts.push(engine.impact(&coin_label(file), &bars, split_at));
        }
    } else {
        // Pair up each configured coin's pre/post event exports.
        let impact = &settings.impact;
        for coin in &impact.coins {
            let pre = directory.find(coin, &impact.pre_suffix)?;
            let post = directory.find(coin, &impact.post_suffix)?;
            let (Some(pre), Some(post)) = (pre, post) else {
                warn!("Skipping {}: no {}/{} file pair", coin, impact.pre_suffix, impact.post_suffix);
                continue;
            };
            let stats = engine.impact_between(
                &directory.load(&pre.file_name)?,
                &directory.load(&post.file_name)?,
            );
            impacts.push(LabeledImpact {
                label: coin.clone(),
                stats,
            });
        }
    }

    let ranking = if args.by_volume {
        ImpactRanking::VolumeChangeDescending
    } else {
        ImpactRanking::PriceChangeAscending
    };
    rank_impacts(&mut impacts, ranking);

    if json {
        println!("{}", serde_json::to_string_pretty(&impacts)?);
    } else if impacts.is_empty() {
        println!("No impact data available");
    } else {
        println!("{}", render::impact_table(&impacts));
    }
    Ok(())
}

fn handle_metrics(
    args: MetricsArgs,
    engine: &AnalyticsEngine,
    directory: &DataDirectory,
    json: bool,
) -> Result<()> {
    let bars = load_bars(directory, &args.file)?;
    let metrics = engine.file_metrics(&bars);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("Metrics of {}", args.file);
        println!("{}", render::metrics_table(&metrics));
    }
    Ok(())
}

// ==============================================================================
// Helpers
// ==============================================================================

/// Loads a file by bare name from the data directory, or from a path when the
/// argument names one.
fn load_bars(directory: &DataDirectory, file: &str) -> Result<Vec<Bar>> {
    let path = Path::new(file);
    let bars = if path.components().count() > 1 {
        load_csv(path)
    } else {
        directory.load(file)
    };
    bars.with_context(|| format!("Failed to load {file}"))
}

/// The coin of a data file, falling back to the raw argument.
fn coin_label(file: &str) -> String {
    let name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    DataFileName::parse(&name)
        .map(|parsed| parsed.coin)
        .unwrap_or(name)
}

/// Installs the global subscriber: human-readable logs on stderr, plus a daily
/// rolling file when `logging.directory` is set. `RUST_LOG` takes precedence
/// over `logging.level`.
fn init_tracing(logging: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("Invalid logging.level '{}'", logging.level))?,
    };

    let stderr_layer: Box<dyn Layer<Registry> + Send + Sync> = match logging.format {
        LogFormat::Full => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "coinscope.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(filter)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}
