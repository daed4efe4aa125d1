//! Sailrace CLI — score series, export and print standings.
//!
//! Commands:
//! - `score`: score one series from the store and export its standings
//! - `score-all`: score every series in the store, in parallel by default
//! - `standings`: print a previously exported JSON standings file
//! - `demo`: generate a synthetic club season, score it, print the sheet
//! - `init-config`: write a default `sailrace.toml`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sailrace_core::domain::SeriesId;
use sailrace_core::{score_snapshot, Standings};
use sailrace_runner::{
    generate_demo_snapshot, generate_demo_tables, generate_report, load_standings,
    save_standings, BatchScorer, ExportFormat, JsonFileStore, RunnerConfig, SeriesRunner,
    DEFAULT_CONFIG_FILE,
};

#[derive(Parser)]
#[command(name = "sailrace", about = "Sailrace CLI — club sail-racing series scoring")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Results store file (overrides `store.path`).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one series, write results back, and export its standings.
    Score {
        /// Series id.
        series: u32,

        /// Export format: json, csv or markdown (overrides `output.format`).
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Output directory (overrides `output.dir`).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Score every series in the store.
    ScoreAll {
        /// Score one series at a time (overrides `scoring.parallel`).
        #[arg(long, default_value_t = false)]
        serial: bool,

        /// Export format: json, csv or markdown (overrides `output.format`).
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Output directory (overrides `output.dir`).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print an exported JSON standings file as a Markdown sheet.
    Standings {
        /// Path to a `series-<id>.json` export.
        file: PathBuf,
    },
    /// Generate a synthetic season and score it.
    Demo {
        /// RNG seed.
        #[arg(long, default_value_t = 2024)]
        seed: u64,

        /// Races per series.
        #[arg(long, default_value_t = 8)]
        races: u32,

        /// Number of sailors.
        #[arg(long, default_value_t = 16)]
        sailors: u32,

        /// Also write a demo store with this many series to the store path.
        #[arg(long)]
        write_store: Option<u32>,
    },
    /// Write a default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RunnerConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    init_logging(&config.logging.filter);

    match cli.command {
        Commands::Score {
            series,
            format,
            output_dir,
        } => {
            apply_output_overrides(&mut config, format, output_dir);
            run_score(&config, SeriesId(series))
        }
        Commands::ScoreAll {
            serial,
            format,
            output_dir,
        } => {
            if serial {
                config.scoring.parallel = false;
            }
            apply_output_overrides(&mut config, format, output_dir);
            run_score_all(&config)
        }
        Commands::Standings { file } => run_standings(&file),
        Commands::Demo {
            seed,
            races,
            sailors,
            write_store,
        } => run_demo(&config, seed, races, sailors, write_store),
        Commands::InitConfig { force } => run_init_config(&cli.config, force),
    }
}

/// `RUST_LOG` wins; otherwise the config's filter.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn apply_output_overrides(
    config: &mut RunnerConfig,
    format: Option<ExportFormat>,
    output_dir: Option<PathBuf>,
) {
    if let Some(format) = format {
        config.output.format = format;
    }
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
}

fn run_score(config: &RunnerConfig, series: SeriesId) -> Result<()> {
    let runner = SeriesRunner::from_config(config)
        .with_context(|| format!("failed to open store {}", config.store.path.display()))?;
    let standings = runner
        .run(series)
        .with_context(|| format!("failed to score series {series}"))?;

    print_summary(&standings);
    let path = save_standings(&standings, &config.output.dir, config.output.format)?;
    println!();
    println!("Standings written to: {}", path.display());
    Ok(())
}

fn run_score_all(config: &RunnerConfig) -> Result<()> {
    let runner = SeriesRunner::from_config(config)
        .with_context(|| format!("failed to open store {}", config.store.path.display()))?;
    let results = BatchScorer::new(&runner)
        .with_parallelism(config.scoring.parallel)
        .score_all()?;

    println!();
    println!("=== Scoring Run ===");
    for (id, outcome) in results.outcomes() {
        match outcome {
            Ok(standings) => {
                let path = save_standings(standings, &config.output.dir, config.output.format)?;
                println!(
                    "Series {:<6} {:<24} {:>3} entries  -> {}",
                    id,
                    standings.series.name,
                    standings.entries.len(),
                    path.display()
                );
            }
            Err(e) => println!("Series {id:<6} FAILED: {e}"),
        }
    }

    let failed = results.failures().count();
    if failed > 0 {
        bail!("{failed} of {} series failed to score", results.len());
    }
    Ok(())
}

fn run_standings(file: &Path) -> Result<()> {
    let standings = load_standings(file)?;
    print!("{}", generate_report(&standings));
    Ok(())
}

fn run_demo(
    config: &RunnerConfig,
    seed: u64,
    races: u32,
    sailors: u32,
    write_store: Option<u32>,
) -> Result<()> {
    if races == 0 {
        bail!("--races must be at least 1");
    }

    if let Some(series_count) = write_store {
        let tables = generate_demo_tables(seed, series_count, races, sailors);
        let store = JsonFileStore::create(&config.store.path, &tables)
            .with_context(|| format!("failed to write {}", config.store.path.display()))?;
        info!(
            path = %store.path().display(),
            series = tables.series.len(),
            results = tables.results.len(),
            "demo store written"
        );
        println!("Demo store written to: {}", store.path().display());
        let runner = SeriesRunner::new(Arc::new(store));
        let results = BatchScorer::new(&runner)
            .with_parallelism(config.scoring.parallel)
            .score_all()?;
        println!("Scored {} series", results.scored().count());
        return Ok(());
    }

    let mut snapshot = generate_demo_snapshot(seed, races, sailors);
    let standings = score_snapshot(&mut snapshot).context("demo series failed to score")?;
    print!("{}", generate_report(&standings));
    Ok(())
}

fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let text = RunnerConfig::default().to_toml()?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Config written to: {}", path.display());
    Ok(())
}

fn print_summary(standings: &Standings) {
    println!();
    println!("=== Series Standings ===");
    println!("Series:         {} ({})", standings.series.name, standings.series.id);
    println!("Races counted:  {}", standings.series.counted_races);
    println!("Results:        {}", standings.result_count);
    println!("Entries:        {}", standings.entries.len());
    println!("Qualified:      {}", standings.qualified().count());
    println!("Fleets:         {}", standings.fleets().join(", "));
    println!("Fingerprint:    {}", standings.fingerprint.short());
    println!();
    println!("--- Top 5 ---");
    for e in standings.entries.iter().take(5) {
        println!(
            "{:>3}. {:<24} {:<6} {:<20} {:>4} pts{}",
            e.rank,
            e.name,
            e.fleet,
            e.boat_label(),
            e.counted_score,
            if e.qualified { "" } else { "  (not qualified)" }
        );
    }
}
