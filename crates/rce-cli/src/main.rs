mod config;
mod live;
mod replay;

use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rce_core::{ConstellationGraph, EngineConfig};

#[derive(Parser)]
#[command(name = "rce", about = "Resonance constellation engine driver")]
struct Cli {
    /// Engine config file (TOML). Falls back to RCE_CONFIG, then defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON-lines script of glints and ticks
    Replay {
        /// Script file path
        file: PathBuf,

        /// Seed for the serendipitous-link random source
        #[arg(long)]
        seed: Option<u64>,

        /// Print one summary line per tick instead of snapshot JSON
        #[arg(long)]
        summary: bool,
    },

    /// Read glints from stdin and emit snapshots on a timer
    Run {
        /// Milliseconds between ticks
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Seed for the serendipitous-link random source
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective engine configuration
    Config,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn build_graph(config: EngineConfig, seed: Option<u64>) -> Result<ConstellationGraph> {
    let graph = match seed {
        Some(seed) => ConstellationGraph::seeded(config, seed),
        None => ConstellationGraph::new(config),
    };
    graph.context("failed to build constellation graph")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let engine_config = config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Replay {
            file,
            seed,
            summary,
        } => cmd_replay(engine_config, file, *seed, *summary),
        Commands::Run { interval_ms, seed } => cmd_run(engine_config, *interval_ms, *seed).await,
        Commands::Config => cmd_config(&engine_config),
    }
}

fn cmd_replay(config: EngineConfig, file: &Path, seed: Option<u64>, summary: bool) -> Result<()> {
    let mut graph = build_graph(config, seed)?;
    let input = std::fs::File::open(file)
        .with_context(|| format!("failed to open {}", file.display()))?;

    let stdout = std::io::stdout();
    let stats = replay::replay(&mut graph, BufReader::new(input), stdout.lock(), summary)?;

    eprintln!(
        "done. ingested={} rejected={} ticks={}",
        stats.ingested, stats.rejected, stats.ticks
    );
    Ok(())
}

async fn cmd_run(config: EngineConfig, interval_ms: u64, seed: Option<u64>) -> Result<()> {
    if interval_ms == 0 {
        anyhow::bail!("--interval-ms must be greater than zero");
    }
    let graph = build_graph(config, seed)?;
    live::run(graph, Duration::from_millis(interval_ms)).await
}

fn cmd_config(config: &EngineConfig) -> Result<()> {
    let rendered = toml::to_string(config).context("failed to render config")?;
    print!("{rendered}");
    Ok(())
}
