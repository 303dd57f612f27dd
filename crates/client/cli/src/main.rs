//! Command-line driver for carousel battles.
//!
//! Loads a roster (and optionally a battle config), plays neutral turns
//! through the runtime, and prints who acted and the resulting queue.
mod presentation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use battle_content::{ConfigLoader, RosterLoader};
use battle_core::{Battle, BattleConfig};
use battle_runtime::{NeutralTurnProvider, Runtime};

use presentation::RunReport;

/// Preview the turn order of a battle
#[derive(Parser)]
#[command(name = "carousel")]
#[command(about = "Turn-order preview for carousel battles", long_about = None)]
#[command(version)]
struct Cli {
    /// Roster catalog (RON list of actor templates)
    #[arg(short, long, value_name = "FILE")]
    roster: PathBuf,

    /// Battle configuration (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of turns to play
    #[arg(short, long, default_value_t = 8)]
    turns: usize,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => BattleConfig::default(),
    };
    let roster = RosterLoader::load(&cli.roster, &config)?;
    tracing::info!(
        roster = %cli.roster.display(),
        actors = roster.len(),
        lookahead = config.lookahead,
        "content loaded"
    );

    let mut runtime = Runtime::builder()
        .battle(Battle::new(config, roster))
        .provider(NeutralTurnProvider)
        .build()
        .await
        .context("failed to start battle runtime")?;

    let turns = runtime.run(cli.turns).await?;
    let snapshot = runtime.handle().query_snapshot().await?;
    runtime.shutdown().await?;

    let report = RunReport::new(turns, snapshot);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for the report.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
