//! Dugout CLI - Command line interface for the roster connectivity graph

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::{completions, connection, io, managers, paths, players, team, teammates};
use dugout_core::{RecordSet, Snapshot};
use dugout_graph::RosterGraph;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "dugout")]
#[command(author, version, about = "Roster connectivity queries over season records")]
pub struct Cli {
    /// Record file to build the graph from (JSON)
    #[arg(short, long, global = true)]
    pub records: Option<PathBuf>,

    /// Snapshot file to restore the graph from (JSON)
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the teammates of a player
    Teammates(teammates::TeammatesArgs),
    /// Find the shortest teammate connection between two players
    Connection(connection::ConnectionArgs),
    /// Find player pairs with identical development paths
    Paths(paths::PathsArgs),
    /// Find a manager two players both played under
    Managers(managers::ManagersArgs),
    /// Team-season lookups (roster, summary, staff)
    Team(team::TeamArgs),
    /// Player-centric reports
    Players(players::PlayersArgs),
    /// Export the graph as a reproducibility snapshot
    Export(io::ExportArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded graph
pub struct AppContext {
    pub graph: RosterGraph,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let graph = match (&cli.records, &cli.snapshot) {
            (Some(path), None) => {
                tracing::debug!("Building graph from records at {:?}", path);
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading record file {}", path.display()))?;
                let records: RecordSet = serde_json::from_str(&content)
                    .with_context(|| format!("parsing record file {}", path.display()))?;
                RosterGraph::from_records(records)?
            }
            (None, Some(path)) => {
                tracing::debug!("Restoring graph from snapshot at {:?}", path);
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading snapshot file {}", path.display()))?;
                let snapshot: Snapshot = serde_json::from_str(&content)
                    .with_context(|| format!("parsing snapshot file {}", path.display()))?;
                RosterGraph::from_snapshot(&snapshot)?
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("--records and --snapshot are mutually exclusive")
            }
            (None, None) => {
                anyhow::bail!("no graph source given; pass --records or --snapshot")
            }
        };

        Ok(Self { graph })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting dugout CLI");

    // Completions need no graph
    if let Commands::Completions(args) = &cli.command {
        return completions::run(args);
    }

    let ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Teammates(args) => teammates::run(args, &cli, &ctx)?,
        Commands::Connection(args) => connection::run(args, &cli, &ctx)?,
        Commands::Paths(args) => paths::run(args, &cli, &ctx)?,
        Commands::Managers(args) => managers::run(args, &cli, &ctx)?,
        Commands::Team(args) => team::run(args, &cli, &ctx)?,
        Commands::Players(args) => players::run(args, &cli, &ctx)?,
        Commands::Export(args) => io::run(args, &cli, &ctx)?,
        Commands::Completions(_) => unreachable!("handled before graph load"),
    }

    Ok(())
}
