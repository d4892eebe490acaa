//! Shared development path command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct PathsArgs {
    /// Minimum distinct teams a shared path must span
    #[arg(long, default_value_t = 2)]
    pub min_teams: usize,

    /// Minimum players that must share a path before pairs are emitted
    #[arg(long, default_value_t = 2)]
    pub min_players: usize,

    /// Maximum number of pairs to return
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,
}

pub fn run(args: &PathsArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let pairs = ctx
        .graph
        .shared_development_paths(args.min_teams, args.min_players, args.limit)?;

    tracing::info!("Found {} shared-path pairs", pairs.len());

    if cli.output_format() == OutputFormat::Json {
        return print_json(&pairs);
    }

    if pairs.is_empty() {
        println!(
            "No player pairs share a development path spanning {} teams",
            args.min_teams
        );
        return Ok(());
    }

    println!("Shared development paths ({} pairs):", pairs.len());
    for pair in &pairs {
        let stops = pair
            .team_seasons
            .iter()
            .map(|ts| ts.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} & {}  ({} stops)  [{}]",
            pair.player_a,
            pair.player_b,
            pair.path_len(),
            stops
        );
    }

    Ok(())
}
