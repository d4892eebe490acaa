//! Teammates command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use dugout_core::PlayerId;

#[derive(Args)]
pub struct TeammatesArgs {
    /// Player id to list teammates for
    pub player: String,

    /// Maximum number of teammates to return
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub fn run(args: &TeammatesArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let player_id = PlayerId::new(args.player.as_str());
    let teammates = ctx.graph.teammates_of(&player_id, args.limit)?;

    tracing::info!("Found {} teammates for {}", teammates.len(), args.player);

    if cli.output_format() == OutputFormat::Json {
        return print_json(&teammates);
    }

    if teammates.is_empty() {
        println!("No teammates recorded for '{}'", args.player);
        return Ok(());
    }

    println!("Teammates of '{}' ({} found):", args.player, teammates.len());
    for entry in &teammates {
        let teams = entry
            .edge
            .teams
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} ({})  {}-{}  [{}]",
            entry.name,
            entry.player_id,
            entry.edge.first_season_together,
            entry.edge.last_season_together,
            teams
        );
    }

    Ok(())
}
