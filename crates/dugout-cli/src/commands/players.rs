//! Player-centric report commands

use clap::{Args, Subcommand};

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct PlayersArgs {
    #[command(subcommand)]
    pub command: PlayerCommands,
}

#[derive(Subcommand)]
pub enum PlayerCommands {
    /// Players who appeared for several distinct team-seasons
    MultiTeam {
        /// Minimum distinct team-seasons
        #[arg(long, default_value_t = 2)]
        min_team_seasons: usize,

        /// Maximum number of players to return
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Teammate pairs who shared several team-seasons
    SharedSeasons {
        /// Minimum shared team-seasons
        #[arg(long, default_value_t = 2)]
        min_shared: usize,

        /// Maximum number of pairs to return
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

pub fn run(args: &PlayersArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        PlayerCommands::MultiTeam {
            min_team_seasons,
            limit,
        } => {
            let players = ctx.graph.multi_team_players(*min_team_seasons, *limit)?;

            if cli.output_format() == OutputFormat::Json {
                return print_json(&players);
            }

            if players.is_empty() {
                println!(
                    "No players appeared for {} or more team-seasons",
                    min_team_seasons
                );
                return Ok(());
            }

            println!("Multi-team players ({} found):", players.len());
            for player in &players {
                println!(
                    "  {} ({})  {} team-seasons",
                    player.name, player.player_id, player.team_seasons
                );
            }
        }
        PlayerCommands::SharedSeasons { min_shared, limit } => {
            let pairs = ctx.graph.shared_season_pairs(*min_shared, *limit)?;

            if cli.output_format() == OutputFormat::Json {
                return print_json(&pairs);
            }

            if pairs.is_empty() {
                println!(
                    "No teammate pairs shared {} or more team-seasons",
                    min_shared
                );
                return Ok(());
            }

            println!("Shared-season pairs ({} found):", pairs.len());
            for pair in &pairs {
                let stops = pair
                    .team_seasons
                    .iter()
                    .map(|ts| ts.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "  {} & {}  {} shared  [{}]",
                    pair.player_a, pair.player_b, pair.shared, stops
                );
            }
        }
    }

    Ok(())
}
