//! Team-season lookup commands

use clap::{Args, Subcommand};

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use dugout_core::TeamId;

#[derive(Args)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommands,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List the roster of a team in a given year
    Roster {
        /// Team id (franchise code)
        team: String,
        /// Season year
        year: u16,
    },
    /// Show season summary stats
    Summary {
        /// Team id (franchise code)
        team: String,
        /// Season year
        year: u16,
    },
    /// Show managers and home park
    Staff {
        /// Team id (franchise code)
        team: String,
        /// Season year
        year: u16,
    },
}

pub fn run(args: &TeamArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        TeamCommands::Roster { team, year } => {
            let roster = ctx.graph.roster(&TeamId::new(team.as_str()), *year)?;

            if cli.output_format() == OutputFormat::Json {
                return print_json(&roster);
            }

            if roster.is_empty() {
                println!("No players recorded for {}-{}", team, year);
                return Ok(());
            }

            println!("Roster of {}-{} ({} players):", team, year, roster.len());
            for entry in &roster {
                println!("  {} ({})", entry.name, entry.player_id);
            }
        }
        TeamCommands::Summary { team, year } => {
            let summary = ctx.graph.season_summary(&TeamId::new(team.as_str()), *year)?;

            if cli.output_format() == OutputFormat::Json {
                return print_json(&summary);
            }

            println!("{} ({})", summary.team, summary.year);
            println!("  division: {}  rank: {}", summary.division, summary.rank);
            println!("  record: {}-{}", summary.wins, summary.losses);
            println!("  runs: {}  home runs: {}", summary.runs, summary.home_runs);
            if let Some(attendance) = summary.attendance {
                println!("  attendance: {}", attendance);
            }
        }
        TeamCommands::Staff { team, year } => {
            let staff = ctx
                .graph
                .managers_and_parks(&TeamId::new(team.as_str()), *year)?;

            if cli.output_format() == OutputFormat::Json {
                return print_json(&staff);
            }

            println!("{} ({})", staff.team, staff.year);
            if staff.managers.is_empty() {
                println!("  managers: none recorded");
            } else {
                println!("  managers: {}", staff.managers.join(", "));
            }
            if staff.parks.is_empty() {
                println!("  home park: none recorded");
            } else {
                println!("  home park: {}", staff.parks.join(", "));
            }
        }
    }

    Ok(())
}
