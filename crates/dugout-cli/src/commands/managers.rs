//! Manager-overlap command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use dugout_core::{ManagerOverlap, PlayerId};

#[derive(Args)]
pub struct ManagersArgs {
    /// First player id
    pub player_a: String,

    /// Second player id
    pub player_b: String,
}

pub fn run(args: &ManagersArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let a = PlayerId::new(args.player_a.as_str());
    let b = PlayerId::new(args.player_b.as_str());
    let overlap = ctx.graph.manager_overlap(&a, &b)?;

    if cli.output_format() == OutputFormat::Json {
        return print_json(&overlap);
    }

    match &overlap {
        ManagerOverlap::Shared {
            manager_id,
            manager_name,
            team_season_a,
            team_season_b,
        } => {
            println!("Shared manager: {} ({})", manager_name, manager_id);
            println!("  {} under {}", args.player_a, team_season_a);
            println!("  {} under {}", args.player_b, team_season_b);
        }
        ManagerOverlap::NoOverlap => {
            println!(
                "'{}' and '{}' never played under the same manager",
                args.player_a, args.player_b
            );
        }
    }

    Ok(())
}
