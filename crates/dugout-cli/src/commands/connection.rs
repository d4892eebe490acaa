//! Shortest-connection command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use dugout_core::{Connection, PlayerId};

#[derive(Args)]
pub struct ConnectionArgs {
    /// Starting player id
    pub from: String,

    /// Target player id
    pub to: String,

    /// Hop bound for the search
    #[arg(short, long, default_value_t = 6)]
    pub max_hops: u32,
}

pub fn run(args: &ConnectionArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let from = PlayerId::new(args.from.as_str());
    let to = PlayerId::new(args.to.as_str());
    let connection = ctx.graph.shortest_connection(&from, &to, args.max_hops)?;

    if cli.output_format() == OutputFormat::Json {
        return print_json(&connection);
    }

    match &connection {
        Connection::Path { players, hops } => {
            let chain = players
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("{} ({} hops)", chain, hops);
        }
        Connection::NoPathWithinBound { max_hops } => {
            println!(
                "No connection between '{}' and '{}' within {} hops",
                args.from, args.to, max_hops
            );
        }
    }

    Ok(())
}
