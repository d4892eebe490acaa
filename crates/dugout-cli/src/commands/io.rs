//! Snapshot export command

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.graph.snapshot();
    let json = serde_json::to_string_pretty(&snapshot)?;

    tracing::info!(
        "Exporting snapshot with {} nodes and {} edges",
        snapshot.nodes.len(),
        snapshot.edges.len()
    );

    match &args.output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
            println!(
                "Exported {} nodes and {} edges to {}",
                snapshot.nodes.len(),
                snapshot.edges.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
