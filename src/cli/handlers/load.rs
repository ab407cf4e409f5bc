//! Load command handler.

use anyhow::{Context as _, Result};

use super::{Context, open_store};
use crate::cli::LoadArgs;
use crate::cli::output::{LevelCount, LoadSummary};
use crate::domain::{Level, Node};
use crate::infra::Outline;
use crate::store::MemoryStore;

fn count_levels(nodes: &[(Level, Node)]) -> Vec<LevelCount> {
    Level::ALL
        .into_iter()
        .map(|level| LevelCount {
            level,
            count: nodes.iter().filter(|(l, _)| *l == level).count() as u64,
        })
        .collect()
}

/// Reads the outline named by `args` and writes it to the database at
/// `ctx.db`, or only validates it with `--dry-run`.
pub fn load_outline(args: &LoadArgs, ctx: &Context) -> Result<LoadSummary> {
    let outline = Outline::read(&args.file)
        .with_context(|| format!("failed to read outline {}", args.file.display()))?;
    let nodes = outline
        .to_nodes()
        .with_context(|| format!("invalid outline {}", args.file.display()))?;
    let levels = count_levels(&nodes);

    if args.dry_run {
        MemoryStore::from_nodes(nodes.iter().cloned())
            .with_context(|| format!("invalid outline {}", args.file.display()))?;
        return Ok(LoadSummary {
            nodes: nodes.len(),
            replaced: false,
            dry_run: true,
            levels,
        });
    }

    let mut store = open_store(&ctx.db)?;
    let replace = !args.append;
    let written = store
        .load_nodes(&nodes, replace)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    Ok(LoadSummary {
        nodes: written,
        replaced: replace,
        dry_run: false,
        levels,
    })
}

pub fn handle_load(args: &LoadArgs, ctx: &Context) -> Result<()> {
    let summary = load_outline(args, ctx)?;

    if summary.dry_run {
        println!("Outline is valid: {} node(s)", summary.nodes);
    } else {
        tracing::info!(db = %ctx.db.display(), nodes = summary.nodes, "outline loaded");
        println!("Loaded {} node(s) into {}", summary.nodes, ctx.db.display());
    }
    for LevelCount { level, count } in summary.levels.iter().filter(|c| c.count > 0) {
        println!("  {:<10} {}", level, count);
    }
    Ok(())
}
