//! Activate and deactivate command handlers.

use anyhow::{Context as _, Result, bail};

use super::{Context, open_store, parse_path};
use crate::cli::ToggleArgs;
use crate::domain::{Level, Node};
use crate::nav::find;
use crate::store::SqliteStore;

/// Sets the activity flag of the node at `path`, returning it updated.
pub fn toggle_node(store: &mut SqliteStore, path: &str, active: bool) -> Result<(Level, Node)> {
    let slugs = parse_path(path)?;
    let (level, node) = find(&*store, &slugs).with_context(|| format!("failed to find {}", path))?;

    if !store
        .set_active(level, node.id(), active)
        .with_context(|| format!("failed to update {}", path))?
    {
        bail!("{} {} disappeared while updating", level, path);
    }
    Ok((level, node.with_active(active)))
}

pub fn handle_toggle(args: &ToggleArgs, ctx: &Context, active: bool) -> Result<()> {
    let mut store = open_store(&ctx.db)?;
    let (level, node) = toggle_node(&mut store, &args.path, active)?;

    let verb = if active { "Activated" } else { "Deactivated" };
    tracing::info!(%level, id = %node.id(), active, "toggled node");
    println!("{} {} '{}' ({})", verb, level, node.title(), args.path.trim_matches('/'));
    Ok(())
}
