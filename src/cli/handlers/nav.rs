//! Nav command handler.

use anyhow::{Context as _, Result};
use std::time::{Duration, Instant};

use super::{Context, describe, open_store, parse_path};
use crate::cli::NavArgs;
use crate::cli::output::{NavReport, Output, OutputFormat};
use crate::domain::NodeId;
use crate::nav::{NavigationResolver, locate, locate_id};
use crate::store::{NodeLookup, NodeRepository};

/// Locates the node named by `args` and resolves its neighbours.
pub fn nav_report<S>(store: &S, args: &NavArgs, base_href: &str) -> Result<NavReport>
where
    S: NodeRepository + NodeLookup + ?Sized,
{
    let path = match (&args.id, &args.path) {
        (Some(id), _) => {
            let id: NodeId = id.parse().with_context(|| format!("invalid node id: {}", id))?;
            locate_id(store, &id).with_context(|| format!("failed to locate node {}", id))?
        }
        (None, Some(input)) => {
            let slugs = parse_path(input)?;
            locate(store, &slugs).with_context(|| format!("failed to locate {}", input))?
        }
        (None, None) => anyhow::bail!("a slug path or --id is required"),
    };

    let mut resolver = NavigationResolver::new(store).with_base_href(base_href);
    if let Some(ms) = args.timeout_ms {
        resolver = resolver.with_deadline(Instant::now() + Duration::from_millis(ms));
    }

    let adjacent = resolver
        .resolve_adjacent(&path)
        .with_context(|| format!("failed to resolve neighbours of {}", path.slug_path()))?;

    Ok(NavReport {
        current: resolver.link(&path),
        prev: adjacent.prev,
        next: adjacent.next,
    })
}

pub fn handle_nav(args: &NavArgs, ctx: &Context) -> Result<()> {
    let store = open_store(&ctx.db)?;
    let report = nav_report(&store, args, &ctx.base_href)?;
    tracing::info!(target_href = report.current.href(), "navigation resolved");

    match args.format {
        OutputFormat::Human => {
            println!("{}", report.current);
            println!("  prev: {}", describe(report.prev.as_ref()));
            println!("  next: {}", describe(report.next.as_ref()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&report))?);
        }
        OutputFormat::Hrefs => {
            let href = |link: Option<&crate::domain::Link>| {
                link.map(|l| l.href().to_string())
                    .unwrap_or_else(|| "-".to_string())
            };
            println!("prev\t{}", href(report.prev.as_ref()));
            println!("next\t{}", href(report.next.as_ref()));
        }
    }

    Ok(())
}
