//! Walk command handler.

use anyhow::{Context as _, Result};

use super::{Context, open_store, truncate_str};
use crate::cli::WalkArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::domain::{Link, NodePath, Slug};
use crate::nav::{Direction, NavResult, NavigationResolver, locate};
use crate::store::{NodeLookup, NodeRepository};

/// Returns every node of an exam in navigation order, Exam excluded.
///
/// With `reverse`, starts at the exam's last node and follows `prev`, so
/// the result is the forward sequence reversed.
pub fn walk_exam<S>(store: &S, exam: &str, reverse: bool, base_href: &str) -> Result<Vec<Link>>
where
    S: NodeRepository + NodeLookup + ?Sized,
{
    let slug = Slug::new(exam).with_context(|| format!("invalid exam slug: {}", exam))?;
    let exam_path = locate(store, &[slug]).with_context(|| format!("failed to locate exam {}", exam))?;
    let resolver = NavigationResolver::new(store).with_base_href(base_href);

    let paths: Vec<NodePath> = if reverse {
        let last = resolver.last_descendant(exam_path.clone())?;
        if last == exam_path {
            Vec::new()
        } else {
            std::iter::once(Ok(last.clone()))
                .chain(resolver.walk(last, Direction::Backward))
                .collect::<NavResult<_>>()?
        }
    } else {
        resolver
            .walk(exam_path, Direction::Forward)
            .collect::<NavResult<_>>()?
    };

    tracing::debug!(exam, reverse, count = paths.len(), "walked exam");
    Ok(paths.iter().map(|p| resolver.link(p)).collect())
}

pub fn handle_walk(args: &WalkArgs, ctx: &Context) -> Result<()> {
    let store = open_store(&ctx.db)?;
    let links = walk_exam(&store, &args.exam, args.reverse, &ctx.base_href)?;

    match args.format {
        OutputFormat::Human => {
            if links.is_empty() {
                println!("No reachable nodes.");
            } else {
                println!("{:<10}  {:<40}  Href", "Level", "Title");
                println!("{:<10}  {:<40}  ----", "----------", "-".repeat(40));
                for link in &links {
                    println!(
                        "{:<10}  {:<40}  {}",
                        link.level(),
                        truncate_str(link.label(), 40),
                        link.href()
                    );
                }
                println!();
                println!("{} node(s)", links.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&links))?);
        }
        OutputFormat::Hrefs => {
            for link in &links {
                println!("{}", link.href());
            }
        }
    }

    Ok(())
}
