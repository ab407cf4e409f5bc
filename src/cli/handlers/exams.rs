//! Exams command handler.

use anyhow::{Context as _, Result};

use super::{Context, open_store, truncate_str};
use crate::cli::ExamsArgs;
use crate::cli::output::{ExamListing, Output, OutputFormat};
use crate::domain::{Level, Link, Node};
use crate::store::NodeLookup;

/// Hrefs of the active exams, in listing order.
pub fn exam_hrefs(exams: &[Node], base_href: &str) -> Vec<String> {
    exams
        .iter()
        .filter(|e| e.is_active())
        .map(|e| Link::to_node(base_href, &[], e, Level::Exam).href().to_string())
        .collect()
}

pub fn handle_exams(args: &ExamsArgs, ctx: &Context) -> Result<()> {
    let store = open_store(&ctx.db)?;
    let exams = store.exams().context("failed to list exams")?;

    match args.format {
        OutputFormat::Human => {
            if exams.is_empty() {
                println!("No exams found.");
            } else {
                println!("{:<20}  {:<40}  {:>6}", "Slug", "Title", "Active");
                println!("{:<20}  {:<40}  {:>6}", "-".repeat(20), "-".repeat(40), "------");
                for exam in &exams {
                    println!(
                        "{:<20}  {:<40}  {:>6}",
                        truncate_str(exam.slug().as_str(), 20),
                        truncate_str(exam.title(), 40),
                        if exam.is_active() { "yes" } else { "no" }
                    );
                }
                println!();
                println!("{} exam(s)", exams.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<ExamListing> = exams.iter().map(ExamListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Hrefs => {
            for href in exam_hrefs(&exams, &ctx.base_href) {
                println!("{}", href);
            }
        }
    }

    Ok(())
}
