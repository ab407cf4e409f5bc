//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// syllabus - previous/next navigation through exam syllabi
#[derive(Parser, Debug)]
#[command(name = "syllabus", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Prefix for every link href (overrides config file)
    #[arg(long, global = true)]
    pub base_href: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an outline file into the database
    Load(LoadArgs),

    /// Show the previous and next node around one node
    Nav(NavArgs),

    /// Print an exam's whole navigation sequence
    Walk(WalkArgs),

    /// List exams
    Exams(ExamsArgs),

    /// Make a node (and so its subtree) reachable again
    Activate(ToggleArgs),

    /// Hide a node and its subtree from navigation
    Deactivate(ToggleArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `load` command
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Outline file (.yaml, .yml or .json)
    pub file: PathBuf,

    /// Add to existing content instead of replacing it
    #[arg(long)]
    pub append: bool,

    /// Validate the outline without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `nav` command
#[derive(Parser, Debug)]
pub struct NavArgs {
    /// Slug path such as neet/physics/mechanics
    #[arg(required_unless_present = "id", conflicts_with = "id")]
    pub path: Option<String>,

    /// Locate the node by id instead of slug path
    #[arg(long)]
    pub id: Option<String>,

    /// Give up after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `walk` command
#[derive(Parser, Debug)]
pub struct WalkArgs {
    /// Exam slug
    pub exam: String,

    /// Walk from the last node back to the first
    #[arg(long)]
    pub reverse: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `exams` command
#[derive(Parser, Debug)]
pub struct ExamsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `activate` and `deactivate` commands
#[derive(Parser, Debug)]
pub struct ToggleArgs {
    /// Slug path of the node
    pub path: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn nav_accepts_path_or_id_but_not_both() {
        assert!(Cli::try_parse_from(["syllabus", "nav", "neet/physics"]).is_ok());
        assert!(Cli::try_parse_from(["syllabus", "nav", "--id", "01HQ3K5M7NXJK4QZPW8V2R6T9Y"]).is_ok());
        assert!(Cli::try_parse_from(["syllabus", "nav"]).is_err());
        assert!(
            Cli::try_parse_from(["syllabus", "nav", "neet", "--id", "01HQ3K5M7NXJK4QZPW8V2R6T9Y"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["syllabus", "exams", "--db", "x.db", "-vv"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        assert_eq!(cli.verbose, 2);
    }
}
