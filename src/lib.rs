//! syllabus - previous/next navigation through a seven-level exam taxonomy

pub mod cli;
pub mod domain;
pub mod infra;
pub mod nav;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{Context, handle_exams, handle_load, handle_nav, handle_toggle, handle_walk},
};

/// Default filter for a given `-v` count when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    // Logs go to stderr so stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let ctx = Context {
        db: config.db_path(cli.db.as_ref()),
        base_href: config.base_href(cli.base_href.as_deref()),
    };
    tracing::debug!(db = %ctx.db.display(), base_href = %ctx.base_href, "resolved settings");

    match &cli.command {
        Command::Load(args) => handle_load(args, &ctx),
        Command::Nav(args) => handle_nav(args, &ctx),
        Command::Walk(args) => handle_walk(args, &ctx),
        Command::Exams(args) => handle_exams(args, &ctx),
        Command::Activate(args) => handle_toggle(args, &ctx, true),
        Command::Deactivate(args) => handle_toggle(args, &ctx, false),
        Command::Completions(_) => Ok(()),
    }
}
