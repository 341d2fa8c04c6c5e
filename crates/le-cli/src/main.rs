use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use le_cli::commands::{channels, list, search};
use le_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays parseable with --json
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout();
    match &cli.command {
        Some(Commands::List(args)) => list::run(&mut stdout, args, &config)?,
        Some(Commands::Channels(args)) => channels::run(&mut stdout, args, &config)?,
        Some(Commands::Search(args)) => search::run(&mut stdout, args, &config)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
