//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use le_core::StatusFilter;

/// Live sporting fixtures, grouped by day and competition.
///
/// Reads fixtures from a JSON file, the live events feed, or a built-in
/// sample, and prints them in the order the events page shows them.
#[derive(Debug, Parser)]
#[command(name = "live-events", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show fixtures grouped by day and competition.
    List(ListArgs),

    /// Show the TV channel directory.
    Channels(ChannelsArgs),

    /// Filter interactively: one query per stdin line, applied after a pause.
    Search(SearchArgs),
}

/// Where to read fixtures from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Read fixtures from a JSON file.
    #[arg(long, value_name = "PATH", conflicts_with = "remote")]
    pub file: Option<PathBuf>,

    /// Fetch fixtures from the live events feed.
    #[arg(long)]
    pub remote: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show fixtures with this status (all, live, upcoming, finished).
    #[arg(short, long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    /// Free-text search over sport, competition, teams and venue.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Mark an event as favourite (repeatable).
    #[arg(long = "favourite", value_name = "ID")]
    pub favourites: Vec<String>,

    /// Hide the quick-action tiles of an event (repeatable).
    #[arg(long = "hide-tiles", value_name = "ID")]
    pub hide_tiles: Vec<String>,

    /// Show the match centre tab for each event.
    #[arg(long)]
    pub details: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct ChannelsArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Only show fixtures with this status (all, live, upcoming, finished).
    #[arg(short, long, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,

    #[command(flatten)]
    pub source: SourceArgs,
}
