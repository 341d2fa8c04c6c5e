//! Live events CLI library.
//!
//! Loads fixtures, builds the grouped index and renders it for the terminal.

mod cli;
pub mod commands;
mod config;
pub mod render;
pub mod source;

pub use cli::{ChannelsArgs, Cli, Commands, ListArgs, SearchArgs, SourceArgs};
pub use config::Config;
