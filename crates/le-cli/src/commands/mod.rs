//! CLI subcommand implementations.

pub mod channels;
pub mod list;
pub mod search;
