//! List command: the grouped day → competition → event view.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use le_core::{EventFilter, EventId, EventIndex, EventUiState};

use crate::render::{View, format_index, format_index_json, local_timezone_name};
use crate::source::{Dataset, Source};
use crate::{Config, ListArgs};

pub fn run<W: Write>(writer: &mut W, args: &ListArgs, config: &Config) -> Result<()> {
    let dataset = Source::resolve(args.source.file.as_deref(), args.source.remote, config)
        .load(config)?;
    let timezone = local_timezone_name();
    let output = render(&dataset, args, &Local, &timezone)?;
    writeln!(writer, "{}", output.trim_end())?;
    Ok(())
}

/// Builds the index for `args` in `tz` and renders it.
pub fn render<Tz>(dataset: &Dataset, args: &ListArgs, tz: &Tz, timezone: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let filter = EventFilter::new(args.status, args.query.clone());
    let index = EventIndex::build_in(tz, &dataset.records, &dataset.channels, &filter);
    let ui = ui_state(args)?;

    if args.json {
        format_index_json(&index, &ui, timezone)
    } else {
        let view = View {
            tz,
            timezone,
            details: args.details,
        };
        Ok(format_index(&index, &ui, &view))
    }
}

fn ui_state(args: &ListArgs) -> Result<EventUiState> {
    let mut ui = EventUiState::new();
    for raw in &args.favourites {
        let id = EventId::new(raw.as_str()).context("invalid --favourite id")?;
        if !ui.is_favourited(&id) {
            ui.toggle_favourite(&id);
        }
    }
    for raw in &args.hide_tiles {
        let id = EventId::new(raw.as_str()).context("invalid --hide-tiles id")?;
        if ui.tiles_enabled(&id) {
            ui.toggle_tiles(&id);
        }
    }
    Ok(ui)
}
