//! Search command: debounced free-text filtering driven by stdin.
//!
//! Each input line replaces the query. The index is rebuilt only once the
//! query has been stable for the configured delay; end of input applies any
//! pending query immediately.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use le_core::{Debouncer, EventFilter, EventIndex, EventUiState, StatusFilter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::render::{View, format_index, local_timezone_name};
use crate::source::{Dataset, Source};
use crate::{Config, SearchArgs};

pub fn run<W: Write>(writer: &mut W, args: &SearchArgs, config: &Config) -> Result<()> {
    let dataset = Source::resolve(args.source.file.as_deref(), args.source.remote, config)
        .load(config)?;
    let timezone = local_timezone_name();
    let session = Session {
        dataset: &dataset,
        status: args.status,
        view: View {
            tz: &Local,
            timezone: &timezone,
            details: false,
        },
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    runtime.block_on(session.run(
        BufReader::new(tokio::io::stdin()),
        writer,
        config.search_delay(),
    ))
}

/// Fixed inputs of an interactive search.
pub struct Session<'a, Tz> {
    pub dataset: &'a Dataset,
    pub status: StatusFilter,
    pub view: View<'a, Tz>,
}

impl<Tz> Session<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Reads queries from `input` until it ends, rendering each stabilized one.
    pub async fn run<R, W>(&self, input: R, writer: &mut W, delay: Duration) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut debouncer = Debouncer::new(String::new(), delay);
        let mut stabilized = debouncer.subscribe();
        let mut rendered = String::new();
        self.render(writer, &rendered)?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("failed to read query")? {
                        Some(query) => debouncer.set(query),
                        None => break,
                    }
                }
                changed = stabilized.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let query = stabilized.borrow_and_update().clone();
                    if query != rendered {
                        self.render(writer, &query)?;
                        rendered = query;
                    }
                }
            }
        }

        // The timer can publish in the same tick that input ends.
        debouncer.flush();
        let query = stabilized.borrow_and_update().clone();
        if query != rendered {
            self.render(writer, &query)?;
        }
        debouncer.dispose();
        tracing::debug!(delay = ?debouncer.delay(), "search input closed");
        Ok(())
    }

    fn render<W: Write>(&self, writer: &mut W, query: &str) -> Result<()> {
        let filter = EventFilter::new(self.status, query);
        let index = EventIndex::build_in(
            self.view.tz,
            &self.dataset.records,
            &self.dataset.channels,
            &filter,
        );
        writeln!(writer, "Search: {query:?}")?;
        writeln!(
            writer,
            "{}",
            format_index(&index, &EventUiState::new(), &self.view)
        )?;
        writer.flush()?;
        Ok(())
    }
}
