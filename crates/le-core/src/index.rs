//! Day → competition → event grouping of fixtures.
//!
//! # Pipeline
//!
//! 1. Validate each record independently; failures are recorded, not fatal
//! 2. Keep events admitted by the status filter and the free-text query
//! 3. Bucket by local calendar day, earliest day first
//! 4. Within a day, order by status rank (live, upcoming, finished) then kickoff
//! 5. Bucket by competition title (ordinal order), keeping step 4 order inside

use std::collections::{BTreeMap, HashSet};

use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::channels::ChannelDirectory;
use crate::event::{Channel, DataError, Event, EventRecord};
use crate::filter::EventFilter;

/// A record excluded from the index because it failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position of the record in the input collection.
    pub position: usize,
    /// The raw id, when the record had one.
    pub id: Option<String>,
    pub error: DataError,
}

/// Events of one competition on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionGroup {
    pub title: String,
    pub events: Vec<Event>,
}

/// All competitions with fixtures on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub competitions: Vec<CompetitionGroup>,
}

impl DayGroup {
    pub fn event_count(&self) -> usize {
        self.competitions.iter().map(|c| c.events.len()).sum()
    }

    /// Events in display order across all competitions.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.competitions.iter().flat_map(|c| c.events.iter())
    }

    /// Heading label, e.g. "Tuesday, Dec 16, 2025".
    pub fn label(&self) -> String {
        self.day.format("%A, %b %d, %Y").to_string()
    }
}

/// The grouped, ordered view of a fixture collection.
#[derive(Debug, Clone)]
pub struct EventIndex {
    days: Vec<DayGroup>,
    skipped: Vec<SkippedRecord>,
    channels: ChannelDirectory,
}

impl EventIndex {
    /// Builds the index, bucketing days in the system's local timezone.
    pub fn build(records: &[EventRecord], channels: &[Channel], filter: &EventFilter) -> Self {
        Self::build_in(&Local, records, channels, filter)
    }

    /// Builds the index, bucketing days in `tz`.
    pub fn build_in<Tz: TimeZone>(
        tz: &Tz,
        records: &[EventRecord],
        channels: &[Channel],
        filter: &EventFilter,
    ) -> Self {
        let (events, skipped) = validate_records(records);
        let matcher = filter.matcher();

        let mut by_day: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
        for event in events.into_iter().filter(|event| matcher.matches(event)) {
            let day = event.start_time.with_timezone(tz).date_naive();
            by_day.entry(day).or_default().push(event);
        }

        let days: Vec<DayGroup> = by_day
            .into_iter()
            .map(|(day, mut events)| {
                // Stable: equal rank and kickoff keep input order.
                events.sort_by(|a, b| {
                    a.status
                        .rank()
                        .cmp(&b.status.rank())
                        .then_with(|| a.start_time.cmp(&b.start_time))
                });
                DayGroup {
                    day,
                    competitions: group_by_competition(events),
                }
            })
            .collect();

        tracing::debug!(
            records = records.len(),
            skipped = skipped.len(),
            days = days.len(),
            status = %filter.status,
            query = %filter.query,
            "built event index"
        );

        Self {
            days,
            skipped,
            channels: ChannelDirectory::new(channels),
        }
    }

    pub fn days(&self) -> &[DayGroup] {
        &self.days
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub const fn channels(&self) -> &ChannelDirectory {
        &self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(DayGroup::event_count).sum()
    }
}

/// Validates every record on its own. The first record with a given id wins.
pub fn validate_records(records: &[EventRecord]) -> (Vec<Event>, Vec<SkippedRecord>) {
    let mut events = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for (position, record) in records.iter().enumerate() {
        let result = Event::try_from(record.clone()).and_then(|event| {
            if seen.insert(event.id.clone()) {
                Ok(event)
            } else {
                Err(DataError::DuplicateId { id: event.id })
            }
        });

        match result {
            Ok(event) => events.push(event),
            Err(error) => {
                tracing::warn!(position, id = %record.id, error = %error, "skipping malformed event record");
                skipped.push(SkippedRecord {
                    position,
                    id: Some(record.id.clone()).filter(|id| !id.trim().is_empty()),
                    error,
                });
            }
        }
    }

    (events, skipped)
}

fn group_by_competition(events: Vec<Event>) -> Vec<CompetitionGroup> {
    let mut by_title: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in events {
        by_title
            .entry(event.competition.clone())
            .or_default()
            .push(event);
    }
    by_title
        .into_iter()
        .map(|(title, events)| CompetitionGroup { title, events })
        .collect()
}
