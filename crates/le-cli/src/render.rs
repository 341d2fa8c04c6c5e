//! Text and JSON views of an event index.

use std::fmt::{self, Write};

use anyhow::Result;
use chrono::{NaiveDate, TimeZone};
use le_core::{
    Channel, ChannelDirectory, CompetitionGroup, Event, EventActions, EventIndex, EventUiState,
    MatchTab,
};
use serde::Serialize;

/// Channel names listed before the rest collapse into `+N more`.
pub const CHANNEL_PREVIEW_LIMIT: usize = 3;

/// Indentation of the lines under an event row.
const DETAIL_INDENT: &str = "           ";

/// How an index is presented.
#[derive(Debug, Clone, Copy)]
pub struct View<'a, Tz> {
    /// Zone used for kickoff times. Should match the zone the index was built in.
    pub tz: &'a Tz,
    /// Zone name shown in the header.
    pub timezone: &'a str,
    /// Include the match centre tab under each event.
    pub details: bool,
}

/// Returns the local timezone name, `UTC` when it cannot be determined.
pub fn local_timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// `1 event`, `2 events`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_index<Tz>(index: &EventIndex, ui: &EventUiState, view: &View<'_, Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut output = String::new();

    writeln!(
        output,
        "LIVE EVENTS: {} ({})",
        plural(index.event_count(), "event"),
        view.timezone
    )
    .unwrap();

    if index.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No events found.").unwrap();
        writeln!(output, "Try adjusting filters or search terms.").unwrap();
    }

    for day in index.days() {
        writeln!(output).unwrap();
        writeln!(
            output,
            "{} ({})",
            day.label(),
            plural(day.event_count(), "event")
        )
        .unwrap();

        for group in &day.competitions {
            writeln!(output, "  {} ({})", group.title, group.events.len()).unwrap();
            for event in &group.events {
                write_event(&mut output, event, index.channels(), ui, view);
            }
        }
    }

    if !index.skipped().is_empty() {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Skipped {}:",
            plural(index.skipped().len(), "malformed record")
        )
        .unwrap();
        for skipped in index.skipped() {
            let id = skipped.id.as_deref().unwrap_or("(no id)");
            writeln!(output, "  #{} {id}: {}", skipped.position, skipped.error).unwrap();
        }
    }

    output
}

fn write_event<Tz>(
    output: &mut String,
    event: &Event,
    channels: &ChannelDirectory,
    ui: &EventUiState,
    view: &View<'_, Tz>,
) where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let kickoff = event.start_time.with_timezone(view.tz).format("%H:%M");
    let status = event.status.as_str().to_uppercase();
    let matchup = event.score_line().map_or_else(
        || format!("{} vs {}", event.home.name, event.away.name),
        |score| format!("{} {score} {}", event.home.name, event.away.name),
    );
    let star = if ui.is_favourited(&event.id) { " ★" } else { "" };
    writeln!(output, "    {kickoff}  {status:<8}  {matchup}{star}").unwrap();

    let place = [
        Some(event.venue.name.as_str()),
        event.venue.city.as_deref(),
        event.venue.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");
    let summary = [Some(event.sport.as_str()), event.stage.as_deref(), Some(place.as_str())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    if !summary.is_empty() {
        writeln!(output, "{DETAIL_INDENT}{summary}").unwrap();
    }

    let preview = channels.preview(event, CHANNEL_PREVIEW_LIMIT);
    if !preview.shown.is_empty() {
        write!(output, "{DETAIL_INDENT}TV: {}", preview.shown.join(", ")).unwrap();
        if preview.more > 0 {
            write!(output, " (+{} more)", preview.more).unwrap();
        }
        writeln!(output).unwrap();
    }

    if ui.tiles_enabled(&event.id) {
        let tiles = action_labels(event.actions);
        if !tiles.is_empty() {
            writeln!(output, "{DETAIL_INDENT}Tiles: {}", tiles.join(" · ")).unwrap();
        }
    }

    if view.details {
        write_match_centre(output, event);
    }
}

fn write_match_centre(output: &mut String, event: &Event) {
    let tab = event.default_tab();
    writeln!(output, "{DETAIL_INDENT}{}:", tab_title(tab)).unwrap();

    let entries: Vec<String> = match tab {
        MatchTab::Events => event
            .timeline()
            .into_iter()
            .map(|entry| format!("{}' {}: {}", entry.minute, entry.kind, entry.text))
            .collect(),
        MatchTab::Odds => event
            .detail
            .odds
            .iter()
            .map(|odd| format!("{} {}", odd.label, odd.value))
            .collect(),
        MatchTab::Stats => event
            .detail
            .stats
            .iter()
            .map(|stat| {
                let unit = stat.unit.as_deref().unwrap_or_default();
                format!("{}: {}{unit} - {}{unit}", stat.label, stat.home, stat.away)
            })
            .collect(),
    };

    if entries.is_empty() {
        writeln!(output, "{DETAIL_INDENT}  (nothing yet)").unwrap();
    }
    for entry in entries {
        writeln!(output, "{DETAIL_INDENT}  {entry}").unwrap();
    }
}

const fn tab_title(tab: MatchTab) -> &'static str {
    match tab {
        MatchTab::Events => "Events",
        MatchTab::Odds => "Odds",
        MatchTab::Stats => "Stats",
    }
}

fn action_labels(actions: EventActions) -> Vec<&'static str> {
    [
        (actions.buy_tickets, "Buy tickets"),
        (actions.plan_trip, "Plan trip"),
        (actions.shop, "Shop"),
        (actions.engage, "Engage"),
        (actions.watch_online, "Watch online"),
        (actions.read_more, "Read more"),
    ]
    .into_iter()
    .filter_map(|(enabled, label)| enabled.then_some(label))
    .collect()
}

#[derive(Serialize)]
struct IndexJson<'a> {
    timezone: &'a str,
    total: usize,
    days: Vec<DayJson<'a>>,
    skipped: Vec<SkippedJson<'a>>,
    favourites: Vec<&'a str>,
}

#[derive(Serialize)]
struct DayJson<'a> {
    date: NaiveDate,
    label: String,
    competitions: &'a [CompetitionGroup],
}

#[derive(Serialize)]
struct SkippedJson<'a> {
    position: usize,
    id: Option<&'a str>,
    error: String,
}

pub fn format_index_json(index: &EventIndex, ui: &EventUiState, timezone: &str) -> Result<String> {
    let mut favourites: Vec<&str> = ui.favourites().map(|id| id.as_str()).collect();
    favourites.sort_unstable();

    let view = IndexJson {
        timezone,
        total: index.event_count(),
        days: index
            .days()
            .iter()
            .map(|day| DayJson {
                date: day.day,
                label: day.label(),
                competitions: &day.competitions,
            })
            .collect(),
        skipped: index
            .skipped()
            .iter()
            .map(|skipped| SkippedJson {
                position: skipped.position,
                id: skipped.id.as_deref(),
                error: skipped.error.to_string(),
            })
            .collect(),
        favourites,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn format_channels(channels: &ChannelDirectory) -> String {
    let mut output = String::new();
    writeln!(output, "TV CHANNELS ({})", channels.len()).unwrap();

    if channels.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No channels available.").unwrap();
        return output;
    }

    let width = channels
        .iter()
        .map(|channel| channel.name.chars().count())
        .max()
        .unwrap_or(0);
    for channel in channels {
        writeln!(
            output,
            "  {:<width$}  {:<8}  {}",
            channel.name,
            channel.region_label(),
            channel.access_label()
        )
        .unwrap();
    }

    output
}

pub fn format_channels_json(channels: &ChannelDirectory) -> Result<String> {
    let channels: Vec<&Channel> = channels.iter().collect();
    Ok(serde_json::to_string_pretty(&channels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use insta::assert_snapshot;
    use le_core::{EventFilter, EventId, EventRecord};
    use serde_json::json;

    fn records() -> Vec<EventRecord> {
        serde_json::from_value(json!([
            {
                "id": "evt_001",
                "sport": "Football",
                "competition": "Premier League",
                "stage": "Matchday 17",
                "startTimeISO": "2025-12-16T18:45:00Z",
                "status": "live",
                "venue": { "name": "Emirates Stadium", "city": "London", "country": "UK" },
                "home": { "name": "Arsenal", "score": 1 },
                "away": { "name": "Aston Villa", "score": 1 },
                "tvChannelIds": ["sky", "beins", "espn", "tsn"],
                "actions": { "watchOnline": true, "readMore": true },
                "matchEvents": [
                    { "minute": 58, "type": "goal", "text": "Watkins levels" },
                    { "minute": 23, "type": "goal", "text": "Saka opens the scoring" }
                ]
            },
            {
                "id": "evt_002",
                "sport": "Cricket",
                "competition": "Big Bash League",
                "stage": "League",
                "startTimeISO": "2025-12-16T09:15:00Z",
                "status": "upcoming",
                "venue": { "name": "Bellerive Oval", "city": "Hobart", "country": "AU" },
                "home": { "name": "Hobart Hurricanes" },
                "away": { "name": "Sydney Thunder" },
                "tvChannelIds": ["star", "missing"],
                "odds": [
                    { "label": "Hurricanes", "value": "1.85" },
                    { "label": "Thunder", "value": "1.95" }
                ]
            },
            {
                "id": "evt_003",
                "sport": "Basketball",
                "competition": "EuroLeague",
                "startTimeISO": "2025-12-15T20:00:00Z",
                "status": "finished",
                "venue": { "name": "Coca-Cola Arena", "city": "Dubai" },
                "home": { "name": "Dubai Basketball", "score": 88 },
                "away": { "name": "Maccabi Tel Aviv", "score": 84 },
                "actions": { "shop": true },
                "stats": [
                    { "label": "Rebounds", "home": 41, "away": 36 },
                    { "label": "3PT", "home": 38, "away": 31, "unit": "%" }
                ]
            }
        ]))
        .unwrap()
    }

    fn channels() -> Vec<Channel> {
        serde_json::from_value(json!([
            { "id": "tsn", "name": "TSN", "region": "CA", "isFree": false },
            { "id": "sky", "name": "Sky Sports", "region": "UK", "isFree": false },
            { "id": "espn", "name": "ESPN", "region": "US" },
            { "id": "star", "name": "Star Sports", "region": "IN", "isFree": false },
            { "id": "beins", "name": "beIN SPORTS", "region": "MENA", "isFree": false },
            { "id": "ten", "name": "Ten Sports", "isFree": true }
        ]))
        .unwrap()
    }

    fn index(filter: &EventFilter) -> EventIndex {
        EventIndex::build_in(&Utc, &records(), &channels(), filter)
    }

    fn id(raw: &str) -> EventId {
        EventId::new(raw).unwrap()
    }

    fn utc_view(details: bool) -> View<'static, Utc> {
        View {
            tz: &Utc,
            timezone: "UTC",
            details,
        }
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "event"), "0 events");
        assert_eq!(plural(1, "event"), "1 event");
        assert_eq!(plural(2, "malformed record"), "2 malformed records");
    }

    #[test]
    fn test_index_with_details() {
        let mut ui = EventUiState::new();
        ui.toggle_favourite(&id("evt_001"));
        ui.toggle_tiles(&id("evt_003"));

        let output = format_index(&index(&EventFilter::default()), &ui, &utc_view(true));
        assert_snapshot!(output);
    }

    #[test]
    fn test_index_without_details_omits_match_centre() {
        let output = format_index(
            &index(&EventFilter::default()),
            &EventUiState::new(),
            &utc_view(false),
        );
        assert!(!output.contains("Odds:"));
        assert!(!output.contains("Saka"));
        assert!(output.contains("Tiles: Shop"));
        assert!(!output.contains('★'));
    }

    #[test]
    fn test_empty_index_hint() {
        let filter = EventFilter::new(le_core::StatusFilter::All, "curling");
        let output = format_index(&index(&filter), &EventUiState::new(), &utc_view(false));
        assert_eq!(
            output,
            "LIVE EVENTS: 0 events (UTC)\n\nNo events found.\nTry adjusting filters or search terms.\n"
        );
    }

    #[test]
    fn test_skipped_records_are_summarized() {
        let mut records = records();
        records[1].start_time = "tomorrow".to_string();
        records[2].id = String::new();
        let index = EventIndex::build_in(&Utc, &records, &channels(), &EventFilter::default());

        let output = format_index(&index, &EventUiState::new(), &utc_view(false));
        assert!(output.starts_with("LIVE EVENTS: 1 event (UTC)\n"));
        assert!(output.contains("Skipped 2 malformed records:\n"));
        assert!(output.contains("  #1 evt_002: event evt_002 has invalid start time \"tomorrow\""));
        assert!(output.contains("  #2 (no id): event record has no id\n"));
    }

    #[test]
    fn test_index_json() {
        let mut ui = EventUiState::new();
        ui.toggle_favourite(&id("evt_002"));
        ui.toggle_favourite(&id("evt_001"));

        let output = format_index_json(&index(&EventFilter::default()), &ui, "UTC").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["timezone"], "UTC");
        assert_eq!(value["favourites"], json!(["evt_001", "evt_002"]));
        assert_eq!(value["days"][0]["date"], "2025-12-15");
        assert_eq!(value["days"][1]["label"], "Tuesday, Dec 16, 2025");
        assert_eq!(
            value["days"][1]["competitions"][1]["events"][0]["startTime"],
            "2025-12-16T18:45:00Z"
        );
        assert_eq!(value["skipped"], json!([]));
    }

    #[test]
    fn test_channels() {
        let directory = ChannelDirectory::new(&channels());
        assert_snapshot!(format_channels(&directory));
    }

    #[test]
    fn test_channels_empty() {
        let output = format_channels(&ChannelDirectory::new(&[]));
        assert_eq!(output, "TV CHANNELS (0)\n\nNo channels available.\n");
    }

    #[test]
    fn test_channels_json_keeps_wire_names() {
        let output = format_channels_json(&ChannelDirectory::new(&channels())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["isFree"], false);
        assert_eq!(value[2].get("isFree"), None);
        assert_eq!(value[5]["name"], "Ten Sports");
    }
}
