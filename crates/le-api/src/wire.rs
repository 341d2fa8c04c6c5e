//! SportsDB-shaped feed payloads and their normalization into core records.

use std::collections::HashSet;

use le_core::{Channel, ChannelId, EventActions, EventRecord, Status, Team, Venue};
use serde::Deserialize;
use serde_json::Value;

/// Statuses the feed uses for fixtures in progress (substring match).
const LIVE_MARKERS: [&str; 7] = ["LIVE", "IN PLAY", "1H", "2H", "HT", "ET", "PEN"];

/// Envelope returned by both feed endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub events: Vec<SportsDbEvent>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// One fixture as the feed sends it. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SportsDbEvent {
    pub id_event: Option<String>,
    pub str_event: Option<String>,
    pub str_league: Option<String>,
    pub str_sport: Option<String>,
    pub str_home_team: Option<String>,
    pub str_away_team: Option<String>,
    pub date_event: Option<String>,
    pub str_time: Option<String>,
    pub str_status: Option<String>,
    pub str_venue: Option<String>,
    pub str_city: Option<String>,
    pub str_country: Option<String>,
    #[serde(rename = "strTVStation")]
    pub str_tv_station: Option<String>,
    pub int_home_score: Option<Value>,
    pub int_away_score: Option<Value>,
}

impl SportsDbEvent {
    /// Maps the wire fixture into a core record.
    ///
    /// Validation is left to the core: a missing date produces an empty
    /// start time, which the index reports as a skipped record.
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            id: text(self.id_event.as_ref()),
            sport: text(self.str_sport.as_ref()),
            competition: text(self.str_league.as_ref()),
            stage: None,
            start_time: start_time(self.date_event.as_deref(), self.str_time.as_deref()),
            status: classify_status(self.str_status.as_deref().unwrap_or_default()),
            venue: Venue {
                name: text(self.str_venue.as_ref()),
                city: non_empty(self.str_city.as_ref()),
                country: non_empty(self.str_country.as_ref()),
            },
            home: Team {
                name: text(self.str_home_team.as_ref()),
                short: None,
                score: score(self.int_home_score.as_ref()),
            },
            away: Team {
                name: text(self.str_away_team.as_ref()),
                short: None,
                score: score(self.int_away_score.as_ref()),
            },
            tv_channel_ids: self
                .channel_names()
                .filter_map(channel_id)
                .map(String::from)
                .collect(),
            actions: EventActions {
                watch_online: self.str_tv_station.as_deref().is_some_and(|s| !s.trim().is_empty()),
                read_more: true,
                ..EventActions::default()
            },
            match_events: Vec::new(),
            odds: Vec::new(),
            stats: Vec::new(),
        }
    }

    fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.str_tv_station
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Channels referenced anywhere in the feed, first occurrence wins.
pub fn collect_channels(events: &[SportsDbEvent]) -> Vec<Channel> {
    let mut seen = HashSet::new();
    let mut channels = Vec::new();
    for name in events.iter().flat_map(SportsDbEvent::channel_names) {
        let Some(id) = channel_id(name) else {
            continue;
        };
        if seen.insert(id.clone()) {
            channels.push(Channel {
                id,
                name: name.to_string(),
                region: known_region(name).map(String::from),
                is_free: None,
            });
        }
    }
    channels
}

/// Feed status text → core status.
///
/// Finished markers are checked first: "AET" would otherwise match "ET".
pub fn classify_status(raw: &str) -> Status {
    let upper = raw.trim().to_uppercase();
    if matches!(upper.as_str(), "FT" | "AET" | "AP") || upper.contains("FINISHED") {
        Status::Finished
    } else if LIVE_MARKERS.iter().any(|marker| upper.contains(marker)) {
        Status::Live
    } else {
        Status::Upcoming
    }
}

/// `dateEvent` + `strTime` as an RFC 3339 UTC instant.
fn start_time(date: Option<&str>, time: Option<&str>) -> String {
    let date = date.map(str::trim).unwrap_or_default();
    if date.is_empty() {
        return String::new();
    }
    let time = time.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("00:00:00");
    let time: String = time.chars().take(8).collect();
    // "18:45" has no seconds component
    let time = if time.len() == 5 { format!("{time}:00") } else { time };
    format!("{date}T{time}Z")
}

/// Slug id for a channel name: "Sky Sports" → "sky-sports".
fn channel_id(name: &str) -> Option<ChannelId> {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    ChannelId::new(slug).ok()
}

fn known_region(name: &str) -> Option<&'static str> {
    let region = match name {
        "Sky Sports" | "Sky Sports Main Event" | "Sky Sports Premier League"
        | "Sky Sports Football" | "BT Sport" | "TNT Sports" | "BBC" | "BBC Sport" | "ITV" => "UK",
        "ESPN" | "ESPN Deportes" | "Fox Sports" | "NBC" | "NBC Sports" | "CBS" | "CBS Sports"
        | "ABC" | "TNT" | "NBA TV" => "USA",
        "TSN" | "Sportsnet" | "CTV" => "Canada",
        "Star Sports" => "India",
        "Eurosport" => "Europe",
        "Canal+" | "Canal+ Sport" => "France",
        "Movistar LaLiga" => "Spain",
        "SuperSport" | "SuperSport Premier League" => "Africa",
        "Amazon Prime" | "Amazon Prime Video" | "Netflix" | "Paramount+" | "DAZN"
        | "beIN Sports" => "Global",
        _ => return None,
    };
    Some(region)
}

fn text(value: Option<&String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from)
}

fn score(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}
