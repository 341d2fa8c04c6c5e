//! Sporting fixtures and the TV channels they reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ChannelId, EventId, Status};

/// Per-record data errors. A failing record is skipped, never the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The record carried no usable id.
    #[error("event record has no id")]
    MissingId,

    /// The start time was not an RFC 3339 instant.
    #[error("event {id} has invalid start time {value:?}: {source}")]
    InvalidStartTime {
        id: EventId,
        value: String,
        source: chrono::ParseError,
    },

    /// Another record in the same batch already used this id.
    #[error("duplicate event id {id}")]
    DuplicateId { id: EventId },
}

/// A fixture as supplied by a data source, before validation.
///
/// Field names follow the JSON the fixtures ship in (`startTimeISO`,
/// `tvChannelIds`); the older field names are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub competition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, rename = "startTimeISO", alias = "startTime")]
    pub start_time: String,
    pub status: Status,
    #[serde(default)]
    pub venue: Venue,
    #[serde(default)]
    pub home: Team,
    #[serde(default)]
    pub away: Team,
    #[serde(default, alias = "tvChannelRefs")]
    pub tv_channel_ids: Vec<String>,
    #[serde(default)]
    pub actions: EventActions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_events: Vec<MatchEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub odds: Vec<MatchOdd>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<MatchStat>,
}

/// A validated fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub sport: String,
    pub competition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub start_time: DateTime<Utc>,
    pub status: Status,
    pub venue: Venue,
    pub home: Team,
    pub away: Team,
    pub tv_channel_ids: Vec<ChannelId>,
    pub actions: EventActions,
    pub detail: MatchDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

/// Quick actions an event offers. Display-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventActions {
    pub buy_tickets: bool,
    pub plan_trip: bool,
    pub shop: bool,
    pub engage: bool,
    pub watch_online: bool,
    pub read_more: bool,
}

/// A single entry on the match timeline (goal, card, wicket...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOdd {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStat {
    pub label: String,
    pub home: f64,
    pub away: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Nested match-centre detail, passed through the pipeline untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub match_events: Vec<MatchEvent>,
    pub odds: Vec<MatchOdd>,
    pub stats: Vec<MatchStat>,
}

/// The match-centre tab opened first for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTab {
    Events,
    Odds,
    Stats,
}

/// A TV channel. Events reference channels by id; many events may share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
}

impl Channel {
    /// Region label, `Global` when the channel has none.
    pub fn region_label(&self) -> &str {
        self.region.as_deref().unwrap_or("Global")
    }

    /// Channels without an explicit flag are treated as subscription.
    pub fn access_label(&self) -> &'static str {
        if self.is_free.unwrap_or(false) {
            "Free"
        } else {
            "Subscription"
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = DataError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = EventId::new(record.id).map_err(|_| DataError::MissingId)?;
        let start_time = match DateTime::parse_from_rfc3339(record.start_time.trim()) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(source) => {
                return Err(DataError::InvalidStartTime {
                    id,
                    value: record.start_time,
                    source,
                });
            }
        };

        // Blank channel refs can never resolve; drop them here.
        let tv_channel_ids = record
            .tv_channel_ids
            .into_iter()
            .filter_map(|raw| ChannelId::new(raw).ok())
            .collect();

        Ok(Self {
            id,
            sport: record.sport,
            competition: record.competition,
            stage: record.stage.filter(|s| !s.is_empty()),
            start_time,
            status: record.status,
            venue: record.venue,
            home: record.home,
            away: record.away,
            tv_channel_ids,
            actions: record.actions,
            detail: MatchDetail {
                match_events: record.match_events,
                odds: record.odds,
                stats: record.stats,
            },
        })
    }
}

impl Event {
    /// Lower-cased text the free-text filter searches.
    ///
    /// Present fields only, joined by single spaces: sport, competition,
    /// stage, home, away, venue name, city, country.
    pub fn searchable_text(&self) -> String {
        [
            Some(self.sport.as_str()),
            Some(self.competition.as_str()),
            self.stage.as_deref(),
            Some(self.home.name.as_str()),
            Some(self.away.name.as_str()),
            Some(self.venue.name.as_str()),
            self.venue.city.as_deref(),
            self.venue.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    pub const fn default_tab(&self) -> MatchTab {
        match self.status {
            Status::Live => MatchTab::Events,
            Status::Upcoming => MatchTab::Odds,
            Status::Finished => MatchTab::Stats,
        }
    }

    /// Match timeline ordered by minute; equal minutes keep feed order.
    pub fn timeline(&self) -> Vec<&MatchEvent> {
        let mut entries: Vec<_> = self.detail.match_events.iter().collect();
        entries.sort_by_key(|entry| entry.minute);
        entries
    }

    /// `home - away` when both sides have a score.
    pub fn score_line(&self) -> Option<String> {
        match (self.home.score, self.away.score) {
            (Some(home), Some(away)) => Some(format!("{home} - {away}")),
            _ => None,
        }
    }
}
