//! Status and free-text filtering.

use crate::event::Event;
use crate::types::StatusFilter;

/// Filter state supplied by the presentation layer on every rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub status: StatusFilter,
    pub query: String,
}

impl EventFilter {
    pub fn new(status: StatusFilter, query: impl Into<String>) -> Self {
        Self {
            status,
            query: query.into(),
        }
    }

    /// Normalized needle: trimmed and lower-cased. `None` means "match all".
    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matcher().matches(event)
    }

    /// Precomputes the needle so a batch doesn't re-normalize per event.
    pub(crate) fn matcher(&self) -> Matcher {
        Matcher {
            status: self.status,
            needle: self.needle(),
        }
    }
}

pub(crate) struct Matcher {
    status: StatusFilter,
    needle: Option<String>,
}

impl Matcher {
    pub(crate) fn matches(&self, event: &Event) -> bool {
        if !self.status.admits(event.status) {
            return false;
        }
        self.needle
            .as_deref()
            .is_none_or(|needle| event.searchable_text().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::event::EventRecord;
    use crate::types::Status;

    fn event() -> Event {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": "evt_002",
            "sport": "Cricket",
            "competition": "Big Bash League",
            "startTimeISO": "2025-12-16T09:15:00Z",
            "status": "upcoming",
            "venue": { "name": "Bellerive Oval", "city": "Hobart" },
            "home": { "name": "Hobart Hurricanes" },
            "away": { "name": "Sydney Thunder" }
        }))
        .unwrap();
        Event::try_from(record).unwrap()
    }

    #[test]
    fn blank_query_matches_every_status_admitted() {
        let event = event();
        assert!(EventFilter::default().matches(&event));
        assert!(EventFilter::new(StatusFilter::All, "   ").matches(&event));
        assert!(!EventFilter::new(StatusFilter::Only(Status::Live), "").matches(&event));
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let event = event();
        assert!(EventFilter::new(StatusFilter::All, "  THUNDER ").matches(&event));
        assert!(EventFilter::new(Status::Upcoming.into(), "hobart").matches(&event));
        assert!(!EventFilter::new(StatusFilter::All, "melbourne").matches(&event));
    }

    #[test]
    fn haystack_joins_present_fields_with_single_spaces() {
        let event = event();
        assert!(EventFilter::new(StatusFilter::All, "league hobart").matches(&event));
        assert!(!EventFilter::new(StatusFilter::All, "oval  hobart").matches(&event));
    }
}
