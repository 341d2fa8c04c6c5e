//! Core domain logic for the Live Events list.
//!
//! This crate contains:
//! - Fixtures and channels: the validated data model and its wire-facing records
//! - Index: filtering and day/competition grouping of fixtures
//! - Debounce: the trailing-edge debouncer that stabilizes search input

mod channels;
pub mod debounce;
pub mod event;
mod filter;
pub mod index;
pub mod types;
mod ui_state;

pub use channels::{ChannelDirectory, ChannelPreview};
pub use debounce::{DEFAULT_SEARCH_DELAY, DebounceState, Debouncer};
pub use event::{
    Channel, DataError, Event, EventActions, EventRecord, MatchDetail, MatchEvent, MatchOdd,
    MatchStat, MatchTab, Team, Venue,
};
pub use filter::EventFilter;
pub use index::{CompetitionGroup, DayGroup, EventIndex, SkippedRecord, validate_records};
pub use types::{ChannelId, EventId, Status, StatusFilter, ValidationError};
pub use ui_state::EventUiState;
