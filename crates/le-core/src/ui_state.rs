//! Per-event UI toggles owned by the presentation layer.
//!
//! The index never consults this state; renderers read it alongside.

use std::collections::HashMap;

use crate::types::EventId;

/// Favourite and quick-tile toggles keyed by event id.
///
/// Absent entries read as defaults: tiles enabled, not favourited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUiState {
    tiles_enabled: HashMap<EventId, bool>,
    favourited: HashMap<EventId, bool>,
}

impl EventUiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles_enabled(&self, id: &EventId) -> bool {
        self.tiles_enabled.get(id).copied().unwrap_or(true)
    }

    pub fn is_favourited(&self, id: &EventId) -> bool {
        self.favourited.get(id).copied().unwrap_or(false)
    }

    /// Flips quick-tile visibility and returns the new value.
    pub fn toggle_tiles(&mut self, id: &EventId) -> bool {
        let enabled = !self.tiles_enabled(id);
        self.tiles_enabled.insert(id.clone(), enabled);
        enabled
    }

    /// Flips the favourite flag and returns the new value.
    pub fn toggle_favourite(&mut self, id: &EventId) -> bool {
        let favourited = !self.is_favourited(id);
        self.favourited.insert(id.clone(), favourited);
        favourited
    }

    /// Forgets all UI state for one event.
    pub fn clear(&mut self, id: &EventId) {
        self.tiles_enabled.remove(id);
        self.favourited.remove(id);
    }

    /// Ids currently marked favourite, in no particular order.
    pub fn favourites(&self) -> impl Iterator<Item = &EventId> {
        self.favourited
            .iter()
            .filter(|(_, favourited)| **favourited)
            .map(|(id, _)| id)
    }
}
