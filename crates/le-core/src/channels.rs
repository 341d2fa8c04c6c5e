//! Id lookup of TV channels referenced by events.

use std::collections::HashMap;

use crate::event::{Channel, Event};
use crate::types::ChannelId;

/// Read-only channel collection keyed by id.
///
/// Insertion order is kept for listing. A later channel with an id already
/// present replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct ChannelDirectory {
    channels: Vec<Channel>,
    positions: HashMap<ChannelId, usize>,
}

/// Channel names for one event, capped for compact display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPreview<'a> {
    pub shown: Vec<&'a str>,
    pub more: usize,
}

impl ChannelDirectory {
    pub fn new(channels: &[Channel]) -> Self {
        let mut directory = Self::default();
        for channel in channels {
            directory.insert(channel.clone());
        }
        directory
    }

    fn insert(&mut self, channel: Channel) {
        if let Some(&position) = self.positions.get(&channel.id) {
            self.channels[position] = channel;
        } else {
            self.positions.insert(channel.id.clone(), self.channels.len());
            self.channels.push(channel);
        }
    }

    pub fn get(&self, id: &ChannelId) -> Option<&Channel> {
        self.positions.get(id).map(|&position| &self.channels[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Resolved channel names in reference order. Unknown ids are dropped.
    pub fn names_for<'a>(&'a self, event: &Event) -> Vec<&'a str> {
        event
            .tv_channel_ids
            .iter()
            .filter_map(|id| self.get(id))
            .map(|channel| channel.name.as_str())
            .collect()
    }

    pub fn preview<'a>(&'a self, event: &Event, limit: usize) -> ChannelPreview<'a> {
        let mut shown = self.names_for(event);
        let more = shown.len().saturating_sub(limit);
        shown.truncate(limit);
        ChannelPreview { shown, more }
    }
}

impl<'a> IntoIterator for &'a ChannelDirectory {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
