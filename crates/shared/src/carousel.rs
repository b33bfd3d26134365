use crate::models::Event;
use crate::venue_index::{VenueEventGroup, MAX_EVENTS_PER_VENUE};

/// Cursor over the events shown inside one open callout.
///
/// The cursor is only meaningful against the capped event list of the venue
/// whose callout is open; every read reduces it modulo that list's length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCarousel {
    cursor: usize,
}

impl EventCarousel {
    pub fn new() -> Self {
        EventCarousel { cursor: 0 }
    }

    pub fn index(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.cursor % len
        }
    }

    /// Arrows are only offered when there is somewhere to go.
    pub fn is_navigable(len: usize) -> bool {
        len > 1
    }

    pub fn next(&mut self, len: usize) {
        if !Self::is_navigable(len) {
            return;
        }
        self.cursor = (self.index(len) + 1) % len;
    }

    pub fn previous(&mut self, len: usize) {
        if !Self::is_navigable(len) {
            return;
        }
        self.cursor = (self.index(len) + len - 1) % len;
    }

    pub fn current<'a>(&self, events: &'a [Event]) -> Option<&'a Event> {
        events.get(self.index(events.len()))
    }

    /// Footer text such as "3 of 9 (showing first 9)". `None` for a single event.
    pub fn position_label(&self, group: &VenueEventGroup) -> Option<String> {
        let len = group.events.len();
        if !Self::is_navigable(len) {
            return None;
        }
        let mut label = format!("{} of {}", self.index(len) + 1, len);
        if group.is_truncated() {
            label.push_str(&format!(" (showing first {MAX_EVENTS_PER_VENUE})"));
        }
        Some(label)
    }
}
