//! Interaction memory for one map screen.

use crate::arbiter::{ArbiterConfig, BackgroundTap, ClickArbiter, LatchTicket};
use crate::callout::{CalloutStateMachine, CalloutTransition};
use crate::models::{EventId, VenueId};
use crate::venue_index::VenueEventGroup;

/// Tap arbitration plus the callout it drives, owned by a single map surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapInteraction {
    arbiter: ClickArbiter,
    callout: CalloutStateMachine,
    highlighted: Option<Option<EventId>>,
}

impl MapInteraction {
    pub fn new(config: ArbiterConfig) -> Self {
        MapInteraction {
            arbiter: ClickArbiter::new(config),
            callout: CalloutStateMachine::new(),
            highlighted: None,
        }
    }

    pub fn arbiter(&self) -> &ClickArbiter {
        &self.arbiter
    }

    pub fn callout(&self) -> &CalloutStateMachine {
        &self.callout
    }

    pub fn active_venue(&self) -> Option<&VenueId> {
        self.callout.active_venue()
    }

    /// Marker tap: latch first, then toggle. The caller releases the latch
    /// with [`latch_ticket`](Self::latch_ticket) after `latch_window_ms`.
    pub fn marker_tapped(&mut self, group: &VenueEventGroup, now_ms: i64) -> CalloutTransition {
        self.arbiter.marker_tapped(now_ms);
        self.callout.toggle(&group.venue.id, group.events.len())
    }

    pub fn latch_ticket(&self) -> LatchTicket {
        self.arbiter.latch_ticket()
    }

    pub fn release_marker_latch(&mut self, ticket: LatchTicket) -> bool {
        self.arbiter.release_latch(ticket)
    }

    pub fn background_tapped(&mut self, now_ms: i64) -> CalloutTransition {
        match self.arbiter.background_tapped(now_ms) {
            BackgroundTap::Suppressed => CalloutTransition::Unchanged,
            BackgroundTap::Accepted => self.callout.close(),
        }
    }

    pub fn close_callout(&mut self) -> CalloutTransition {
        self.callout.close()
    }

    /// Reflect the screen's highlighted event. A change closes the callout;
    /// the first value seen only seeds the comparison.
    pub fn sync_highlight(&mut self, highlighted: Option<EventId>) -> CalloutTransition {
        let previous = self.highlighted.replace(highlighted.clone());
        match previous {
            Some(prev) if prev != highlighted => self.callout.close(),
            _ => CalloutTransition::Unchanged,
        }
    }

    pub fn next_event(&mut self, group: &VenueEventGroup) {
        if self.callout.is_open_for(&group.venue.id) {
            if let Some(carousel) = self.callout.carousel_mut() {
                carousel.next(group.events.len());
            }
        }
    }

    pub fn previous_event(&mut self, group: &VenueEventGroup) {
        if self.callout.is_open_for(&group.venue.id) {
            if let Some(carousel) = self.callout.carousel_mut() {
                carousel.previous(group.events.len());
            }
        }
    }
}
