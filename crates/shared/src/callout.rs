use crate::carousel::EventCarousel;
use crate::models::VenueId;

/// Which venue, if any, has its callout open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CalloutState {
    #[default]
    Closed,
    Open {
        venue_id: VenueId,
        carousel: EventCarousel,
    },
}

/// Outcome of a single state machine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalloutTransition {
    Opened(VenueId),
    /// Went straight from one venue to another without passing through closed.
    Switched { from: VenueId, to: VenueId },
    Closed(VenueId),
    Unchanged,
}

/// Owner of the single open callout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalloutStateMachine {
    state: CalloutState,
}

impl CalloutStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalloutState {
        &self.state
    }

    pub fn active_venue(&self) -> Option<&VenueId> {
        match &self.state {
            CalloutState::Closed => None,
            CalloutState::Open { venue_id, .. } => Some(venue_id),
        }
    }

    pub fn is_open_for(&self, venue_id: &VenueId) -> bool {
        self.active_venue().is_some_and(|v| v.matches(venue_id))
    }

    pub fn carousel(&self) -> Option<&EventCarousel> {
        match &self.state {
            CalloutState::Closed => None,
            CalloutState::Open { carousel, .. } => Some(carousel),
        }
    }

    pub fn carousel_mut(&mut self) -> Option<&mut EventCarousel> {
        match &mut self.state {
            CalloutState::Closed => None,
            CalloutState::Open { carousel, .. } => Some(carousel),
        }
    }

    /// Marker tap on `venue_id`, which currently has `event_count` events.
    ///
    /// Every transition into an open state starts the carousel at the first event.
    pub fn toggle(&mut self, venue_id: &VenueId, event_count: usize) -> CalloutTransition {
        let transition = match &self.state {
            CalloutState::Open { venue_id: open, .. } if open.matches(venue_id) => {
                CalloutTransition::Closed(open.clone())
            }
            _ if event_count == 0 => CalloutTransition::Unchanged,
            CalloutState::Open { venue_id: open, .. } => CalloutTransition::Switched {
                from: open.clone(),
                to: venue_id.clone(),
            },
            CalloutState::Closed => CalloutTransition::Opened(venue_id.clone()),
        };

        match &transition {
            CalloutTransition::Closed(_) => self.state = CalloutState::Closed,
            CalloutTransition::Opened(to) | CalloutTransition::Switched { to, .. } => {
                self.state = CalloutState::Open {
                    venue_id: to.clone(),
                    carousel: EventCarousel::new(),
                };
            }
            CalloutTransition::Unchanged => {}
        }

        if transition != CalloutTransition::Unchanged {
            tracing::debug!(?transition, "callout toggled");
        }
        transition
    }

    /// Force the callout closed regardless of which venue owns it.
    pub fn close(&mut self) -> CalloutTransition {
        match std::mem::take(&mut self.state) {
            CalloutState::Closed => CalloutTransition::Unchanged,
            CalloutState::Open { venue_id, .. } => {
                tracing::debug!(%venue_id, "callout closed");
                CalloutTransition::Closed(venue_id)
            }
        }
    }
}
