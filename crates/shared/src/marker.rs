use crate::carousel::EventCarousel;
use crate::models::EventId;
use crate::venue_index::{VenueEventGroup, MAX_EVENTS_PER_VENUE};

/// Event count badge on a marker dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub count: usize,
    pub truncated: bool,
}

impl Badge {
    pub fn for_group(group: &VenueEventGroup) -> Self {
        Badge {
            count: group.events.len(),
            truncated: group.is_truncated(),
        }
    }

    pub fn label(&self) -> String {
        if self.truncated {
            format!("{MAX_EVENTS_PER_VENUE}+")
        } else {
            self.count.to_string()
        }
    }
}

/// Visual state of a marker dot, resolved once per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVisual {
    Inactive,
    HasEvents(Badge),
    Highlighted(Badge),
}

impl MarkerVisual {
    pub fn resolve(
        group: &VenueEventGroup,
        highlighted_event_id: Option<&EventId>,
        hovered: bool,
    ) -> Self {
        if group.events.is_empty() {
            return MarkerVisual::Inactive;
        }
        let badge = Badge::for_group(group);
        let highlighted = hovered
            || highlighted_event_id.is_some_and(|h| group.contains_event(h));
        if highlighted {
            MarkerVisual::Highlighted(badge)
        } else {
            MarkerVisual::HasEvents(badge)
        }
    }

    pub fn badge(&self) -> Option<Badge> {
        match self {
            MarkerVisual::Inactive => None,
            MarkerVisual::HasEvents(b) | MarkerVisual::Highlighted(b) => Some(*b),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MarkerVisual::Inactive => "marker-dot marker-inactive",
            MarkerVisual::HasEvents(_) => "marker-dot marker-active",
            MarkerVisual::Highlighted(_) => "marker-dot marker-active marker-highlighted",
        }
    }

    pub fn scale(&self) -> f64 {
        match self {
            MarkerVisual::Highlighted(_) => 1.3,
            _ => 1.0,
        }
    }
}

/// Image shown at the top of a callout card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalloutImage {
    Event(String),
    Venue(String),
    Placeholder,
}

impl CalloutImage {
    pub fn pick(event_image: Option<&str>, venue_image: Option<&str>) -> Self {
        let usable = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        if let Some(url) = usable(event_image) {
            CalloutImage::Event(url)
        } else if let Some(url) = usable(venue_image) {
            CalloutImage::Venue(url)
        } else {
            CalloutImage::Placeholder
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            CalloutImage::Event(url) | CalloutImage::Venue(url) => Some(url),
            CalloutImage::Placeholder => None,
        }
    }
}

/// Everything a callout card renders for the current carousel position.
#[derive(Debug, Clone, PartialEq)]
pub struct CalloutCard {
    pub event_index: usize,
    pub image: CalloutImage,
    pub title: String,
    pub venue_name: String,
    pub position_label: Option<String>,
    pub navigable: bool,
    pub show_venue_action: bool,
}

impl CalloutCard {
    pub fn build(
        group: &VenueEventGroup,
        carousel: &EventCarousel,
        venue_action_available: bool,
    ) -> Option<Self> {
        let event = carousel.current(&group.events)?;
        let venue_name = if event.venue_name.is_empty() {
            group.venue.name.clone()
        } else {
            event.venue_name.clone()
        };
        Some(CalloutCard {
            event_index: carousel.index(group.events.len()),
            image: CalloutImage::pick(event.image.as_deref(), group.venue.image.as_deref()),
            title: event.title.clone(),
            venue_name,
            position_label: carousel.position_label(group),
            navigable: EventCarousel::is_navigable(group.events.len()),
            show_venue_action: venue_action_available,
        })
    }
}
