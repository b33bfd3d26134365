use std::collections::HashMap;

use crate::models::{Event, EventId, LatLng, Venue};

/// A venue's callout never pages through more than this many events.
pub const MAX_EVENTS_PER_VENUE: usize = 9;

/// One venue and the (capped) events currently shown at it.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueEventGroup {
    pub venue: Venue,
    pub events: Vec<Event>,
    /// Number of matching events before the cap was applied.
    pub total_events: usize,
    /// Ids of every matching event, including those past the cap.
    pub event_ids: Vec<EventId>,
}

impl VenueEventGroup {
    pub fn is_truncated(&self) -> bool {
        self.total_events > self.events.len()
    }

    pub fn position(&self) -> Option<LatLng> {
        self.venue.coordinate()
    }

    /// True when `id` is any event at this venue, shown in the callout or not.
    pub fn contains_event(&self, id: &EventId) -> bool {
        self.event_ids.iter().any(|e| e == id)
    }
}

/// Group the filtered events under their venues.
///
/// Venue ids match case-insensitively, events keep their incoming order, and
/// venues without a single matching event are left out entirely.
pub fn group_events_by_venue(venues: &[Venue], events: &[Event]) -> Vec<VenueEventGroup> {
    let mut by_venue: HashMap<String, Vec<&Event>> = HashMap::new();
    for event in events {
        if let Some(venue_id) = &event.venue_id {
            by_venue.entry(venue_id.key()).or_default().push(event);
        }
    }

    venues
        .iter()
        .filter_map(|venue| {
            let matching = by_venue.get(&venue.id.key())?;
            if matching.is_empty() {
                return None;
            }
            Some(VenueEventGroup {
                venue: venue.clone(),
                events: matching
                    .iter()
                    .take(MAX_EVENTS_PER_VENUE)
                    .map(|e| (*e).clone())
                    .collect(),
                total_events: matching.len(),
                event_ids: matching.iter().map(|e| e.id.clone()).collect(),
            })
        })
        .collect()
}

/// Groups that get a marker on the map, paired with their position.
///
/// A venue whose coordinates do not parse is skipped without error.
pub fn positioned_markers(groups: &[VenueEventGroup]) -> Vec<(&VenueEventGroup, LatLng)> {
    groups
        .iter()
        .filter_map(|group| group.position().map(|position| (group, position)))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Event, EventId, RawCoordinate, Venue, VenueId};

    pub fn venue(id: &str, lat: f64, lon: f64) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: format!("Venue {id}"),
            latitude: Some(RawCoordinate::Number(lat)),
            longitude: Some(RawCoordinate::Number(lon)),
            image: None,
            address: None,
            venue_type: None,
            size: None,
            city: None,
        }
    }

    pub fn event(id: &str, venue_id: &str) -> Event {
        Event {
            id: EventId::new(id),
            title: format!("Event {id}"),
            image: None,
            venue_id: Some(VenueId::new(venue_id)),
            venue_name: format!("Venue {venue_id}"),
            category: None,
            event_date: None,
            time: None,
            description: None,
            url: None,
        }
    }

    pub fn events_at(venue_id: &str, count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| event(&format!("{venue_id}-{i}"), venue_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{event, events_at, venue};
    use super::*;
    use crate::models::{RawCoordinate, VenueId};

    #[test]
    fn test_groups_events_under_their_venue() {
        let venues = vec![venue("a", 40.0, -73.0), venue("b", 41.0, -74.0)];
        let events = vec![event("1", "a"), event("2", "b"), event("3", "a")];
        let groups = group_events_by_venue(&venues, &events);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].venue.id.as_str(), "a");
        let ids: Vec<&str> = groups[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(groups[1].events.len(), 1);
    }

    #[test]
    fn test_drops_venues_without_events() {
        let venues = vec![venue("a", 40.0, -73.0), venue("empty", 41.0, -74.0)];
        let events = vec![event("1", "a")];
        let groups = group_events_by_venue(&venues, &events);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].venue.id.as_str(), "a");
    }

    #[test]
    fn test_venue_id_match_is_case_insensitive() {
        let venues = vec![venue("Jalopy-01", 40.0, -73.0)];
        let events = vec![event("1", "jalopy-01"), event("2", "JALOPY-01")];
        let groups = group_events_by_venue(&venues, &events);
        assert_eq!(groups[0].events.len(), 2);
    }

    #[test]
    fn test_caps_at_nine_and_flags_truncation() {
        let venues = vec![venue("v", 40.0, -73.0)];
        let events = events_at("v", 11);
        let groups = group_events_by_venue(&venues, &events);
        assert_eq!(groups[0].events.len(), MAX_EVENTS_PER_VENUE);
        assert_eq!(groups[0].total_events, 11);
        assert!(groups[0].is_truncated());
        assert_eq!(groups[0].events[0].id.as_str(), "v-0");
        assert_eq!(groups[0].events[8].id.as_str(), "v-8");
    }

    #[test]
    fn test_exactly_nine_is_not_truncated() {
        let venues = vec![venue("v", 40.0, -73.0)];
        let groups = group_events_by_venue(&venues, &events_at("v", 9));
        assert!(!groups[0].is_truncated());
    }

    #[test]
    fn test_events_without_venue_are_ignored() {
        let venues = vec![venue("v", 40.0, -73.0)];
        let mut orphan = event("x", "v");
        orphan.venue_id = None;
        let groups = group_events_by_venue(&venues, &[orphan]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(group_events_by_venue(&[], &[]).is_empty());
        assert!(group_events_by_venue(&[venue("v", 1.0, 1.0)], &[]).is_empty());
    }

    #[test]
    fn test_truncated_group_still_knows_every_event() {
        let venues = vec![venue("v", 40.0, -73.0)];
        let groups = group_events_by_venue(&venues, &events_at("v", 11));
        assert_eq!(groups[0].event_ids.len(), 11);
        assert!(groups[0].contains_event(&EventId::new("v-10")));
        assert!(!groups[0].contains_event(&EventId::new("w-0")));
    }

    #[test]
    fn test_nan_latitude_venue_gets_no_marker() {
        let mut broken = venue("nan", 0.0, -73.9);
        broken.latitude = Some(RawCoordinate::Text("NaN".to_string()));
        let venues = vec![venue("ok", 40.6, -73.9), broken];
        let mut events = events_at("ok", 2);
        events.extend(events_at("nan", 3));

        let groups = group_events_by_venue(&venues, &events);
        assert_eq!(groups.len(), 2);

        let markers = positioned_markers(&groups);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].0.venue.id, VenueId::new("ok"));
        assert_eq!(markers[0].1, LatLng::new(40.6, -73.9));
    }

    #[test]
    fn test_non_ascii_ids_group_like_they_match() {
        let venues = vec![venue("CAFÉ-Ü", 40.0, -73.0)];
        let groups = group_events_by_venue(&venues, &[event("1", "café-ü")]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].venue.id.matches(&VenueId::new("café-ü")));
    }
}
