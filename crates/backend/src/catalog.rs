use std::collections::BTreeSet;
use std::path::Path;

use nightout_shared::filters::{EventFilters, ALL};
use nightout_shared::models::{display_city_name, Event, Venue, VenueId};

pub struct Catalog {
    pub venues: Vec<Venue>,
    /// Sorted by date, undated events last.
    pub events: Vec<Event>,
}

fn read_json<T: serde::de::DeserializeOwned>(dir: &Path, file: &str) -> Result<T, String> {
    let path = dir.join(file);
    let data = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {}", file, e))
}

impl Catalog {
    pub fn load(assets_dir: &Path) -> Result<Self, String> {
        let venues: Vec<Venue> = read_json(assets_dir, "venues.json")?;
        let events: Vec<Event> = read_json(assets_dir, "events.json")?;
        Ok(Catalog::new(venues, events))
    }

    pub fn new(venues: Vec<Venue>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| (e.event_date.is_none(), e.event_date));

        for venue in venues.iter().filter(|v| v.coordinate().is_none()) {
            tracing::debug!(venue = %venue.id, name = %venue.name, "venue has no usable coordinates");
        }
        let mapped = venues.iter().filter(|v| v.coordinate().is_some()).count();
        tracing::info!(
            venues = venues.len(),
            mapped,
            events = events.len(),
            "Loaded catalog"
        );

        Catalog { venues, events }
    }

    /// Venues in `city`, matched case-insensitively; every venue when `city` is `None`.
    pub fn venues_in(&self, city: Option<&str>) -> Vec<&Venue> {
        self.venues
            .iter()
            .filter(|v| city_matches(v.city.as_deref(), city))
            .collect()
    }

    pub fn find_venue(&self, id: &VenueId) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id.matches(id))
    }

    pub fn find_venue_by_name(&self, name: &str) -> Option<&Venue> {
        self.venues
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Events in `city` that pass `filters`, in date order.
    pub fn events_in(&self, city: Option<&str>, filters: &EventFilters) -> Vec<&Event> {
        let in_city = |e: &Event| match city {
            None => true,
            Some(_) => e
                .venue_id
                .as_ref()
                .and_then(|id| self.find_venue(id))
                .is_some_and(|v| city_matches(v.city.as_deref(), city)),
        };
        self.events
            .iter()
            .filter(|e| in_city(e) && filters.matches(e))
            .collect()
    }

    pub fn cities(&self) -> Vec<String> {
        self.venues
            .iter()
            .filter_map(|v| v.city.as_deref())
            .filter(|c| !c.trim().is_empty())
            .map(|c| display_city_name(c.trim()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        let mut out = vec![ALL.to_string()];
        out.extend(
            self.events
                .iter()
                .filter_map(|e| e.category.clone())
                .filter(|c| !c.is_empty() && c != ALL)
                .collect::<BTreeSet<_>>(),
        );
        out
    }
}

fn city_matches(venue_city: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => venue_city.is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted.trim())),
    }
}
