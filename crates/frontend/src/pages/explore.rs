use dioxus::logger::tracing;
use dioxus::prelude::*;
use nightout_shared::filters::{available_categories, available_locations, EventFilters};
use nightout_shared::models::{self, display_city_name, EventId, Venue};

use crate::api;
use crate::components::detail_panel::{Detail, DetailPanel};
use crate::components::event_list::EventList;
use crate::components::filter_bar::FilterBar;
use crate::components::map_surface::MapSurface;

/// Banner lines for the current fetch failures, venues first.
fn banner_messages(venues_error: Option<&str>, events_error: Option<&str>) -> Vec<String> {
    [venues_error, events_error]
        .into_iter()
        .flatten()
        .map(String::from)
        .collect()
}

#[component]
pub fn Explore(city: Option<String>) -> Element {
    // Slug from the URL, turned back into the catalog's city key
    let city_key = city.as_deref().map(api::city_from_slug);

    let filters = use_signal(EventFilters::default);
    let mut venues = use_signal(Vec::<Venue>::new);
    let mut events = use_signal(Vec::<models::Event>::new);
    let mut all_events = use_signal(Vec::<models::Event>::new);
    // One slot per loader so a success in one never hides a failure in the other
    let mut venues_error = use_signal(|| None::<String>);
    let mut events_error = use_signal(|| None::<String>);
    let highlighted = use_signal(|| None::<EventId>);
    let mut detail = use_signal(|| None::<Detail>);

    let cities_resource = use_resource(|| api::fetch_cities());

    let venues_city = city_key.clone();
    let _venues_loader = use_resource(move || {
        let city = venues_city.clone();
        async move {
            match api::fetch_venues(city).await {
                Ok(v) => {
                    tracing::info!(count = v.len(), "Loaded venues");
                    venues.set(v);
                    venues_error.set(None);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load venues");
                    venues_error.set(Some(format!("Couldn't load venues: {e}")));
                }
            }
        }
    });

    // Unfiltered events feed the category and venue pickers
    let options_city = city_key.clone();
    let _options_loader = use_resource(move || {
        let city = options_city.clone();
        async move {
            match api::fetch_events(city, EventFilters::default()).await {
                Ok(e) => all_events.set(e),
                Err(e) => tracing::warn!(error = %e, "Failed to load filter options"),
            }
        }
    });

    // Re-runs whenever the filters change; the last good list stays on screen on failure
    let events_city = city_key.clone();
    let _events_loader = use_resource(move || {
        let city = events_city.clone();
        let current = filters.read().clone();
        async move {
            match api::fetch_events(city, current).await {
                Ok(e) => {
                    tracing::debug!(count = e.len(), "Loaded events");
                    events.set(e);
                    events_error.set(None);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load events");
                    events_error.set(Some(format!("Couldn't load events: {e}")));
                }
            }
        }
    });

    let cities: Vec<String> = match &*cities_resource.read() {
        Some(Ok(c)) => c.clone(),
        _ => vec![],
    };
    let categories = available_categories(&all_events.read());
    let locations = available_locations(&all_events.read());

    let errors = banner_messages(venues_error.read().as_deref(), events_error.read().as_deref());

    let heading = city_key
        .as_deref()
        .map(display_city_name)
        .unwrap_or_else(|| "All cities".to_string());

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Night Out" }
                span { class: "header-city", "{heading}" }
            }

            div { class: "sidebar",
                FilterBar {
                    filters,
                    categories,
                    locations,
                    cities,
                    city: city_key.clone(),
                }

                for message in errors {
                    div { class: "error-banner", "{message}" }
                }

                DetailPanel { detail, events }

                EventList {
                    events,
                    highlighted,
                    on_select: move |event: models::Event| detail.set(Some(Detail::Event(event))),
                }
            }

            MapSurface {
                venues,
                events,
                highlighted_event_id: highlighted,
                on_event_press: move |event: models::Event| detail.set(Some(Detail::Event(event))),
                on_venue_press: move |venue: Venue| detail.set(Some(Detail::Venue(venue))),
            }
        }
    }
}
