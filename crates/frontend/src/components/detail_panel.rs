use dioxus::prelude::*;
use nightout_shared::models::{self, compact_venue_size_label, display_city_name, venue_size_label, Venue};

use crate::api;

/// What the side panel is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Event(models::Event),
    Venue(Venue),
}

#[component]
pub fn DetailPanel(
    detail: Signal<Option<Detail>>,
    events: ReadSignal<Vec<models::Event>>,
) -> Element {
    let Some(current) = detail.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div { class: "panel detail-panel",
            button {
                class: "detail-close",
                title: "Close",
                onclick: move |_| detail.set(None),
                "✕"
            }
            match current {
                Detail::Event(event) => rsx! {
                    EventDetail { key: "{event.id}", event, detail }
                },
                Detail::Venue(venue) => rsx! {
                    VenueDetail { key: "{venue.id}", venue, events, detail }
                },
            }
        }
    }
}

#[component]
fn EventDetail(event: models::Event, detail: Signal<Option<Detail>>) -> Element {
    let venue_id = event.venue_id.clone();
    let venue_resource = use_resource(move || {
        let venue_id = venue_id.clone();
        async move {
            match venue_id {
                Some(id) => api::fetch_venue(id.as_str()).await,
                None => Ok(None),
            }
        }
    });
    let venue = match &*venue_resource.read() {
        Some(Ok(v)) => v.clone(),
        _ => None,
    };

    let date = event
        .event_date
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| "Date TBA".to_string());

    rsx! {
        if let Some(image) = event.image.as_deref().filter(|s| !s.trim().is_empty()) {
            img { class: "detail-image", src: "{image}", alt: "{event.title}" }
        }
        h2 { "{event.title}" }
        if let Some(category) = &event.category {
            span { class: "detail-category", "{category}" }
        }
        div { class: "detail-row",
            span { class: "detail-label", "When" }
            span {
                "{date}"
                if let Some(time) = &event.time {
                    " · {time}"
                }
            }
        }
        div { class: "detail-row",
            span { class: "detail-label", "Where" }
            span { "{event.venue_name}" }
        }
        if let Some(v) = &venue {
            if let Some(address) = &v.address {
                div { class: "detail-row",
                    span { class: "detail-label", "Address" }
                    span { "{address}" }
                }
            }
            if let Some(size) = v.size.as_deref().filter(|s| !s.is_empty()) {
                div { class: "detail-row",
                    span { class: "detail-label", "Size" }
                    span { "{venue_size_label(size)}" }
                }
            }
        }
        if let Some(description) = &event.description {
            p { class: "detail-description", "{description}" }
        }
        div { class: "detail-actions",
            if let Some(url) = &event.url {
                a { class: "detail-link", href: "{url}", target: "_blank", rel: "noopener", "Tickets & info" }
            }
            if let Some(v) = venue.clone() {
                button {
                    class: "detail-link",
                    onclick: move |_| detail.set(Some(Detail::Venue(v.clone()))),
                    "See venue"
                }
            }
        }
    }
}

#[component]
fn VenueDetail(
    venue: Venue,
    events: ReadSignal<Vec<models::Event>>,
    detail: Signal<Option<Detail>>,
) -> Element {
    let here: Vec<models::Event> = events
        .read()
        .iter()
        .filter(|e| e.venue_id.as_ref().is_some_and(|id| id.matches(&venue.id)))
        .cloned()
        .collect();

    rsx! {
        if let Some(image) = venue.image.as_deref().filter(|s| !s.trim().is_empty()) {
            img { class: "detail-image", src: "{image}", alt: "{venue.name}" }
        }
        h2 { "{venue.name}" }
        div { class: "detail-tags",
            if let Some(kind) = &venue.venue_type {
                span { class: "detail-category", "{kind}" }
            }
            if let Some(size) = venue.size.as_deref().filter(|s| !s.is_empty()) {
                span { class: "detail-category", "{compact_venue_size_label(size)}" }
            }
        }
        if let Some(address) = &venue.address {
            div { class: "detail-row",
                span { class: "detail-label", "Address" }
                span { "{address}" }
            }
        }
        if let Some(city) = &venue.city {
            div { class: "detail-row",
                span { class: "detail-label", "City" }
                span { "{display_city_name(city)}" }
            }
        }

        h3 { "Upcoming here ({here.len()})" }
        if here.is_empty() {
            p { class: "event-list-empty", "Nothing scheduled that matches these filters." }
        }
        for event in here.iter() {
            {
                let selected = event.clone();
                let date = event.event_date.map(|d| d.format("%a %b %-d").to_string());
                rsx! {
                    div {
                        key: "{event.id}",
                        class: "event-row",
                        onclick: move |_| detail.set(Some(Detail::Event(selected.clone()))),
                        div { class: "event-row-title", "{event.title}" }
                        if let Some(date) = date {
                            div { class: "event-row-date", "{date}" }
                        }
                    }
                }
            }
        }
    }
}
