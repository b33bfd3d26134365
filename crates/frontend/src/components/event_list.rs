use dioxus::prelude::*;
use nightout_shared::models::{self, EventId};

fn date_line(event: &models::Event) -> String {
    let date = event
        .event_date
        .map(|d| d.format("%a %b %-d").to_string())
        .unwrap_or_else(|| "Date TBA".to_string());
    match event.time.as_deref().filter(|t| !t.is_empty()) {
        Some(time) => format!("{date} · {time}"),
        None => date,
    }
}

/// Scrollable list of the filtered events.
///
/// Hovering a row highlights its venue on the map.
#[component]
pub fn EventList(
    events: ReadSignal<Vec<models::Event>>,
    highlighted: Signal<Option<EventId>>,
    on_select: EventHandler<models::Event>,
) -> Element {
    let events = events.read();

    rsx! {
        div { class: "panel event-list",
            h3 { "Events ({events.len()})" }

            if events.is_empty() {
                p { class: "event-list-empty", "No events match these filters." }
            }

            for event in events.iter() {
                {
                    let hover_id = event.id.clone();
                    let selected = event.clone();
                    let is_highlighted = highlighted.read().as_ref() == Some(&event.id);
                    let row_class = if is_highlighted { "event-row highlighted" } else { "event-row" };
                    rsx! {
                        div {
                            key: "{event.id}",
                            class: "{row_class}",
                            onmouseenter: move |_| highlighted.set(Some(hover_id.clone())),
                            onmouseleave: move |_| highlighted.set(None),
                            onclick: move |_| on_select.call(selected.clone()),

                            div { class: "event-row-title", "{event.title}" }
                            div { class: "event-row-meta",
                                span { "{event.venue_name}" }
                                span { class: "event-row-date", "{date_line(event)}" }
                            }
                            if let Some(category) = &event.category {
                                span { class: "event-row-category", "{category}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
