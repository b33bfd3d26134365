use dioxus::prelude::*;
use nightout_shared::carousel::EventCarousel;
use nightout_shared::marker::{CalloutCard, MarkerVisual};
use nightout_shared::models::{self, EventId, Venue};
use nightout_shared::venue_index::VenueEventGroup;

use crate::components::event_callout::EventCallout;

/// One venue dot plus, while its callout is open, the callout card above it.
///
/// `carousel` is `Some` only for the venue whose callout is open.
#[component]
pub fn MapMarker(
    group: VenueEventGroup,
    left: f64,
    top: f64,
    highlighted_event_id: Option<EventId>,
    carousel: Option<EventCarousel>,
    venue_action: bool,
    on_tap: EventHandler<()>,
    on_next: EventHandler<()>,
    on_previous: EventHandler<()>,
    on_close: EventHandler<()>,
    on_event_press: EventHandler<models::Event>,
    on_venue_press: EventHandler<Venue>,
) -> Element {
    let mut hovered = use_signal(|| false);

    let visual = MarkerVisual::resolve(&group, highlighted_event_id.as_ref(), *hovered.read());
    let badge = visual.badge().map(|b| b.label());
    let scale = visual.scale();
    let dot_class = visual.css_class();

    let card = carousel.and_then(|c| CalloutCard::build(&group, &c, venue_action));
    let current_event = carousel.and_then(|c| c.current(&group.events).cloned());
    let venue = group.venue.clone();

    rsx! {
        div {
            class: "venue-marker",
            style: "left: {left}px; top: {top}px;",

            if let Some(card) = card {
                EventCallout {
                    card,
                    on_previous,
                    on_next,
                    on_close,
                    on_see_event: move |_| {
                        if let Some(event) = current_event.clone() {
                            on_event_press.call(event);
                        }
                    },
                    on_see_venue: move |_| on_venue_press.call(venue.clone()),
                }
            }

            div {
                class: "{dot_class}",
                style: "transform: translate(-50%, -50%) scale({scale});",
                title: "{group.venue.name}",
                onmouseenter: move |_| hovered.set(true),
                onmouseleave: move |_| hovered.set(false),
                onmouseup: move |_| on_tap.call(()),

                if let Some(label) = badge {
                    span { class: "marker-badge", "{label}" }
                }
            }
        }
    }
}
