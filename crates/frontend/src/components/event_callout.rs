use dioxus::prelude::*;
use nightout_shared::marker::CalloutCard;

const PLACEHOLDER: Asset = asset!("/assets/placeholder.svg");

/// Callout card anchored above an open marker.
///
/// Presses inside the card never reach the map surface, so they neither pan
/// nor count as a background tap.
#[component]
pub fn EventCallout(
    card: CalloutCard,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_close: EventHandler<()>,
    on_see_event: EventHandler<()>,
    on_see_venue: EventHandler<()>,
) -> Element {
    // Remember a URL that failed to load so the placeholder takes over
    let mut failed_url = use_signal(|| None::<String>);

    let image_url = card
        .image
        .url()
        .filter(|url| failed_url.read().as_deref() != Some(*url))
        .map(String::from);

    rsx! {
        div {
            class: "event-callout",
            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
            onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
            onwheel: move |evt: Event<WheelData>| evt.stop_propagation(),

            button {
                class: "callout-close",
                title: "Close",
                onclick: move |_| on_close.call(()),
                "✕"
            }

            div { class: "callout-image",
                if let Some(url) = image_url {
                    {
                        let failed = url.clone();
                        rsx! {
                            img {
                                src: "{url}",
                                alt: "{card.title}",
                                onerror: move |_| failed_url.set(Some(failed.clone())),
                            }
                        }
                    }
                } else {
                    img { src: PLACEHOLDER, alt: "" }
                }

                if card.navigable {
                    button {
                        class: "callout-arrow callout-arrow-left",
                        title: "Previous event",
                        onclick: move |_| on_previous.call(()),
                        "‹"
                    }
                    button {
                        class: "callout-arrow callout-arrow-right",
                        title: "Next event",
                        onclick: move |_| on_next.call(()),
                        "›"
                    }
                }
            }

            div { class: "callout-body",
                div { class: "callout-title", "{card.title}" }
                div { class: "callout-venue", "{card.venue_name}" }
                if let Some(label) = &card.position_label {
                    div { class: "callout-position", "{label}" }
                }
            }

            div { class: "callout-actions",
                button {
                    class: "callout-action",
                    onclick: move |_| on_see_event.call(()),
                    "See event"
                }
                if card.show_venue_action {
                    button {
                        class: "callout-action callout-action-secondary",
                        onclick: move |_| on_see_venue.call(()),
                        "See venue"
                    }
                }
            }
        }
    }
}
