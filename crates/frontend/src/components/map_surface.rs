use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use nightout_shared::arbiter::ArbiterConfig;
use nightout_shared::camera::{fit_request, initial_camera, Camera};
use nightout_shared::interaction::MapInteraction;
use nightout_shared::models::{self, EventId, Venue};
use nightout_shared::venue_index::{group_events_by_venue, positioned_markers, VenueEventGroup};

use crate::components::map_marker::MapMarker;
use crate::coords::{self, Viewport, ZOOM_MAX, ZOOM_MIN};

const MAP_CONTAINER_ID: &str = "venue-map-container";

pub const TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Movement below this many pixels between mousedown and mouseup is a tap.
const DRAG_THRESHOLD: f64 = 3.0;

/// Zoom change per wheel notch.
const WHEEL_ZOOM_STEP: f64 = 0.5;

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Venue map with one marker per event-bearing venue and at most one open callout.
///
/// `venues` is the full list used to frame the camera; `events` is the
/// already-filtered list the markers are built from.
#[component]
pub fn MapSurface(
    venues: ReadSignal<Vec<Venue>>,
    events: ReadSignal<Vec<models::Event>>,
    highlighted_event_id: ReadSignal<Option<EventId>>,
    on_event_press: EventHandler<models::Event>,
    on_venue_press: Option<EventHandler<Venue>>,
    #[props(default)] arbiter: ArbiterConfig,
) -> Element {
    let mut interaction = use_signal(|| MapInteraction::new(arbiter));
    let mut camera = use_signal(Camera::fallback);
    let mut viewport = use_signal(|| None::<Viewport>);
    let mut camera_seeded = use_signal(|| false);
    let mut fitted = use_signal(|| false);

    let groups = use_memo(move || group_events_by_venue(&venues.read(), &events.read()));

    // Seed the camera as soon as venues arrive, then fit once the surface can be measured
    use_effect(move || {
        let venues = venues.read();
        let ready = *viewport.read();
        if venues.is_empty() {
            return;
        }
        if !*camera_seeded.peek() {
            camera.set(initial_camera(&venues));
            camera_seeded.set(true);
        }
        let already_fitted = *fitted.peek();
        if let (Some(vp), false) = (ready, already_fitted) {
            if let Some(cam) = fit_request(&venues).and_then(|req| coords::fit_camera(&req, vp)) {
                tracing::info!(zoom = cam.zoom, "Fitting camera to venues");
                camera.set(cam);
            }
            fitted.set(true);
        }
    });

    // A new highlighted event from the list closes whatever callout is open
    use_effect(move || {
        let highlighted = highlighted_event_id.read().clone();
        interaction.write().sync_highlight(highlighted);
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_camera = use_signal(Camera::fallback);

    // Latch release is owned by this scope so an unmounting marker cannot strand it
    let mut tap_marker = move |group: &VenueEventGroup| {
        if *did_drag.peek() {
            return;
        }
        let (transition, ticket) = {
            let mut state = interaction.write();
            let transition = state.marker_tapped(group, now_ms());
            (transition, state.latch_ticket())
        };
        tracing::debug!(venue = %group.venue.id, ?transition, "Marker tap");
        let latch_window_ms = arbiter.latch_window_ms;
        spawn(async move {
            TimeoutFuture::new(latch_window_ms).await;
            // A later tap owns the latch now; its own timer releases it
            interaction.write().release_marker_latch(ticket);
        });
    };

    let cur_camera = *camera.read();
    let dragging = *is_dragging.read();
    let container_class = if dragging {
        "map-surface dragging"
    } else {
        "map-surface"
    };

    let state = interaction.read();
    let groups = groups.read();
    let markers = positioned_markers(&groups);
    let highlighted = highlighted_event_id.read().clone();
    let venue_action = on_venue_press.is_some();

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onmounted: move |evt: MountedEvent| async move {
                if let Ok(rect) = evt.get_client_rect().await {
                    viewport.set(Viewport::measured(rect.width(), rect.height()));
                }
            },

            // Window and layout changes resize the container; tiles and markers follow
            onresize: move |evt: Event<ResizeData>| {
                if let Ok(size) = evt.data().get_border_box_size() {
                    if let Some(vp) = Viewport::measured(size.width, size.height) {
                        if *viewport.peek() != Some(vp) {
                            tracing::debug!(width = vp.width, height = vp.height, "Map resized");
                            viewport.set(Some(vp));
                        }
                    }
                }
            },

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let Some(vp) = *viewport.read() else { return };
                let client = evt.data().client_coordinates();
                let Some((cx, cy)) = coords::client_to_container(client.x, client.y, MAP_CONTAINER_ID) else {
                    return;
                };

                let delta_y = wheel_delta_y(evt.data().delta());
                let step = if delta_y < 0.0 { WHEEL_ZOOM_STEP } else { -WHEEL_ZOOM_STEP };
                let old = *camera.read();
                let new_zoom = (old.zoom + step).clamp(ZOOM_MIN, ZOOM_MAX);
                if (new_zoom - old.zoom).abs() < 1e-9 {
                    return;
                }
                camera.set(coords::zoom_at_cursor(&old, new_zoom, cx, cy, vp));
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_camera.set(*camera.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let (sx, sy) = *drag_start.read();
                let dx = client.x - sx;
                let dy = client.y - sy;

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    camera.set(coords::pan_camera(&drag_start_camera.read(), dx, dy));
                }
            },

            // Marker mouseups bubble here too; the arbiter sorts them out
            onmouseup: move |_| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);

                if was_dragging && !was_drag {
                    let transition = interaction.write().background_tapped(now_ms());
                    tracing::debug!(?transition, "Map background tap");
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            if let Some(vp) = *viewport.read() {
                div { class: "tile-layer",
                    for tile in coords::visible_tiles(&cur_camera, vp) {
                        img {
                            key: "{tile.z}-{tile.x}-{tile.y}-{tile.left}",
                            class: "tile",
                            draggable: "false",
                            src: coords::tile_url(TILE_URL_TEMPLATE, &tile),
                            style: "left: {tile.left}px; top: {tile.top}px; width: {tile.size}px; height: {tile.size}px;",
                        }
                    }
                }

                div { class: "marker-layer",
                    for (group, position) in markers.iter().copied() {
                        {
                            let (left, top) = coords::screen_position(position, &cur_camera, vp);
                            let open = state.callout().is_open_for(&group.venue.id);
                            let carousel = if open { state.callout().carousel().copied() } else { None };
                            let tap_group = group.clone();
                            let next_group = group.clone();
                            let previous_group = group.clone();
                            rsx! {
                                MapMarker {
                                    key: "{group.venue.id}",
                                    group: group.clone(),
                                    left,
                                    top,
                                    highlighted_event_id: highlighted.clone(),
                                    carousel,
                                    venue_action,
                                    on_tap: move |_| tap_marker(&tap_group),
                                    on_next: move |_| interaction.write().next_event(&next_group),
                                    on_previous: move |_| interaction.write().previous_event(&previous_group),
                                    on_close: move |_| {
                                        interaction.write().close_callout();
                                    },
                                    on_event_press,
                                    on_venue_press: move |venue| {
                                        if let Some(handler) = on_venue_press {
                                            handler.call(venue);
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }

            div { class: "map-attribution",
                "© OpenStreetMap contributors"
            }
        }
    }
}
