use chrono::NaiveDate;
use dioxus::prelude::*;
use nightout_shared::filters::{DateRange, EventFilters, FilterAction, ALL};
use nightout_shared::models::display_city_name;

use crate::api;
use crate::Route;

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn date_range_key(range: DateRange) -> String {
    serde_json::to_value(range)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}

fn date_range_from_key(key: &str) -> Option<DateRange> {
    serde_json::from_value(serde_json::Value::String(key.to_string())).ok()
}

#[component]
pub fn FilterBar(
    filters: Signal<EventFilters>,
    categories: Vec<String>,
    locations: Vec<String>,
    cities: Vec<String>,
    city: Option<String>,
) -> Element {
    let current = filters.read().clone();
    let current_city_slug = city.as_deref().map(api::city_slug).unwrap_or_default();

    rsx! {
        div { class: "panel filter-bar",
            div { class: "filter-row",
                input {
                    class: "filter-search",
                    r#type: "search",
                    placeholder: "Search events, venues…",
                    value: "{current.search_text}",
                    oninput: move |evt: Event<FormData>| {
                        filters.write().apply(FilterAction::SetSearchText(evt.value()));
                    },
                }

                select {
                    "aria-label": "City",
                    onchange: move |evt: Event<FormData>| {
                        let value = evt.value();
                        if value.is_empty() {
                            navigator().push(Route::Home {});
                        } else {
                            navigator().push(Route::CityView { city: api::city_slug(&value) });
                        }
                    },
                    option { value: "", selected: current_city_slug.is_empty(), "All cities" }
                    for c in cities.iter() {
                        option {
                            value: "{c}",
                            selected: api::city_slug(c) == current_city_slug,
                            "{display_city_name(c)}"
                        }
                    }
                }
            }

            div { class: "filter-row",
                select {
                    "aria-label": "Category",
                    onchange: move |evt: Event<FormData>| {
                        filters.write().apply(FilterAction::SetCategory(evt.value()));
                    },
                    for c in categories.iter() {
                        option {
                            value: "{c}",
                            selected: *c == current.category,
                            if c == ALL { "All categories" } else { "{c}" }
                        }
                    }
                }

                select {
                    "aria-label": "Venue",
                    onchange: move |evt: Event<FormData>| {
                        filters.write().apply(FilterAction::SetVenue(evt.value()));
                    },
                    for l in locations.iter() {
                        option {
                            value: "{l}",
                            selected: *l == current.venue,
                            if l == ALL { "All venues" } else { "{l}" }
                        }
                    }
                }

                select {
                    "aria-label": "Date",
                    onchange: move |evt: Event<FormData>| {
                        if let Some(range) = date_range_from_key(&evt.value()) {
                            let today = chrono::Local::now().date_naive();
                            filters.write().apply(FilterAction::SetDateRange(range, today));
                        }
                    },
                    for range in DateRange::PRESETS {
                        option {
                            value: "{date_range_key(range)}",
                            selected: range == current.date_range,
                            "{range.label()}"
                        }
                    }
                    if current.date_range == DateRange::Custom {
                        option {
                            value: "{date_range_key(DateRange::Custom)}",
                            selected: true,
                            "{DateRange::Custom.label()}"
                        }
                    }
                }
            }

            div { class: "filter-row",
                label { class: "filter-date",
                    "From"
                    input {
                        r#type: "date",
                        value: "{date_input_value(current.start_date)}",
                        onchange: move |evt: Event<FormData>| {
                            filters.write().apply(FilterAction::SetStartDate(parse_date_input(&evt.value())));
                        },
                    }
                }
                label { class: "filter-date",
                    "To"
                    input {
                        r#type: "date",
                        value: "{date_input_value(current.end_date)}",
                        onchange: move |evt: Event<FormData>| {
                            filters.write().apply(FilterAction::SetEndDate(parse_date_input(&evt.value())));
                        },
                    }
                }

                if current.is_active() {
                    button {
                        class: "filter-reset",
                        onclick: move |_| filters.write().apply(FilterAction::Reset),
                        "Clear filters"
                    }
                }
            }
        }
    }
}
