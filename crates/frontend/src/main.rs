mod api;
mod components;
mod coords;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/city/:city")]
    CityView { city: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::explore::Explore { city: None::<String> }
    }
}

#[component]
fn CityView(city: String) -> Element {
    // Keyed so switching cities starts from fresh map and filter state
    rsx! {
        pages::explore::Explore { key: "{city}", city: Some(city.clone()) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
