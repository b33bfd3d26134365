use nightout_shared::filters::{is_unset, EventFilters};
use nightout_shared::models::{Event, Venue};
use serde::{Deserialize, Serialize};

const VENUE_FIELDS: &str = "id name latitude longitude image address venueType size city";
const EVENT_FIELDS: &str =
    "id title image venueId venueName category eventDate time description url";

/// Build the variables JSON for an events query.
///
/// Only narrowing fields are sent; "All" selections and empty search text are omitted.
pub fn build_events_variables(city: Option<&str>, filters: &EventFilters) -> serde_json::Value {
    let mut filter = serde_json::Map::new();
    if !is_unset(&filters.category) {
        filter.insert("category".into(), filters.category.clone().into());
    }
    if !is_unset(&filters.venue) {
        filter.insert("venue".into(), filters.venue.clone().into());
    }
    if let Some(start) = filters.start_date {
        filter.insert("startDate".into(), start.format("%Y-%m-%d").to_string().into());
    }
    if let Some(end) = filters.end_date {
        filter.insert("endDate".into(), end.format("%Y-%m-%d").to_string().into());
    }
    let search = filters.search_text.trim();
    if !search.is_empty() {
        filter.insert("searchText".into(), search.into());
    }

    serde_json::json!({
        "city": city,
        "filter": filter,
    })
}

/// URL segment for a city: "New York" -> "new-york".
pub fn city_slug(city: &str) -> String {
    city.trim().to_lowercase().replace(' ', "-")
}

/// Inverse of [`city_slug`]; the catalog matches cities case-insensitively.
pub fn city_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

fn api_url() -> Result<String, String> {
    let origin = web_sys::window()
        .ok_or("No window")?
        .location()
        .origin()
        .map_err(|_| "No origin".to_string())?;
    Ok(format!("{}/graphql", origin))
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url()?)
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;

    if let Some(errors) = gql_resp.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.message);
        }
    }

    gql_resp.data.ok_or_else(|| "No data returned".to_string())
}

// API functions

#[derive(Deserialize)]
pub struct VenuesResponse {
    pub venues: Vec<Venue>,
}

pub async fn fetch_venues(city: Option<String>) -> Result<Vec<Venue>, String> {
    let resp: VenuesResponse = query(
        &format!("query Venues($city: String) {{ venues(city: $city) {{ {VENUE_FIELDS} }} }}"),
        Some(serde_json::json!({ "city": city })),
    )
    .await?;
    Ok(resp.venues)
}

#[derive(Deserialize)]
pub struct VenueResponse {
    pub venue: Option<Venue>,
}

pub async fn fetch_venue(id: &str) -> Result<Option<Venue>, String> {
    let resp: VenueResponse = query(
        &format!("query Venue($id: ID!) {{ venue(id: $id) {{ {VENUE_FIELDS} }} }}"),
        Some(serde_json::json!({ "id": id })),
    )
    .await?;
    Ok(resp.venue)
}

#[derive(Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

pub async fn fetch_events(city: Option<String>, filters: EventFilters) -> Result<Vec<Event>, String> {
    let resp: EventsResponse = query(
        &format!(
            "query Events($city: String, $filter: EventFilterInput) {{ events(city: $city, filter: $filter) {{ {EVENT_FIELDS} }} }}"
        ),
        Some(build_events_variables(city.as_deref(), &filters)),
    )
    .await?;
    Ok(resp.events)
}

#[derive(Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

pub async fn fetch_cities() -> Result<Vec<String>, String> {
    let resp: CitiesResponse = query("query { cities }", None).await?;
    Ok(resp.cities)
}
