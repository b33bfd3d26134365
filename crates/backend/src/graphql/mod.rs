use std::sync::Arc;

use async_graphql::{Context, InputObject, Object, SimpleObject, ID};
use chrono::NaiveDate;
use nightout_shared::filters::{DateRange, EventFilters, ALL};
use nightout_shared::models::{self, VenueId};

use crate::catalog::Catalog;

// GraphQL output types

#[derive(SimpleObject)]
pub struct GqlVenue {
    pub id: ID,
    pub name: String,
    /// Null when the stored value does not parse to a finite number.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub venue_type: Option<String>,
    pub size: Option<String>,
    pub city: Option<String>,
}

impl From<&models::Venue> for GqlVenue {
    fn from(v: &models::Venue) -> Self {
        let coordinate = v.coordinate();
        GqlVenue {
            id: ID(v.id.to_string()),
            name: v.name.clone(),
            latitude: coordinate.map(|c| c.lat),
            longitude: coordinate.map(|c| c.lon),
            image: v.image.clone(),
            address: v.address.clone(),
            venue_type: v.venue_type.clone(),
            size: v.size.clone(),
            city: v.city.clone(),
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlEvent {
    pub id: ID,
    pub title: String,
    pub image: Option<String>,
    pub venue_id: Option<ID>,
    pub venue_name: String,
    pub category: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub event_date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl From<&models::Event> for GqlEvent {
    fn from(e: &models::Event) -> Self {
        GqlEvent {
            id: ID(e.id.to_string()),
            title: e.title.clone(),
            image: e.image.clone(),
            venue_id: e.venue_id.as_ref().map(|v| ID(v.to_string())),
            venue_name: e.venue_name.clone(),
            category: e.category.clone(),
            event_date: e.event_date.map(|d| d.format("%Y-%m-%d").to_string()),
            time: e.time.clone(),
            description: e.description.clone(),
            url: e.url.clone(),
        }
    }
}

// Input types

#[derive(InputObject, Default)]
pub struct EventFilterInput {
    pub category: Option<String>,
    pub venue: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search_text: Option<String>,
}

fn parse_date(field: &str, value: Option<String>) -> async_graphql::Result<Option<NaiveDate>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| async_graphql::Error::new(format!("Invalid {}: {}: {}", field, s, e))),
    }
}

impl TryFrom<EventFilterInput> for EventFilters {
    type Error = async_graphql::Error;

    fn try_from(input: EventFilterInput) -> Result<Self, Self::Error> {
        let start_date = parse_date("startDate", input.start_date)?;
        let end_date = parse_date("endDate", input.end_date)?;
        let date_range = if start_date.is_some() || end_date.is_some() {
            DateRange::Custom
        } else {
            DateRange::All
        };
        Ok(EventFilters {
            category: input.category.unwrap_or_else(|| ALL.to_string()),
            venue: input.venue.unwrap_or_else(|| ALL.to_string()),
            date_range,
            start_date,
            end_date,
            search_text: input.search_text.unwrap_or_default(),
        })
    }
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn venues(&self, ctx: &Context<'_>, city: Option<String>) -> Vec<GqlVenue> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        catalog
            .venues_in(city.as_deref())
            .into_iter()
            .map(GqlVenue::from)
            .collect()
    }

    async fn venue(&self, ctx: &Context<'_>, id: ID) -> Option<GqlVenue> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        catalog.find_venue(&VenueId::new(id.0)).map(GqlVenue::from)
    }

    async fn venue_by_name(&self, ctx: &Context<'_>, name: String) -> Option<GqlVenue> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        catalog.find_venue_by_name(&name).map(GqlVenue::from)
    }

    async fn events(
        &self,
        ctx: &Context<'_>,
        city: Option<String>,
        filter: Option<EventFilterInput>,
    ) -> async_graphql::Result<Vec<GqlEvent>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        let filters = EventFilters::try_from(filter.unwrap_or_default())?;
        tracing::debug!(?city, ?filters, "events query");
        Ok(catalog
            .events_in(city.as_deref(), &filters)
            .into_iter()
            .map(GqlEvent::from)
            .collect())
    }

    async fn cities(&self, ctx: &Context<'_>) -> Vec<String> {
        ctx.data_unchecked::<Arc<Catalog>>().cities()
    }

    async fn categories(&self, ctx: &Context<'_>) -> Vec<String> {
        ctx.data_unchecked::<Arc<Catalog>>().categories()
    }
}

pub type Schema = async_graphql::Schema<
    QueryRoot,
    async_graphql::EmptyMutation,
    async_graphql::EmptySubscription,
>;

pub fn build_schema(catalog: Arc<Catalog>) -> Schema {
    async_graphql::Schema::build(
        QueryRoot,
        async_graphql::EmptyMutation,
        async_graphql::EmptySubscription,
    )
    .data(catalog)
    .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::catalog;

    fn schema() -> Schema {
        build_schema(Arc::new(catalog()))
    }

    async fn run(query: &str) -> serde_json::Value {
        let resp = schema().execute(query).await;
        assert!(resp.errors.is_empty(), "{:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn test_venues_by_city_nulls_bad_coordinates() {
        let data = run(r#"{ venues(city: "brooklyn") { id latitude longitude } }"#).await;
        let venues = data["venues"].as_array().unwrap();
        assert_eq!(venues.len(), 3);
        let nowhere = venues.iter().find(|v| v["id"] == "nowhere").unwrap();
        assert!(nowhere["latitude"].is_null());
        let union_pool = venues.iter().find(|v| v["id"] == "Union-Pool").unwrap();
        assert_eq!(union_pool["latitude"], 40.7154);
    }

    #[tokio::test]
    async fn test_venue_lookup() {
        let data = run(r#"{ venue(id: "UNION-POOL") { name } missing: venue(id: "x") { name } }"#).await;
        assert_eq!(data["venue"]["name"], "Union Pool");
        assert!(data["missing"].is_null());
    }

    #[tokio::test]
    async fn test_venue_by_name() {
        let data = run(r#"{ venueByName(name: "union pool") { id } }"#).await;
        assert_eq!(data["venueByName"]["id"], "Union-Pool");
    }

    #[tokio::test]
    async fn test_events_with_filter() {
        let data = run(
            r#"{ events(city: "Brooklyn", filter: { category: "Music", searchText: "fiddle" }) { id venueId eventDate } }"#,
        )
        .await;
        let events = data["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["id"], "e1");
        assert_eq!(events[0]["venueId"], "jalopy");
        assert_eq!(events[0]["eventDate"], "2025-03-14");
    }

    #[tokio::test]
    async fn test_events_date_window_excludes_undated() {
        let data = run(
            r#"{ events(filter: { startDate: "2025-03-15", endDate: "2025-03-31" }) { id } }"#,
        )
        .await;
        let ids: Vec<&str> = data["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["e2", "e3"]);
    }

    #[tokio::test]
    async fn test_events_rejects_bad_date() {
        let resp = schema()
            .execute(r#"{ events(filter: { startDate: "next tuesday" }) { id } }"#)
            .await;
        assert_eq!(resp.errors.len(), 1);
        assert!(resp.errors[0].message.contains("startDate"));
    }

    #[tokio::test]
    async fn test_cities_and_categories() {
        let data = run("{ cities categories }").await;
        assert_eq!(data["cities"], serde_json::json!(["Brooklyn", "Cambridge"]));
        assert_eq!(data["categories"], serde_json::json!(["All", "Comedy", "Music"]));
    }
}
