use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Keys arrive from the catalog either as integers or as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    Text(String),
}

impl From<RawKey> for String {
    fn from(key: RawKey) -> Self {
        match key {
            RawKey::Int(n) => n.to_string(),
            RawKey::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        VenueId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Venue ids compare case-insensitively across the catalog, using the
    /// same folding as [`key`](Self::key).
    pub fn matches(&self, other: &VenueId) -> bool {
        self.key() == other.key()
    }

    /// Normalized form used as a lookup key.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl<'de> Deserialize<'de> for VenueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawKey::deserialize(deserializer).map(|k| VenueId(k.into()))
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawKey::deserialize(deserializer).map(|k| EventId(k.into()))
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordinate component exactly as the catalog stored it.
///
/// Scraped venues carry numbers, numeric strings, and junk like `"NaN"`;
/// only values that parse to a finite number count as present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawCoordinate::Number(n) => *n,
            RawCoordinate::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLng { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<RawCoordinate>,
    #[serde(default)]
    pub longitude: Option<RawCoordinate>,
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "venue_type")]
    pub venue_type: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Venue {
    /// Parsed position, or `None` when either component is missing or malformed.
    pub fn coordinate(&self) -> Option<LatLng> {
        let lat = self.latitude.as_ref()?.parse()?;
        let lon = self.longitude.as_ref()?.parse()?;
        Some(LatLng { lat, lon })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, alias = "image_url", alias = "preview_image")]
    pub image: Option<String>,
    #[serde(default, alias = "venue_id")]
    pub venue_id: Option<VenueId>,
    #[serde(default, alias = "venue_name")]
    pub venue_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "event_date")]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Human-readable capacity label for a venue size.
pub fn venue_size_label(size: &str) -> String {
    if size.is_empty() {
        return String::new();
    }
    match size.to_lowercase().as_str() {
        "small" => "Small Venue (< 50 people)".to_string(),
        "medium" => "Medium Venue (50-200 people)".to_string(),
        "large" => "Large Venue (200+ people)".to_string(),
        _ => format!("{size} Venue"),
    }
}

/// Shortened size label for badges and list rows.
pub fn compact_venue_size_label(size: &str) -> String {
    match size.to_lowercase().as_str() {
        "small" => "Small (< 50)".to_string(),
        "medium" => "Medium (50-200)".to_string(),
        "large" => "Large (200+)".to_string(),
        _ => size.to_string(),
    }
}

/// "new york" -> "New York".
pub fn display_city_name(city: &str) -> String {
    city.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_with(lat: RawCoordinate, lon: RawCoordinate) -> Venue {
        Venue {
            id: VenueId::new("v1"),
            name: "Jalopy".to_string(),
            latitude: Some(lat),
            longitude: Some(lon),
            image: None,
            address: None,
            venue_type: None,
            size: None,
            city: None,
        }
    }

    #[test]
    fn test_coordinate_numeric() {
        let v = venue_with(40.68.into(), (-73.99).into());
        assert_eq!(v.coordinate(), Some(LatLng::new(40.68, -73.99)));
    }

    #[test]
    fn test_coordinate_numeric_string() {
        let v = venue_with(
            RawCoordinate::Text(" 40.68 ".to_string()),
            RawCoordinate::Text("-73.99".to_string()),
        );
        assert_eq!(v.coordinate(), Some(LatLng::new(40.68, -73.99)));
    }

    #[test]
    fn test_coordinate_nan_string_is_absent() {
        let v = venue_with(RawCoordinate::Text("NaN".to_string()), (-73.9).into());
        assert_eq!(v.coordinate(), None);
    }

    #[test]
    fn test_coordinate_empty_string_is_absent() {
        let v = venue_with(RawCoordinate::Text(String::new()), (-73.9).into());
        assert_eq!(v.coordinate(), None);
    }

    #[test]
    fn test_coordinate_missing_component() {
        let mut v = venue_with(40.0.into(), (-73.9).into());
        v.longitude = None;
        assert_eq!(v.coordinate(), None);
    }

    #[test]
    fn test_venue_deserializes_mixed_keys() {
        let json = r#"{"id":42,"name":"Sunny's","latitude":"40.678","longitude":-74.01,"image_url":"https://img/s.jpg","venue_type":"bar"}"#;
        let v: Venue = serde_json::from_str(json).unwrap();
        assert_eq!(v.id, VenueId::new("42"));
        assert_eq!(v.image.as_deref(), Some("https://img/s.jpg"));
        assert_eq!(v.venue_type.as_deref(), Some("bar"));
        assert_eq!(v.coordinate(), Some(LatLng::new(40.678, -74.01)));
    }

    #[test]
    fn test_venue_deserializes_null_coordinates() {
        let json = r#"{"id":"a","name":"Nowhere","latitude":null,"longitude":null}"#;
        let v: Venue = serde_json::from_str(json).unwrap();
        assert!(v.coordinate().is_none());
    }

    #[test]
    fn test_event_deserializes_catalog_row() {
        let json = r#"{"id":"e1","title":"Bluegrass Night","preview_image":null,"venue_id":7,"venue_name":"Jalopy","event_date":"2025-03-14","category":"Music"}"#;
        let e: Event = serde_json::from_str(json).unwrap();
        assert_eq!(e.venue_id, Some(VenueId::new("7")));
        assert_eq!(e.event_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert!(e.image.is_none());
    }

    #[test]
    fn test_venue_id_matches_ignores_case() {
        assert!(VenueId::new("ABC-1").matches(&VenueId::new("abc-1")));
        assert!(!VenueId::new("abc-1").matches(&VenueId::new("abc-2")));
    }

    #[test]
    fn test_venue_id_matches_agrees_with_key_beyond_ascii() {
        let upper = VenueId::new("CAFÉ-Ü");
        let lower = VenueId::new("café-ü");
        assert_eq!(upper.key(), lower.key());
        assert!(upper.matches(&lower));
    }

    #[test]
    fn test_venue_size_labels() {
        assert_eq!(venue_size_label("small"), "Small Venue (< 50 people)");
        assert_eq!(venue_size_label("LARGE"), "Large Venue (200+ people)");
        assert_eq!(venue_size_label("Arena"), "Arena Venue");
        assert_eq!(venue_size_label(""), "");
        assert_eq!(compact_venue_size_label("Medium"), "Medium (50-200)");
        assert_eq!(compact_venue_size_label("tiny"), "tiny");
    }

    #[test]
    fn test_display_city_name() {
        assert_eq!(display_city_name("new york"), "New York");
        assert_eq!(display_city_name("BOSTON"), "Boston");
        assert_eq!(display_city_name(""), "");
    }
}
