use crate::models::{LatLng, Venue};

/// Zoom used for every initial camera, regardless of how spread out the venues are.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Brooklyn, used when no venue has a usable coordinate.
pub const FALLBACK_CENTER: LatLng = LatLng::new(40.6782, -73.9442);

/// Edge padding, in screen pixels, for the fit-to-venues camera move.
pub const FIT_EDGE_PADDING_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

impl Camera {
    pub fn fallback() -> Self {
        Camera {
            center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        Some(points.iter().skip(1).fold(init, |b, p| Bounds {
            south: b.south.min(p.lat),
            west: b.west.min(p.lon),
            north: b.north.max(p.lat),
            east: b.east.max(p.lon),
        }))
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) / 2.0,
            lon: (self.west + self.east) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgePadding {
    pub const fn uniform(px: f64) -> Self {
        EdgePadding {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// A request for the map surface to frame exactly these coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    pub coordinates: Vec<LatLng>,
    pub padding: EdgePadding,
}

/// Coordinates of every venue whose position parses.
pub fn valid_coordinates(venues: &[Venue]) -> Vec<LatLng> {
    venues.iter().filter_map(Venue::coordinate).collect()
}

/// Initial camera: midpoint of the venue bounding box at the default zoom.
///
/// Zoom deliberately does not adapt to the box; the follow-up fit request
/// takes care of framing once the surface is up.
pub fn initial_camera(venues: &[Venue]) -> Camera {
    let points = valid_coordinates(venues);
    match Bounds::from_points(&points) {
        Some(bounds) => Camera {
            center: bounds.center(),
            zoom: DEFAULT_ZOOM,
        },
        None => Camera::fallback(),
    }
}

/// Fit request for the loaded venues, or `None` when there is nothing to frame.
pub fn fit_request(venues: &[Venue]) -> Option<FitRequest> {
    let coordinates = valid_coordinates(venues);
    if coordinates.is_empty() {
        return None;
    }
    Some(FitRequest {
        coordinates,
        padding: EdgePadding::uniform(FIT_EDGE_PADDING_PX),
    })
}
