use nightout_shared::camera::{Bounds, Camera, FitRequest};
use nightout_shared::models::LatLng;

pub const TILE_SIZE: f64 = 256.0;
pub const ZOOM_MIN: f64 = 3.0;
pub const ZOOM_MAX: f64 = 18.0;

/// Web Mercator stops short of the poles.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Measured size of the map container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A usable viewport, or `None` while the container is collapsed or hidden.
    pub fn measured(width: f64, height: f64) -> Option<Viewport> {
        (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
            .then_some(Viewport { width, height })
    }
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Project a coordinate to world pixels at `zoom`.
pub fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lon)
}

/// Container-relative position of `point` for the given camera.
pub fn screen_position(point: LatLng, camera: &Camera, viewport: Viewport) -> (f64, f64) {
    let (px, py) = project(point, camera.zoom);
    let (cx, cy) = project(camera.center, camera.zoom);
    (
        px - cx + viewport.width / 2.0,
        py - cy + viewport.height / 2.0,
    )
}

/// Coordinate under a container-relative position.
pub fn screen_to_latlng(sx: f64, sy: f64, camera: &Camera, viewport: Viewport) -> LatLng {
    let (cx, cy) = project(camera.center, camera.zoom);
    unproject(
        cx + sx - viewport.width / 2.0,
        cy + sy - viewport.height / 2.0,
        camera.zoom,
    )
}

/// Move the camera so content follows a drag of (`dx`, `dy`) pixels.
pub fn pan_camera(camera: &Camera, dx: f64, dy: f64) -> Camera {
    let (cx, cy) = project(camera.center, camera.zoom);
    Camera {
        center: unproject(cx - dx, cy - dy, camera.zoom),
        zoom: camera.zoom,
    }
}

/// Zoom to `new_zoom` keeping the coordinate under the cursor fixed.
pub fn zoom_at_cursor(
    camera: &Camera,
    new_zoom: f64,
    cursor_x: f64,
    cursor_y: f64,
    viewport: Viewport,
) -> Camera {
    let new_zoom = new_zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    let anchor = screen_to_latlng(cursor_x, cursor_y, camera, viewport);
    let (ax, ay) = project(anchor, new_zoom);
    Camera {
        center: unproject(
            ax - (cursor_x - viewport.width / 2.0),
            ay - (cursor_y - viewport.height / 2.0),
            new_zoom,
        ),
        zoom: new_zoom,
    }
}

/// Largest integer zoom at which every requested coordinate fits inside the
/// padded viewport, centred on the bounds.
pub fn fit_camera(request: &FitRequest, viewport: Viewport) -> Option<Camera> {
    let bounds = Bounds::from_points(&request.coordinates)?;
    let pad = request.padding;
    let avail_w = viewport.width - pad.left - pad.right;
    let avail_h = viewport.height - pad.top - pad.bottom;

    let fits = |zoom: f64| {
        let (west, north) = project(LatLng::new(bounds.north, bounds.west), zoom);
        let (east, south) = project(LatLng::new(bounds.south, bounds.east), zoom);
        east - west <= avail_w && south - north <= avail_h
    };
    let zoom = if avail_w <= 0.0 || avail_h <= 0.0 {
        ZOOM_MIN
    } else {
        let mut z = ZOOM_MAX;
        while z > ZOOM_MIN && !fits(z) {
            z -= 1.0;
        }
        z
    };

    // Centre the box inside the padded area, not the whole viewport
    let (west, north) = project(LatLng::new(bounds.north, bounds.west), zoom);
    let (east, south) = project(LatLng::new(bounds.south, bounds.east), zoom);
    let mid_x = (west + east) / 2.0 + (pad.right - pad.left) / 2.0;
    let mid_y = (north + south) / 2.0 + (pad.bottom - pad.top) / 2.0;
    Some(Camera {
        center: unproject(mid_x, mid_y, zoom),
        zoom,
    })
}

/// One raster tile and where to draw it inside the container.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

/// Tiles covering the viewport at the nearest integer zoom, scaled to the camera's zoom.
pub fn visible_tiles(camera: &Camera, viewport: Viewport) -> Vec<TilePlacement> {
    let z = camera.zoom.round().clamp(ZOOM_MIN, ZOOM_MAX);
    let scale = 2f64.powf(camera.zoom - z);
    let size = TILE_SIZE * scale;
    let count = 2f64.powf(z) as i64;
    let (cx, cy) = project(camera.center, z);

    let half_w = viewport.width / 2.0 / scale;
    let half_h = viewport.height / 2.0 / scale;
    let min_tx = ((cx - half_w) / TILE_SIZE).floor() as i64;
    let max_tx = ((cx + half_w) / TILE_SIZE).floor() as i64;
    let min_ty = (((cy - half_h) / TILE_SIZE).floor() as i64).max(0);
    let max_ty = (((cy + half_h) / TILE_SIZE).floor() as i64).min(count - 1);

    let mut tiles = Vec::new();
    for ty in min_ty..=max_ty {
        for tx in min_tx..=max_tx {
            let left = (tx as f64 * TILE_SIZE - cx) * scale + viewport.width / 2.0;
            let top = (ty as f64 * TILE_SIZE - cy) * scale + viewport.height / 2.0;
            tiles.push(TilePlacement {
                x: tx.rem_euclid(count) as u32,
                y: ty as u32,
                z: z as u32,
                left,
                top,
                size,
            });
        }
    }
    tiles
}

/// Fill a `{z}/{x}/{y}` URL template.
pub fn tile_url(template: &str, tile: &TilePlacement) -> String {
    template
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

/// Get container-relative coordinates for a client position.
pub fn client_to_container(client_x: f64, client_y: f64, container_id: &str) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    let rect = element.get_bounding_client_rect();
    Some((client_x - rect.left(), client_y - rect.top()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightout_shared::camera::EdgePadding;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_project_origin_is_world_center() {
        let (x, y) = project(LatLng::new(0.0, 0.0), 0.0);
        assert!(approx(x, 128.0, 1e-9));
        assert!(approx(y, 128.0, 1e-9));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let p = LatLng::new(40.6782, -73.9442);
        let (x, y) = project(p, 12.0);
        let back = unproject(x, y, 12.0);
        assert!(approx(back.lat, p.lat, 1e-9));
        assert!(approx(back.lon, p.lon, 1e-9));
    }

    #[test]
    fn test_camera_center_is_viewport_center() {
        let cam = Camera {
            center: LatLng::new(40.7, -73.9),
            zoom: 11.0,
        };
        let (sx, sy) = screen_position(cam.center, &cam, VIEW);
        assert!(approx(sx, 400.0, 1e-6));
        assert!(approx(sy, 300.0, 1e-6));
    }

    #[test]
    fn test_pan_moves_content_with_drag() {
        let cam = Camera {
            center: LatLng::new(40.7, -73.9),
            zoom: 11.0,
        };
        let panned = pan_camera(&cam, 50.0, -20.0);
        let (sx, sy) = screen_position(cam.center, &panned, VIEW);
        assert!(approx(sx, 450.0, 1e-6));
        assert!(approx(sy, 280.0, 1e-6));
    }

    #[test]
    fn test_zoom_at_cursor_keeps_anchor() {
        let cam = Camera {
            center: LatLng::new(40.7, -73.9),
            zoom: 11.0,
        };
        let anchor = screen_to_latlng(100.0, 500.0, &cam, VIEW);
        let zoomed = zoom_at_cursor(&cam, 13.0, 100.0, 500.0, VIEW);
        let (sx, sy) = screen_position(anchor, &zoomed, VIEW);
        assert_eq!(zoomed.zoom, 13.0);
        assert!(approx(sx, 100.0, 1e-6));
        assert!(approx(sy, 500.0, 1e-6));
    }

    #[test]
    fn test_zoom_at_cursor_clamps() {
        let cam = Camera {
            center: LatLng::new(0.0, 0.0),
            zoom: 17.5,
        };
        assert_eq!(zoom_at_cursor(&cam, 30.0, 0.0, 0.0, VIEW).zoom, ZOOM_MAX);
    }

    #[test]
    fn test_fit_camera_single_point_uses_max_zoom() {
        let req = FitRequest {
            coordinates: vec![LatLng::new(40.7, -73.9)],
            padding: EdgePadding::uniform(50.0),
        };
        let cam = fit_camera(&req, VIEW).unwrap();
        assert_eq!(cam.zoom, ZOOM_MAX);
        assert!(approx(cam.center.lat, 40.7, 1e-9));
    }

    #[test]
    fn test_fit_camera_frames_all_points_inside_padding() {
        let req = FitRequest {
            coordinates: vec![
                LatLng::new(40.60, -74.00),
                LatLng::new(40.75, -73.90),
                LatLng::new(40.70, -73.95),
            ],
            padding: EdgePadding::uniform(50.0),
        };
        let cam = fit_camera(&req, VIEW).unwrap();
        assert_eq!(cam.zoom.fract(), 0.0);
        for p in &req.coordinates {
            let (sx, sy) = screen_position(*p, &cam, VIEW);
            assert!((50.0 - 1e-6..=750.0 + 1e-6).contains(&sx), "x {sx}");
            assert!((50.0 - 1e-6..=550.0 + 1e-6).contains(&sy), "y {sy}");
        }
        // One more zoom level would no longer fit
        let tighter = Camera {
            zoom: cam.zoom + 1.0,
            ..cam
        };
        let (w, _) = screen_position(LatLng::new(40.6, -74.0), &tighter, VIEW);
        let (e, _) = screen_position(LatLng::new(40.75, -73.9), &tighter, VIEW);
        let (_, n) = screen_position(LatLng::new(40.75, -73.9), &tighter, VIEW);
        let (_, s) = screen_position(LatLng::new(40.6, -74.0), &tighter, VIEW);
        assert!(e - w > 700.0 || s - n > 500.0);
    }

    #[test]
    fn test_fit_camera_without_points() {
        let req = FitRequest {
            coordinates: vec![],
            padding: EdgePadding::uniform(50.0),
        };
        assert!(fit_camera(&req, VIEW).is_none());
    }

    #[test]
    fn test_fit_camera_tiny_viewport_falls_back_to_min_zoom() {
        let req = FitRequest {
            coordinates: vec![LatLng::new(40.6, -74.0), LatLng::new(40.7, -73.9)],
            padding: EdgePadding::uniform(50.0),
        };
        let cam = fit_camera(&req, Viewport { width: 80.0, height: 80.0 }).unwrap();
        assert_eq!(cam.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let cam = Camera {
            center: LatLng::new(40.7, -73.9),
            zoom: 12.0,
        };
        let tiles = visible_tiles(&cam, VIEW);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 12 && t.size == TILE_SIZE));
        assert!(tiles.iter().any(|t| t.left <= 0.0 && t.top <= 0.0));
        assert!(tiles
            .iter()
            .any(|t| t.left + t.size >= 800.0 && t.top + t.size >= 600.0));
    }

    #[test]
    fn test_visible_tiles_wrap_longitude() {
        let cam = Camera {
            center: LatLng::new(0.0, 179.99),
            zoom: 3.0,
        };
        let tiles = visible_tiles(&cam, VIEW);
        assert!(tiles.iter().all(|t| t.x < 8));
        assert!(tiles.iter().any(|t| t.x == 0));
    }

    #[test]
    fn test_tile_url() {
        let tile = TilePlacement {
            x: 1205,
            y: 1539,
            z: 12,
            left: 0.0,
            top: 0.0,
            size: 256.0,
        };
        assert_eq!(
            tile_url("https://tile.openstreetmap.org/{z}/{x}/{y}.png", &tile),
            "https://tile.openstreetmap.org/12/1205/1539.png"
        );
    }

    #[test]
    fn test_measured_viewport_rejects_collapsed_sizes() {
        assert_eq!(
            Viewport::measured(1024.0, 768.0),
            Some(Viewport {
                width: 1024.0,
                height: 768.0
            })
        );
        assert_eq!(Viewport::measured(0.0, 768.0), None);
        assert_eq!(Viewport::measured(640.0, -1.0), None);
        assert_eq!(Viewport::measured(f64::NAN, 480.0), None);
    }
}
