//! Map camera: maps geographic coordinates to screen pixels.

use kurbo::{Point, Vec2};

const TILE_SIZE: f64 = 256.0;
const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 22.0;

/// Camera over a flat lng/lat plane. Zoom follows the usual web-map
/// convention: each level doubles the scale.
#[derive(Debug, Clone, Copy)]
pub struct MapCamera {
    /// Center of the viewport in world (lng, lat) coordinates.
    pub center: Point,
    /// Zoom level, clamped to [0, 22].
    pub zoom: f64,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            zoom: 2.0,
        }
    }
}

impl MapCamera {
    pub fn new(center: Point, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Pixels per world degree at the current zoom.
    pub fn scale(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom) / 360.0
    }

    /// World point to screen pixels. `viewport` is the size of the
    /// view in pixels. Screen y grows downward, latitude upward.
    pub fn world_to_screen(&self, world: Point, viewport: Vec2) -> Point {
        let s = self.scale();
        Point::new(
            viewport.x / 2.0 + (world.x - self.center.x) * s,
            viewport.y / 2.0 - (world.y - self.center.y) * s,
        )
    }

    /// Screen pixels back to a world point.
    pub fn screen_to_world(&self, screen: Point, viewport: Vec2) -> Point {
        let s = self.scale();
        Point::new(
            self.center.x + (screen.x - viewport.x / 2.0) / s,
            self.center.y - (screen.y - viewport.y / 2.0) / s,
        )
    }

    /// Convert a drag delta in screen pixels to a world delta.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> Vec2 {
        let s = self.scale();
        Vec2::new(delta.x / s, -delta.y / s)
    }

    /// Pan the camera by a screen-pixel delta.
    pub fn pan_pixels(&mut self, delta: Vec2) {
        let world = self.screen_delta_to_world(delta);
        self.center -= world;
    }

    /// Zoom by `steps` levels, keeping the world point under
    /// `anchor` (screen pixels) fixed.
    pub fn zoom_by(&mut self, steps: f64, anchor: Point, viewport: Vec2) {
        let before = self.screen_to_world(anchor, viewport);
        self.zoom = (self.zoom + steps).clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.screen_to_world(anchor, viewport);
        self.center += before - after;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn test_world_screen_round_trip() {
        let camera = MapCamera::new(Point::new(8.5, 47.3), 12.0);
        let viewport = Vec2::new(800.0, 600.0);
        let world = Point::new(8.51, 47.29);

        let screen = camera.world_to_screen(world, viewport);
        assert!(close(camera.screen_to_world(screen, viewport), world));
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        let camera = MapCamera::new(Point::new(-3.0, 40.0), 8.0);
        let viewport = Vec2::new(640.0, 480.0);

        let screen = camera.world_to_screen(camera.center, viewport);
        assert!(close(screen, Point::new(320.0, 240.0)));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = MapCamera::new(Point::new(8.5, 47.3), 10.0);
        let viewport = Vec2::new(800.0, 600.0);
        let anchor = Point::new(200.0, 150.0);
        let world_before = camera.screen_to_world(anchor, viewport);

        camera.zoom_by(1.0, anchor, viewport);

        let world_after = camera.screen_to_world(anchor, viewport);
        assert!(close(world_before, world_after));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = MapCamera::new(Point::ZERO, 21.5);
        let viewport = Vec2::new(800.0, 600.0);
        camera.zoom_by(5.0, Point::new(400.0, 300.0), viewport);
        assert_eq!(camera.zoom, 22.0);

        camera.zoom_by(-30.0, Point::new(400.0, 300.0), viewport);
        assert_eq!(camera.zoom, 0.0);
    }

    #[test]
    fn test_pan_moves_center_opposite_to_drag() {
        let mut camera = MapCamera::new(Point::ZERO, 4.0);
        let before = camera.center;
        camera.pan_pixels(Vec2::new(100.0, 0.0));
        assert!(camera.center.x < before.x);
    }
}
