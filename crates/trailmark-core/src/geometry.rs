//! Feature geometry: line strings and polygons in lng/lat space.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Addressable reference to one vertex within a geometry.
///
/// `ring` is always 0 for line strings; polygons index their exterior
/// ring as 0 and holes from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexPath {
    pub ring: usize,
    pub index: usize,
}

impl VertexPath {
    /// Create a new vertex path.
    pub const fn new(ring: usize, index: usize) -> Self {
        Self { ring, index }
    }
}

/// Serde mirror of [`Geometry`] matching the GeoJSON geometry shape:
/// `{"type": "LineString", "coordinates": [[lng, lat], ...]}`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum GeometryRepr {
    LineString(Vec<[f64; 2]>),
    Polygon(Vec<Vec<[f64; 2]>>),
}

/// Geometry of a drawn feature. Coordinates are kurbo points with
/// `x` = longitude and `y` = latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GeometryRepr", into = "GeometryRepr")]
pub enum Geometry {
    /// An open polyline (a route).
    LineString(Vec<Point>),
    /// A closed area: rings of vertices, exterior ring first.
    /// Rings are stored unclosed (first vertex is not repeated).
    Polygon(Vec<Vec<Point>>),
}

impl From<GeometryRepr> for Geometry {
    fn from(repr: GeometryRepr) -> Self {
        match repr {
            GeometryRepr::LineString(pts) => {
                Geometry::LineString(pts.into_iter().map(|[x, y]| Point::new(x, y)).collect())
            }
            GeometryRepr::Polygon(rings) => Geometry::Polygon(
                rings
                    .into_iter()
                    .map(|ring| ring.into_iter().map(|[x, y]| Point::new(x, y)).collect())
                    .collect(),
            ),
        }
    }
}

impl From<Geometry> for GeometryRepr {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::LineString(pts) => {
                GeometryRepr::LineString(pts.into_iter().map(|p| [p.x, p.y]).collect())
            }
            Geometry::Polygon(rings) => GeometryRepr::Polygon(
                rings
                    .into_iter()
                    .map(|ring| ring.into_iter().map(|p| [p.x, p.y]).collect())
                    .collect(),
            ),
        }
    }
}

impl Geometry {
    /// Create a line string, normalizing nothing.
    pub fn line_string(points: Vec<Point>) -> Self {
        Geometry::LineString(points)
    }

    /// Create a polygon from a single exterior ring.
    pub fn polygon(exterior: Vec<Point>) -> Self {
        Geometry::Polygon(vec![exterior])
    }

    /// Whether each ring of this geometry closes on itself.
    pub fn is_closed(&self) -> bool {
        matches!(self, Geometry::Polygon(_))
    }

    /// Borrow the vertices of one ring (`ring` 0 for line strings).
    pub fn ring(&self, ring: usize) -> Option<&[Point]> {
        match self {
            Geometry::LineString(pts) => (ring == 0).then_some(pts.as_slice()),
            Geometry::Polygon(rings) => rings.get(ring).map(|r| r.as_slice()),
        }
    }

    fn ring_mut(&mut self, ring: usize) -> Option<&mut Vec<Point>> {
        match self {
            Geometry::LineString(pts) => (ring == 0).then_some(pts),
            Geometry::Polygon(rings) => rings.get_mut(ring),
        }
    }

    /// Number of rings (1 for line strings).
    pub fn ring_count(&self) -> usize {
        match self {
            Geometry::LineString(_) => 1,
            Geometry::Polygon(rings) => rings.len(),
        }
    }

    /// Total number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::LineString(pts) => pts.len(),
            Geometry::Polygon(rings) => rings.iter().map(Vec::len).sum(),
        }
    }

    /// Look up a vertex by path.
    pub fn vertex(&self, path: VertexPath) -> Option<Point> {
        self.ring(path.ring).and_then(|r| r.get(path.index)).copied()
    }

    /// Whether a path addresses an existing vertex.
    pub fn contains_path(&self, path: VertexPath) -> bool {
        self.vertex(path).is_some()
    }

    /// All addressable vertex paths, ring by ring.
    pub fn vertex_paths(&self) -> Vec<VertexPath> {
        let mut paths = Vec::with_capacity(self.vertex_count());
        for ring in 0..self.ring_count() {
            if let Some(r) = self.ring(ring) {
                for index in 0..r.len() {
                    paths.push(VertexPath::new(ring, index));
                }
            }
        }
        paths
    }

    /// Move a single vertex by `delta`. Returns false if the path does
    /// not address an existing vertex.
    pub fn move_vertex(&mut self, path: VertexPath, delta: Vec2) -> bool {
        match self.ring_mut(path.ring).and_then(|r| r.get_mut(path.index)) {
            Some(p) => {
                *p += delta;
                true
            }
            None => false,
        }
    }

    /// Insert a vertex at the midpoint of segment `segment` of `ring`
    /// and return its path. Polygon rings wrap (the last segment joins
    /// the last vertex back to the first).
    pub fn insert_vertex(&mut self, ring: usize, segment: usize) -> Option<VertexPath> {
        let closed = self.is_closed();
        let r = self.ring_mut(ring)?;
        let segments = if closed { r.len() } else { r.len().saturating_sub(1) };
        if segment >= segments {
            return None;
        }
        let a = r[segment];
        let b = r[(segment + 1) % r.len()];
        let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        r.insert(segment + 1, mid);
        Some(VertexPath::new(ring, segment + 1))
    }

    /// Midpoints of every segment of `ring`, paired with the segment index.
    pub fn segment_midpoints(&self, ring: usize) -> Vec<(usize, Point)> {
        let closed = self.is_closed();
        let Some(r) = self.ring(ring) else {
            return Vec::new();
        };
        let segments = if closed { r.len() } else { r.len().saturating_sub(1) };
        (0..segments)
            .map(|i| {
                let a = r[i];
                let b = r[(i + 1) % r.len()];
                (i, Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
            })
            .collect()
    }

    /// Translate the whole geometry by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Geometry::LineString(pts) => {
                for p in pts {
                    *p += delta;
                }
            }
            Geometry::Polygon(rings) => {
                for ring in rings {
                    for p in ring {
                        *p += delta;
                    }
                }
            }
        }
    }

    /// Bounding box, or None for an empty geometry.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for ring in 0..self.ring_count() {
            for &p in self.ring(ring).unwrap_or_default() {
                let r = Rect::new(p.x, p.y, p.x, p.y);
                result = Some(match result {
                    Some(acc) => acc.union(r),
                    None => r,
                });
            }
        }
        result
    }

    /// Hit test against a point. Line strings hit when the point lies
    /// within `tolerance` of any segment; polygons hit when the point
    /// is inside the exterior ring or near any edge.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Geometry::LineString(pts) => segments_hit(pts, point, tolerance, false),
            Geometry::Polygon(rings) => {
                if rings.first().is_some_and(|exterior| point_in_ring(exterior, point)) {
                    return true;
                }
                rings.iter().any(|ring| segments_hit(ring, point, tolerance, true))
            }
        }
    }
}

/// Distance from `point` to the segment `a`..`b`.
fn segment_distance(a: Point, b: Point, point: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return a.distance(point);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(point)
}

fn segments_hit(pts: &[Point], point: Point, tolerance: f64, closed: bool) -> bool {
    if pts.len() < 2 {
        return pts.first().is_some_and(|p| p.distance(point) <= tolerance);
    }
    let segments = if closed { pts.len() } else { pts.len() - 1 };
    (0..segments).any(|i| segment_distance(pts[i], pts[(i + 1) % pts.len()], point) <= tolerance)
}

/// Even-odd containment test against an unclosed ring.
fn point_in_ring(ring: &[Point], point: Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Geometry {
        Geometry::line_string(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    fn area() -> Geometry {
        Geometry::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_vertex_lookup() {
        let g = route();
        assert_eq!(g.vertex(VertexPath::new(0, 1)), Some(Point::new(10.0, 0.0)));
        assert_eq!(g.vertex(VertexPath::new(0, 3)), None);
        assert_eq!(g.vertex(VertexPath::new(1, 0)), None);
    }

    #[test]
    fn test_vertex_paths_cover_all_vertices() {
        assert_eq!(route().vertex_paths().len(), 3);
        assert_eq!(area().vertex_paths().len(), 4);
        assert!(area().vertex_paths().iter().all(|p| p.ring == 0));
    }

    #[test]
    fn test_move_vertex() {
        let mut g = route();
        assert!(g.move_vertex(VertexPath::new(0, 2), Vec2::new(5.0, -5.0)));
        assert_eq!(g.vertex(VertexPath::new(0, 2)), Some(Point::new(15.0, 5.0)));

        // Stale path is a no-op.
        assert!(!g.move_vertex(VertexPath::new(0, 9), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_translate() {
        let mut g = area();
        g.translate(Vec2::new(1.0, 2.0));
        assert_eq!(g.vertex(VertexPath::new(0, 0)), Some(Point::new(1.0, 2.0)));
        assert_eq!(g.vertex(VertexPath::new(0, 2)), Some(Point::new(11.0, 12.0)));
    }

    #[test]
    fn test_insert_vertex_line() {
        let mut g = route();
        let path = g.insert_vertex(0, 0).unwrap();
        assert_eq!(path, VertexPath::new(0, 1));
        assert_eq!(g.vertex(path), Some(Point::new(5.0, 0.0)));
        assert_eq!(g.vertex_count(), 4);

        // A line with 4 vertices has 3 segments.
        assert!(g.insert_vertex(0, 3).is_none());
    }

    #[test]
    fn test_insert_vertex_polygon_wraps() {
        let mut g = area();
        // Segment 3 joins the last vertex back to the first.
        let path = g.insert_vertex(0, 3).unwrap();
        assert_eq!(g.vertex(path), Some(Point::new(0.0, 5.0)));
        assert_eq!(g.vertex_count(), 5);
    }

    #[test]
    fn test_midpoints() {
        assert_eq!(route().segment_midpoints(0).len(), 2);
        assert_eq!(area().segment_midpoints(0).len(), 4);
    }

    #[test]
    fn test_line_hit() {
        let g = route();
        assert!(g.hit_test(Point::new(5.0, 0.4), 0.5));
        assert!(!g.hit_test(Point::new(5.0, 2.0), 0.5));
    }

    #[test]
    fn test_polygon_hit_interior_and_edge() {
        let g = area();
        assert!(g.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(g.hit_test(Point::new(-0.3, 5.0), 0.5));
        assert!(!g.hit_test(Point::new(-2.0, 5.0), 0.5));
    }

    #[test]
    fn test_bounds() {
        let b = area().bounds().unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(Geometry::line_string(Vec::new()).bounds().is_none());
    }

    #[test]
    fn test_geojson_shape() {
        let json = serde_json::to_value(route()).unwrap();
        assert_eq!(json["type"], "LineString");
        assert_eq!(json["coordinates"][1][0], 10.0);

        let back: Geometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, route());

        let json = serde_json::to_value(area()).unwrap();
        assert_eq!(json["type"], "Polygon");
        let back: Geometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, area());
    }
}
