//! Drawn features and their display classification.

use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable feature identifier. The engine contract is string ids.
pub type FeatureId = String;

/// Generate a fresh feature id.
pub fn new_feature_id() -> FeatureId {
    Uuid::new_v4().to_string()
}

/// Display classification of a feature, derived from its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// A line string.
    Route,
    /// A polygon.
    Area,
}

impl FeatureKind {
    /// Classify a geometry. Total over every geometry the engine can
    /// produce: line strings are routes, everything else is an area.
    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::LineString(_) => FeatureKind::Route,
            Geometry::Polygon(_) => FeatureKind::Area,
        }
    }

    /// The user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            FeatureKind::Route => "Route",
            FeatureKind::Area => "Area",
        }
    }
}

/// A drawn feature, owned by the drawing engine. Consumers outside the
/// engine treat the geometry as an opaque snapshot and act on it only
/// through engine commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable identifier.
    pub id: FeatureId,
    /// Geometry snapshot.
    pub geometry: Geometry,
}

impl Feature {
    /// Create a feature with a fresh id.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: new_feature_id(),
            geometry,
        }
    }

    /// Create a feature with a known id.
    pub fn with_id(id: impl Into<FeatureId>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }

    /// Display classification of this feature.
    pub fn kind(&self) -> FeatureKind {
        FeatureKind::of(&self.geometry)
    }

    /// The user-facing label for this feature.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_label_derivation_is_total() {
        let route = Geometry::line_string(vec![Point::ZERO, Point::new(1.0, 1.0)]);
        let area = Geometry::polygon(vec![
            Point::ZERO,
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);

        assert_eq!(FeatureKind::of(&route), FeatureKind::Route);
        assert_eq!(FeatureKind::of(&area), FeatureKind::Area);
        assert_eq!(FeatureKind::Route.label(), "Route");
        assert_eq!(FeatureKind::Area.label(), "Area");
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let g = Geometry::line_string(vec![Point::ZERO, Point::new(1.0, 0.0)]);
        let a = Feature::new(g.clone());
        let b = Feature::new(g);
        assert_ne!(a.id, b.id);
    }
}
