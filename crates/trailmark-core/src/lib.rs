//! Trailmark Core Library
//!
//! Engine-agnostic logic for the Trailmark map feature editor: drawn
//! feature geometry, the drawing-engine contract, the drag-suppression
//! mode policy, and the roster view that mirrors the engine's feature
//! set.

pub mod engine;
pub mod events;
pub mod feature;
pub mod geometry;
pub mod modes;
pub mod roster;

pub use engine::{DrawEngine, EngineError, MemoryEngine};
pub use events::DrawEventKind;
pub use feature::{Feature, FeatureId, FeatureKind, new_feature_id};
pub use geometry::{Geometry, VertexPath};
pub use modes::{
    DragDecision, DragGuard, InteractionMode, SelectionState, install_drag_guards,
};
pub use roster::{EMPTY_PLACEHOLDER, FeatureRoster};
