//! In-process drawing engine.

use super::{DrawEngine, EngineError};
use crate::events::{DrawEventKind, EventQueue};
use crate::feature::{Feature, FeatureId, new_feature_id};
use crate::geometry::{Geometry, VertexPath};
use crate::modes::{DragDecision, DragGuard, InteractionMode, SelectionState};
use kurbo::Vec2;
use std::collections::HashMap;

/// An in-process drawing engine holding the feature store, the active
/// interaction mode and the per-mode drag guards.
///
/// Native gesture behavior: in Select mode a drag translates the
/// selected features whole; in DirectSelect a drag moves the selected
/// vertices of the scoped feature, or translates the feature when no
/// vertices are selected. Registered guards run before the native
/// handler on every drag event and can suppress it.
#[derive(Default)]
pub struct MemoryEngine {
    /// Feature store, keyed by id.
    features: HashMap<FeatureId, Feature>,
    /// Insertion order of feature ids (snapshot ordering).
    order: Vec<FeatureId>,
    /// Active interaction mode.
    mode: InteractionMode,
    /// Features selected in Select mode.
    selected_ids: Vec<FeatureId>,
    /// Feature scoped by DirectSelect.
    active_feature: Option<FeatureId>,
    /// Vertex selection within the active feature.
    selection: SelectionState,
    /// Registered drag guards, one per mode.
    guards: HashMap<InteractionMode, DragGuard>,
    /// Pending change notifications.
    events: EventQueue,
    /// Whether the current drag has moved any geometry.
    drag_moved: bool,
}

impl MemoryEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine pre-populated with features (in order).
    pub fn with_features(features: Vec<Feature>) -> Self {
        let mut engine = Self::new();
        for feature in features {
            engine.order.push(feature.id.clone());
            engine.features.insert(feature.id.clone(), feature);
        }
        engine
    }

    /// Signal that initial load finished.
    pub fn mark_loaded(&mut self) {
        self.events.push(DrawEventKind::Load);
    }

    /// Add a newly drawn feature. The feature becomes the Select-mode
    /// selection, matching how drawing tools hand off to selection.
    pub fn add_feature(&mut self, geometry: Geometry) -> FeatureId {
        let id = new_feature_id();
        self.order.push(id.clone());
        self.features
            .insert(id.clone(), Feature::with_id(id.clone(), geometry));

        self.mode = InteractionMode::Select;
        self.active_feature = None;
        self.selection.clear();
        self.selected_ids = vec![id.clone()];

        self.events.push(DrawEventKind::Create);
        log::debug!("created feature {id}");
        id
    }

    /// Look up a feature by id.
    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Number of features in the store.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The active interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// The current vertex selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Ids selected in Select mode.
    pub fn selected_ids(&self) -> &[FeatureId] {
        &self.selected_ids
    }

    /// The feature scoped by DirectSelect, if any.
    pub fn active_feature(&self) -> Option<&FeatureId> {
        self.active_feature.as_ref()
    }

    /// Whether a feature is selected in either mode.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.iter().any(|s| s == id)
            || self.active_feature.as_deref() == Some(id)
    }

    /// Select a single feature in Select mode. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if !self.features.contains_key(id) {
            log::debug!("select ignored for unknown feature {id}");
            return;
        }
        self.mode = InteractionMode::Select;
        self.active_feature = None;
        self.selection.clear();
        self.selected_ids = vec![id.to_string()];
    }

    /// Clear every selection and return to Select mode (click on empty
    /// canvas, Escape).
    pub fn clear_selection(&mut self) {
        self.mode = InteractionMode::Select;
        self.selected_ids.clear();
        self.active_feature = None;
        self.selection.clear();
    }

    /// Select one vertex of the active feature. Only meaningful in
    /// DirectSelect; stale paths are ignored.
    pub fn select_vertex(&mut self, path: VertexPath) {
        if self.mode != InteractionMode::DirectSelect {
            return;
        }
        let valid = self
            .active_feature
            .as_ref()
            .and_then(|id| self.features.get(id))
            .is_some_and(|f| f.geometry.contains_path(path));
        if valid {
            self.selection.select_only(path);
        } else {
            log::debug!("vertex selection ignored for stale path {path:?}");
        }
    }

    /// Add a vertex to the selection (shift-click).
    pub fn extend_vertex_selection(&mut self, path: VertexPath) {
        if self.mode != InteractionMode::DirectSelect {
            return;
        }
        self.selection.extend_with(path);
    }

    /// Deselect all vertices but stay in DirectSelect.
    pub fn clear_vertex_selection(&mut self) {
        self.selection.clear();
    }

    /// Insert a vertex at the midpoint of a segment of the active
    /// feature and select it, so a following drag moves the new vertex.
    pub fn insert_vertex(&mut self, ring: usize, segment: usize) -> Option<VertexPath> {
        if self.mode != InteractionMode::DirectSelect {
            return None;
        }
        let id = self.active_feature.clone()?;
        let path = self
            .features
            .get_mut(&id)?
            .geometry
            .insert_vertex(ring, segment)?;
        self.selection.select_only(path);
        self.drag_moved = true;
        Some(path)
    }

    /// Handle one drag event. The guard registered for the active mode
    /// runs first; a suppressed drag is a no-op. The forwarded call
    /// runs the native handler with the same selection state the guard
    /// saw.
    pub fn drag(&mut self, delta: Vec2) {
        if let Some(guard) = self.guards.get(&self.mode) {
            if guard(&self.selection) == DragDecision::Suppress {
                log::trace!("drag suppressed in {:?} mode", self.mode);
                return;
            }
        }
        self.native_drag(delta);
    }

    /// Finish a drag gesture, emitting a single Update if any geometry
    /// moved since the gesture began.
    pub fn end_drag(&mut self) {
        if self.drag_moved {
            self.drag_moved = false;
            self.events.push(DrawEventKind::Update);
        }
    }

    /// The engine's stock drag behavior, unguarded.
    fn native_drag(&mut self, delta: Vec2) {
        match self.mode {
            InteractionMode::Select => {
                for id in &self.selected_ids {
                    if let Some(feature) = self.features.get_mut(id) {
                        feature.geometry.translate(delta);
                        self.drag_moved = true;
                    }
                }
            }
            InteractionMode::DirectSelect => {
                let Some(feature) = self
                    .active_feature
                    .as_ref()
                    .and_then(|id| self.features.get_mut(id))
                else {
                    return;
                };
                if self.selection.is_empty() {
                    feature.geometry.translate(delta);
                    self.drag_moved = true;
                } else {
                    for &path in &self.selection.vertex_paths {
                        if feature.geometry.move_vertex(path, delta) {
                            self.drag_moved = true;
                        }
                    }
                }
            }
        }
    }
}

impl DrawEngine for MemoryEngine {
    fn all_features(&self) -> Vec<Feature> {
        self.order
            .iter()
            .filter_map(|id| self.features.get(id))
            .cloned()
            .collect()
    }

    fn delete_feature(&mut self, id: &str) {
        if self.features.remove(id).is_none() {
            log::debug!("delete ignored for unknown feature {id}");
            return;
        }
        self.order.retain(|fid| fid != id);
        self.selected_ids.retain(|fid| fid != id);
        if self.active_feature.as_deref() == Some(id) {
            self.active_feature = None;
            self.selection.clear();
            self.mode = InteractionMode::Select;
        }
        self.events.push(DrawEventKind::Delete);
        log::debug!("deleted feature {id}");
    }

    fn enter_edit_mode(&mut self, id: &str) {
        if !self.features.contains_key(id) {
            log::debug!("edit ignored for unknown feature {id}");
            return;
        }
        self.mode = InteractionMode::DirectSelect;
        self.active_feature = Some(id.to_string());
        self.selection.clear();
        self.selected_ids.clear();
    }

    fn set_drag_guard(
        &mut self,
        mode: InteractionMode,
        guard: DragGuard,
    ) -> Result<(), EngineError> {
        self.guards.insert(mode, guard);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<DrawEventKind> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::install_drag_guards;
    use kurbo::Point;

    fn route_geometry() -> Geometry {
        Geometry::line_string(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    fn area_geometry() -> Geometry {
        Geometry::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    fn guarded_engine_with_route() -> (MemoryEngine, FeatureId) {
        let mut engine = MemoryEngine::new();
        install_drag_guards(&mut engine).unwrap();
        let id = engine.add_feature(route_geometry());
        (engine, id)
    }

    #[test]
    fn test_add_feature_emits_create_and_selects() {
        let mut engine = MemoryEngine::new();
        let id = engine.add_feature(route_geometry());

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.selected_ids(), &[id.clone()]);
        assert_eq!(engine.mode(), InteractionMode::Select);
        assert_eq!(engine.poll_events(), vec![DrawEventKind::Create]);
        assert!(engine.poll_events().is_empty());
        assert!(engine.feature(&id).is_some());
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut engine = MemoryEngine::new();
        let a = engine.add_feature(route_geometry());
        let b = engine.add_feature(area_geometry());

        let ids: Vec<_> = engine.all_features().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_select_mode_drag_is_suppressed() {
        let (mut engine, id) = guarded_engine_with_route();
        let before = engine.feature(&id).unwrap().geometry.clone();

        engine.drag(Vec2::new(5.0, 5.0));
        engine.drag(Vec2::new(-2.0, 7.0));
        engine.end_drag();

        assert_eq!(engine.feature(&id).unwrap().geometry, before);
        // A fully suppressed gesture never produces an Update.
        assert_eq!(engine.poll_events(), vec![DrawEventKind::Create]);
    }

    #[test]
    fn test_unguarded_select_drag_translates() {
        // Without guards the native handler runs, which is exactly the
        // accidental whole-feature drag the policy exists to prevent.
        let mut engine = MemoryEngine::new();
        let id = engine.add_feature(route_geometry());

        engine.drag(Vec2::new(5.0, 5.0));
        engine.end_drag();

        let moved = engine.feature(&id).unwrap();
        assert_eq!(
            moved.geometry.vertex(VertexPath::new(0, 0)),
            Some(Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_direct_select_without_vertices_is_suppressed() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.enter_edit_mode(&id);
        let before = engine.feature(&id).unwrap().geometry.clone();

        engine.drag(Vec2::new(3.0, 3.0));
        engine.end_drag();

        assert_eq!(engine.feature(&id).unwrap().geometry, before);
    }

    #[test]
    fn test_vertex_drag_matches_native_outcome() {
        let path = VertexPath::new(0, 1);
        let delta = Vec2::new(4.0, -3.0);

        // Native outcome: no guards installed.
        let mut native = MemoryEngine::new();
        let native_id = native.add_feature(route_geometry());
        native.enter_edit_mode(&native_id);
        native.select_vertex(path);
        native.drag(delta);
        native.end_drag();

        // Guarded engine with a vertex selected forwards unchanged.
        let (mut guarded, id) = guarded_engine_with_route();
        guarded.enter_edit_mode(&id);
        guarded.select_vertex(path);
        guarded.drag(delta);
        guarded.end_drag();

        assert_eq!(
            guarded.feature(&id).unwrap().geometry,
            native.feature(&native_id).unwrap().geometry
        );
        assert_eq!(
            guarded.feature(&id).unwrap().geometry.vertex(path),
            Some(Point::new(14.0, -3.0))
        );
    }

    #[test]
    fn test_vertex_drag_emits_single_update() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.poll_events();
        engine.enter_edit_mode(&id);
        engine.select_vertex(VertexPath::new(0, 0));

        engine.drag(Vec2::new(1.0, 0.0));
        engine.drag(Vec2::new(1.0, 0.0));
        engine.end_drag();

        assert_eq!(engine.poll_events(), vec![DrawEventKind::Update]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.poll_events();

        engine.delete_feature(&id);
        assert!(engine.is_empty());
        assert_eq!(engine.poll_events(), vec![DrawEventKind::Delete]);

        // Second delete of the same id: silent no-op, no event.
        engine.delete_feature(&id);
        assert!(engine.poll_events().is_empty());
    }

    #[test]
    fn test_delete_active_feature_resets_mode() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.enter_edit_mode(&id);
        engine.select_vertex(VertexPath::new(0, 0));

        engine.delete_feature(&id);

        assert_eq!(engine.mode(), InteractionMode::Select);
        assert!(engine.active_feature().is_none());
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_enter_edit_mode_scopes_feature() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.enter_edit_mode(&id);

        assert_eq!(engine.mode(), InteractionMode::DirectSelect);
        assert_eq!(engine.active_feature(), Some(&id));
        assert!(engine.selection().is_empty());

        // Unknown id leaves the mode untouched.
        engine.enter_edit_mode("nope");
        assert_eq!(engine.active_feature(), Some(&id));
    }

    #[test]
    fn test_select_vertex_rejects_stale_path() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.enter_edit_mode(&id);

        engine.select_vertex(VertexPath::new(0, 99));
        assert!(engine.selection().is_empty());

        engine.select_vertex(VertexPath::new(0, 2));
        assert!(!engine.selection().is_empty());
    }

    #[test]
    fn test_insert_vertex_selects_new_vertex() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.poll_events();
        engine.enter_edit_mode(&id);

        let path = engine.insert_vertex(0, 0).unwrap();
        assert_eq!(path, VertexPath::new(0, 1));
        assert_eq!(engine.selection().vertex_paths, vec![path]);
        assert_eq!(engine.feature(&id).unwrap().geometry.vertex_count(), 4);

        // An insertion counts as an edit: the gesture ends in Update.
        engine.end_drag();
        assert_eq!(engine.poll_events(), vec![DrawEventKind::Update]);
    }

    #[test]
    fn test_escape_returns_to_select() {
        let (mut engine, id) = guarded_engine_with_route();
        engine.enter_edit_mode(&id);
        engine.select_vertex(VertexPath::new(0, 1));

        engine.clear_selection();

        assert_eq!(engine.mode(), InteractionMode::Select);
        assert!(engine.selected_ids().is_empty());
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_mark_loaded_emits_load() {
        let mut engine = MemoryEngine::with_features(vec![Feature::new(route_geometry())]);
        engine.mark_loaded();
        assert_eq!(engine.poll_events(), vec![DrawEventKind::Load]);
        assert_eq!(engine.len(), 1);
    }
}
