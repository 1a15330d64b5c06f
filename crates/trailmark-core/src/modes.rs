//! Interaction modes and the drag-suppression policy.
//!
//! The drawing engine has two interaction modes: whole-feature
//! selection and vertex editing. Accidental whole-feature dragging is
//! disabled by registering a gesture guard for each mode: the guard is
//! consulted on every drag event before the engine's native handler
//! runs, and either suppresses the drag (a no-op, not a failure) or
//! forwards it unchanged.

use crate::engine::{DrawEngine, EngineError};
use crate::geometry::VertexPath;
use serde::{Deserialize, Serialize};

/// The engine's interaction modes. Transitions are driven externally
/// (clicking a feature enters DirectSelect, clicking empty canvas or
/// pressing Escape returns to Select); the policy here only filters
/// drag behavior within each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Whole-feature selection (the engine's default mode).
    #[default]
    Select,
    /// Vertex editing scoped to a single feature.
    DirectSelect,
}

impl InteractionMode {
    /// The suppression predicate for this mode.
    ///
    /// Select swallows every drag: the feature must never translate.
    /// DirectSelect suppresses only when no vertex paths are selected,
    /// which is what a whole-shape drag looks like inside vertex mode.
    pub fn suppresses_drag(self, selection: &SelectionState) -> bool {
        match self {
            InteractionMode::Select => true,
            InteractionMode::DirectSelect => selection.is_empty(),
        }
    }
}

/// Engine-owned selection state, consulted read-only on every drag
/// event. Empty means the whole feature is the drag target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Currently selected vertex paths.
    pub vertex_paths: Vec<VertexPath>,
}

impl SelectionState {
    /// No vertices selected.
    pub fn is_empty(&self) -> bool {
        self.vertex_paths.is_empty()
    }

    /// Replace the selection with a single path.
    pub fn select_only(&mut self, path: VertexPath) {
        self.vertex_paths.clear();
        self.vertex_paths.push(path);
    }

    /// Add a path to the selection if not already present.
    pub fn extend_with(&mut self, path: VertexPath) {
        if !self.vertex_paths.contains(&path) {
            self.vertex_paths.push(path);
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.vertex_paths.clear();
    }
}

/// Outcome of consulting a drag guard for one drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDecision {
    /// Swallow the event; the native handler never runs.
    Suppress,
    /// Pass the event to the native handler unchanged.
    Forward,
}

/// A gesture guard registered per mode. The engine calls it with its
/// current selection state before running its native drag handler.
pub type DragGuard = Box<dyn Fn(&SelectionState) -> DragDecision>;

/// Build the policy guard for one mode.
pub fn guard_for(mode: InteractionMode) -> DragGuard {
    Box::new(move |selection| {
        if mode.suppresses_drag(selection) {
            DragDecision::Suppress
        } else {
            DragDecision::Forward
        }
    })
}

/// Register the drag guards for both modes on an engine.
///
/// Returns the first registration error; a partially guarded engine
/// must not be used.
pub fn install_drag_guards<E: DrawEngine + ?Sized>(engine: &mut E) -> Result<(), EngineError> {
    for mode in [InteractionMode::Select, InteractionMode::DirectSelect] {
        engine.set_drag_guard(mode, guard_for(mode))?;
    }
    Ok(())
}
