//! The feature roster: a list view kept in sync with the engine.

use crate::engine::DrawEngine;
use crate::events::DrawEventKind;
use crate::feature::{Feature, FeatureId};

/// Placeholder shown instead of an empty list.
pub const EMPTY_PLACEHOLDER: &str =
    "No features drawn yet. Use the controls above to start drawing routes or areas.";

/// An ordered mirror of the engine's feature set, rebuilt wholesale on
/// every change notification. No incremental diffing: feature counts
/// are small (tens, not thousands), and a full re-fetch can never go
/// stale. Refreshing is idempotent, so an extra notification after an
/// explicit resync is harmless.
#[derive(Debug, Default)]
pub struct FeatureRoster {
    /// Ordered feature snapshots.
    entries: Vec<Feature>,
    /// Highlight-only marker; the engine's own selection stays
    /// authoritative.
    selected: Option<FeatureId>,
}

impl FeatureRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current entries, in engine order.
    pub fn entries(&self) -> &[Feature] {
        &self.entries
    }

    /// Number of rostered features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an id is currently rostered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|f| f.id == id)
    }

    /// The highlight marker.
    pub fn selected(&self) -> Option<&FeatureId> {
        self.selected.as_ref()
    }

    /// The list header, e.g. `Features (2)`.
    pub fn header(&self) -> String {
        format!("Features ({})", self.len())
    }

    /// Replace the roster with the engine's current feature set.
    pub fn refresh<E: DrawEngine + ?Sized>(&mut self, engine: &E) {
        self.entries = engine.all_features();
        let stale_marker = self
            .selected
            .as_ref()
            .is_some_and(|id| !self.entries.iter().any(|f| &f.id == id));
        if stale_marker {
            self.selected = None;
        }
    }

    /// Process one engine notification. Every kind means "something
    /// changed"; the response is always a full re-fetch.
    pub fn handle_event<E: DrawEngine + ?Sized>(&mut self, kind: DrawEventKind, engine: &E) {
        log::trace!("roster refresh on {kind:?}");
        self.refresh(engine);
    }

    /// Delete a rostered feature and resynchronize immediately, so the
    /// row disappears before the engine's own Delete notification is
    /// delivered. Ids no longer rostered are presumed stale and
    /// ignored.
    pub fn delete<E: DrawEngine + ?Sized>(&mut self, engine: &mut E, id: &str) {
        if !self.contains(id) {
            log::debug!("roster delete ignored for stale id {id}");
            return;
        }
        engine.delete_feature(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.refresh(engine);
    }

    /// Put a rostered feature into vertex-editing mode. No resync
    /// needed; the engine's mode change does not alter the feature set.
    pub fn edit<E: DrawEngine + ?Sized>(&mut self, engine: &mut E, id: &str) {
        if !self.contains(id) {
            log::debug!("roster edit ignored for stale id {id}");
            return;
        }
        engine.enter_edit_mode(id);
        self.selected = Some(id.to_string());
    }
}
