//! Wires the drawing engine to the feature roster.

use trailmark_core::{
    DrawEngine, EngineError, FeatureId, FeatureRoster, MemoryEngine, install_drag_guards,
};

/// Owns the drawing engine and keeps the roster in sync with it.
pub struct DrawingManager {
    engine: MemoryEngine,
    roster: FeatureRoster,
}

impl DrawingManager {
    /// Set up the engine: install the per-mode drag guards, then
    /// announce the initial load. Fails if the engine does not
    /// provide one of the guarded modes.
    pub fn mount() -> Result<Self, EngineError> {
        let mut engine = MemoryEngine::new();
        install_drag_guards(&mut engine)?;
        engine.mark_loaded();

        let mut manager = Self {
            engine,
            roster: FeatureRoster::new(),
        };
        manager.pump_events();
        Ok(manager)
    }

    pub fn engine(&self) -> &MemoryEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut MemoryEngine {
        &mut self.engine
    }

    pub fn roster(&self) -> &FeatureRoster {
        &self.roster
    }

    /// Drain pending engine events and resynchronize the roster.
    pub fn pump_events(&mut self) {
        for kind in self.engine.poll_events() {
            self.roster.handle_event(kind, &self.engine);
        }
    }

    /// Delete a feature from the roster. Stale ids are ignored.
    pub fn delete_feature(&mut self, id: &FeatureId) {
        self.roster.delete(&mut self.engine, id);
    }

    /// Put a feature into vertex editing.
    pub fn edit_feature(&mut self, id: &FeatureId) {
        self.roster.edit(&mut self.engine, id);
    }

    /// Delete whatever the engine currently has selected.
    pub fn delete_selected(&mut self) {
        let ids: Vec<FeatureId> = self.engine.selected_ids().to_vec();
        for id in ids {
            self.roster.delete(&mut self.engine, &id);
        }
    }
}
