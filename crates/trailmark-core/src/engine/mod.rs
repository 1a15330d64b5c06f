//! The drawing-engine contract and its in-process implementation.

mod memory;

pub use memory::MemoryEngine;

use crate::events::DrawEventKind;
use crate::feature::Feature;
use crate::modes::{DragGuard, InteractionMode};
use thiserror::Error;

/// Engine configuration errors. These are fatal at setup; nothing in
/// the running edit surface ever surfaces an error to the user.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("interaction mode {0:?} is not provided by the drawing engine")]
    UnsupportedMode(InteractionMode),
}

/// The minimal contract an external drawing engine must expose.
///
/// The engine exclusively owns and mutates its feature store; the rest
/// of the system observes snapshots and issues commands. Stale ids are
/// silent no-ops throughout.
pub trait DrawEngine {
    /// Full ordered snapshot of the current feature set.
    fn all_features(&self) -> Vec<Feature>;

    /// Remove a feature. No-op if the id is unknown.
    fn delete_feature(&mut self, id: &str);

    /// Enter vertex-editing mode scoped to one feature. No-op if the
    /// id is unknown.
    fn enter_edit_mode(&mut self, id: &str);

    /// Replace the drag handling of a named interaction mode with a
    /// guard. The engine keeps its native handler and runs it only
    /// when the guard forwards, with the same state the handler would
    /// natively receive.
    fn set_drag_guard(&mut self, mode: InteractionMode, guard: DragGuard)
    -> Result<(), EngineError>;

    /// Drain pending change notifications in emission order.
    fn poll_events(&mut self) -> Vec<DrawEventKind>;
}
