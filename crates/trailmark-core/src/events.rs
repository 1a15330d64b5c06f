//! Change notifications emitted by the drawing engine.

use std::collections::VecDeque;

/// Kind of engine change notification. Events carry no payload: the
/// contract is "something changed", and consumers re-fetch the full
/// feature set to get current truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawEventKind {
    /// The engine finished initial load.
    Load,
    /// A feature was created.
    Create,
    /// A feature's geometry changed.
    Update,
    /// A feature was deleted.
    Delete,
}

/// FIFO queue of pending notifications. The engine pushes as it
/// mutates; the host drains once per frame on the UI event loop, so
/// delivery is strictly ordered and single-threaded.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DrawEventKind>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification.
    pub fn push(&mut self, kind: DrawEventKind) {
        self.events.push_back(kind);
    }

    /// Take all pending notifications in emission order.
    pub fn drain(&mut self) -> Vec<DrawEventKind> {
        self.events.drain(..).collect()
    }

    /// Whether anything is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut q = EventQueue::new();
        q.push(DrawEventKind::Create);
        q.push(DrawEventKind::Update);
        q.push(DrawEventKind::Delete);

        assert_eq!(
            q.drain(),
            vec![
                DrawEventKind::Create,
                DrawEventKind::Update,
                DrawEventKind::Delete
            ]
        );
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }
}
