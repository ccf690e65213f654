//! Cleanup registry: per-element teardown actions for active effects.
//!
//! Teardowns are plain data interpreted by the engine, so running them can
//! never fail and one entry can never block the rest.

use hashbrown::HashMap;

use crate::ids::{ElementId, TaskId};

/// Action reversing a previously applied effect or detaching a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Teardown {
    /// Clear the animation shorthand and play-state properties.
    ClearAnimation(ElementId),
    /// Remove the scroll binding and the parallax transform.
    DetachScroll(ElementId),
    /// Cancel a scheduled recurring task (typewriter reveal, shape morph).
    CancelTask(TaskId),
}

/// At most one teardown is tracked per element; registering again replaces
/// (never stacks) the previous entry.
#[derive(Default, Debug)]
pub struct CleanupRegistry {
    entries: HashMap<ElementId, Teardown>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the teardown for `element`.
    pub fn register(&mut self, element: ElementId, teardown: Teardown) {
        self.entries.insert(element, teardown);
    }

    pub fn get(&self, element: ElementId) -> Option<&Teardown> {
        self.entries.get(&element)
    }

    /// Drop the entry for `element` iff it cancels exactly `task`. Used when
    /// a self-completing task finishes so a stale handle is not kept around.
    pub fn clear_task(&mut self, element: ElementId, task: TaskId) {
        if self.entries.get(&element) == Some(&Teardown::CancelTask(task)) {
            self.entries.remove(&element);
        }
    }

    /// Empty the registry, returning every stored teardown exactly once.
    /// Order is unspecified.
    pub fn take_all(&mut self) -> Vec<(ElementId, Teardown)> {
        self.entries.drain().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
