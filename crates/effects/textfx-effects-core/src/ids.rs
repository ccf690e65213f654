//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Opaque handle to an element registered with the engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Handle to a scheduled recurring task (typewriter reveal, shape morph).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// Monotonic allocator for ElementId and TaskId.
/// Dense indices keep lookups cheap; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_element: u32,
    next_task: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_element(&mut self) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element = self.next_element.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_task(&mut self) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task = self.next_task.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
