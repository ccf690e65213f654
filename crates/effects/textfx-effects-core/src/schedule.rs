//! Cancellable recurring tasks advanced by engine time.
//!
//! The typewriter reveal and the morph cycle used to be the kind of timer
//! that outlives an early teardown; here every task has a handle that the
//! cleanup registry can cancel deterministically.

use crate::ids::{ElementId, TaskId};

#[derive(Clone, Debug, PartialEq)]
pub enum TaskKind {
    /// Reveal `full_text` one character per interval; self-completes.
    Typewriter { full_text: String, shown: usize },
    /// Cycle clip-path shapes indefinitely.
    MorphCycle { shapes: Vec<String>, index: usize },
}

#[derive(Debug)]
struct Task {
    id: TaskId,
    element: ElementId,
    interval: f32,
    elapsed: f32,
    kind: TaskKind,
}

/// Action a fired task asks the engine to perform this tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskAction {
    /// Replace the element's text content; `done` marks the final reveal.
    RevealText { text: String, done: bool },
    SetClipPath { path: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskFire {
    pub task: TaskId,
    pub element: ElementId,
    pub action: TaskAction,
}

#[derive(Default, Debug)]
pub struct TaskQueue {
    tasks: Vec<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, id: TaskId, element: ElementId, interval: f32, kind: TaskKind) {
        // Guard against a zero interval spinning forever inside advance().
        let interval = interval.max(1e-3);
        self.tasks.push(Task {
            id,
            element,
            interval,
            elapsed: 0.0,
            kind,
        });
    }

    /// Returns true when the task was still scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance all tasks by dt, collecting the actions that came due. A task
    /// may fire several times in one call when dt spans multiple intervals.
    /// Completed typewriter tasks and shapeless morph cycles are removed;
    /// non-empty morph cycles run until cancelled.
    pub fn advance(&mut self, dt: f32) -> Vec<TaskFire> {
        let mut fires = Vec::new();
        for task in &mut self.tasks {
            task.elapsed += dt;
            while task.elapsed >= task.interval {
                task.elapsed -= task.interval;
                match &mut task.kind {
                    TaskKind::Typewriter { full_text, shown } => {
                        let total = full_text.chars().count();
                        *shown = (*shown + 1).min(total);
                        let text: String = full_text.chars().take(*shown).collect();
                        let done = *shown >= total;
                        fires.push(TaskFire {
                            task: task.id,
                            element: task.element,
                            action: TaskAction::RevealText { text, done },
                        });
                        if done {
                            break;
                        }
                    }
                    TaskKind::MorphCycle { shapes, index } => {
                        if shapes.is_empty() {
                            break;
                        }
                        let path = shapes[*index].clone();
                        *index = (*index + 1) % shapes.len();
                        fires.push(TaskFire {
                            task: task.id,
                            element: task.element,
                            action: TaskAction::SetClipPath { path },
                        });
                    }
                }
            }
        }
        self.tasks.retain(|t| match &t.kind {
            TaskKind::Typewriter { full_text, shown } => *shown < full_text.chars().count(),
            TaskKind::MorphCycle { shapes, .. } => !shapes.is_empty(),
        });
        fires
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should reveal one character per interval and self-complete
    #[test]
    fn typewriter_reveals_and_completes() {
        let mut q = TaskQueue::new();
        q.schedule(
            TaskId(0),
            ElementId(0),
            0.1,
            TaskKind::Typewriter {
                full_text: "Hi".to_string(),
                shown: 0,
            },
        );
        let fires = q.advance(0.1);
        assert_eq!(
            fires[0].action,
            TaskAction::RevealText {
                text: "H".to_string(),
                done: false
            }
        );
        let fires = q.advance(0.1);
        assert_eq!(
            fires[0].action,
            TaskAction::RevealText {
                text: "Hi".to_string(),
                done: true
            }
        );
        assert!(q.is_empty());
    }

    /// it should fire multiple reveals when dt spans several intervals
    #[test]
    fn large_dt_fires_multiple_times() {
        let mut q = TaskQueue::new();
        q.schedule(
            TaskId(0),
            ElementId(0),
            0.1,
            TaskKind::Typewriter {
                full_text: "abc".to_string(),
                shown: 0,
            },
        );
        let fires = q.advance(0.35);
        assert_eq!(fires.len(), 3);
        assert!(q.is_empty());
    }

    /// it should drop an empty morph cycle instead of firing
    #[test]
    fn empty_morph_cycle_is_dropped() {
        let mut q = TaskQueue::new();
        q.schedule(
            TaskId(0),
            ElementId(0),
            0.1,
            TaskKind::MorphCycle {
                shapes: vec![],
                index: 0,
            },
        );
        let fires = q.advance(1.0);
        assert!(fires.is_empty());
        assert!(q.is_empty());
    }

    /// it should cycle morph shapes indefinitely until cancelled
    #[test]
    fn morph_cycles_and_cancels() {
        let mut q = TaskQueue::new();
        q.schedule(
            TaskId(1),
            ElementId(2),
            0.5,
            TaskKind::MorphCycle {
                shapes: vec!["a".to_string(), "b".to_string()],
                index: 0,
            },
        );
        let fires = q.advance(1.0);
        assert_eq!(fires.len(), 2);
        assert_eq!(
            fires[0].action,
            TaskAction::SetClipPath {
                path: "a".to_string()
            }
        );
        assert_eq!(
            fires[1].action,
            TaskAction::SetClipPath {
                path: "b".to_string()
            }
        );
        assert!(q.cancel(TaskId(1)));
        assert!(q.is_empty());
        assert!(!q.cancel(TaskId(1)));
    }
}
