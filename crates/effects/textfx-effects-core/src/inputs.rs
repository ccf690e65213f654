//! Input contracts for the core engine.
//!
//! Hosts translate their observation primitives (viewport intersection,
//! resize observation, scroll position, motion-preference media query, font
//! loading) into these events and pass them to `Engine::update` each tick.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;
use crate::watchers::Rect;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Host events applied in delivery order before timers advance.
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

impl Inputs {
    pub fn event(ev: HostEvent) -> Self {
        Self { events: vec![ev] }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HostEvent {
    /// Raw geometry sample for an element the visibility watcher observes.
    Visibility {
        element: ElementId,
        bounds: Rect,
        viewport: Rect,
    },
    /// Rendered box size for an element the size watcher observes.
    Resize {
        element: ElementId,
        width: f32,
        height: f32,
    },
    /// Global scroll position changed.
    Scroll { offset: f32 },
    /// Accessibility motion preference changed.
    MotionPreference { reduce: bool },
    /// One-shot fonts-ready signal.
    FontsReady,
}
