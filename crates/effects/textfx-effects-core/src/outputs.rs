//! Output contracts from the core engine.
//!
//! Outputs carry the style/text mutations for this tick plus a separate list
//! of semantic events. Adapters apply changes to the host surface and
//! transport events; the core's own element records already reflect them.

use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// One style property assignment for an element this tick.
/// `value: None` means the property was cleared.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StyleChange {
    pub element: ElementId,
    pub property: String,
    pub value: Option<String>,
}

/// Discrete semantic signals emitted while stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum EngineEvent {
    /// Baseline presentational rules the host should inject once.
    StylesheetReady { css: String },
    ElementEnhanced { element: ElementId },
    /// Text content replaced (typewriter reveal, create helper).
    TextChanged { element: ElementId, text: String },
    TypewriterFinished { element: ElementId },
    AnimationsToggled { enabled: bool },
    FontsReady,
    Destroyed,
}

/// Outputs returned by `Engine::update()` and accumulated by the public
/// operations between ticks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<StyleChange>,
    #[serde(default)]
    pub events: Vec<EngineEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: StyleChange) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
