//! Observer adapters: pure event sources translating raw host geometry into
//! the transitions the engine reacts to. Policy lives in the engine's
//! reaction methods, never here.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// Axis-aligned rectangle in device-independent pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        (right - left).max(0.0) * (bottom - top).max(0.0)
    }
}

/// Reports when an observed element transitions into visibility.
///
/// The viewport is expanded by the proximity margin before the intersection
/// is tested; the visible fraction is intersection area over element area.
/// Only the entry edge is reported; leaving and staying visible are not.
#[derive(Debug)]
pub struct VisibilityWatcher {
    threshold: f32,
    margin: f32,
    /// Observed elements and whether they are currently past the threshold.
    observed: HashMap<ElementId, bool>,
}

impl VisibilityWatcher {
    pub fn new(threshold: f32, margin: f32) -> Self {
        Self {
            threshold,
            margin,
            observed: HashMap::new(),
        }
    }

    pub fn observe(&mut self, element: ElementId) {
        self.observed.entry(element).or_insert(false);
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains_key(&element)
    }

    /// Stop all watching. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    /// Feed one geometry sample; returns true when this sample moves the
    /// element from hidden to visible. Unobserved elements are ignored.
    pub fn sample(&mut self, element: ElementId, bounds: Rect, viewport: Rect) -> bool {
        let Some(visible) = self.observed.get_mut(&element) else {
            return false;
        };
        let area = bounds.area();
        let fraction = if area > 0.0 {
            viewport.expand(self.margin).intersection_area(&bounds) / area
        } else {
            0.0
        };
        let now_visible = fraction >= self.threshold;
        let entered = now_visible && !*visible;
        *visible = now_visible;
        entered
    }
}

/// Reports every rendered box-size change for observed elements, with no
/// threshold. The first sample after `observe` counts as a change, matching
/// the initial delivery of host resize observers.
#[derive(Default, Debug)]
pub struct SizeWatcher {
    observed: HashMap<ElementId, Option<(f32, f32)>>,
}

impl SizeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, element: ElementId) {
        self.observed.entry(element).or_insert(None);
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains_key(&element)
    }

    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    /// Feed one box-size sample; returns true when the size differs from the
    /// last reported one.
    pub fn sample(&mut self, element: ElementId, width: f32, height: f32) -> bool {
        let Some(last) = self.observed.get_mut(&element) else {
            return false;
        };
        let changed = *last != Some((width, height));
        *last = Some((width, height));
        changed
    }
}
