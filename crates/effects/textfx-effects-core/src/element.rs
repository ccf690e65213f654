//! Canonical element records and the declarative marker vocabulary.
//!
//! Markers are parsed exactly once, when a record enters the store, into the
//! `Enhancement` variant the enhancer dispatches on. An element carrying
//! several markers gets deterministic behavior from the fixed priority order
//! typewriter > parallax > gradient > keyframe.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::ids::ElementId;
use crate::style::StyleMap;

/// Declarative marker vocabulary document authors use on elements.
pub mod markers {
    pub const CLASS_TYPEWRITER: &str = "tfx-typewriter";
    pub const CLASS_PARALLAX: &str = "tfx-parallax";
    pub const CLASS_RESPONSIVE: &str = "tfx-responsive";
    /// Rendering-hint class added to every enhanced element.
    pub const CLASS_ENHANCED: &str = "tfx-enhanced";
    pub const CLASS_FONTS_READY: &str = "tfx-fonts-ready";

    pub const ATTR_GRADIENT: &str = "data-tfx-gradient";
    pub const ATTR_ANIMATE: &str = "data-tfx-animate";
    pub const ATTR_DURATION: &str = "data-tfx-duration";
    pub const ATTR_DELAY: &str = "data-tfx-delay";
    pub const ATTR_SPEED: &str = "data-tfx-speed";
}

/// Host-facing description of an element to register with the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub classes: Vec<String>,
    pub style: HashMap<String, String>,
    pub text: Option<String>,
    pub attributes: HashMap<String, String>,
    /// Natural computed font size reported by the rendering surface.
    pub font_size: f32,
}

impl Default for ElementSpec {
    fn default() -> Self {
        Self {
            tag: "span".to_string(),
            classes: Vec::new(),
            style: HashMap::new(),
            text: None,
            attributes: HashMap::new(),
            font_size: 16.0,
        }
    }
}

/// Treatment selected by the marker set, in priority order.
#[derive(Clone, Debug, PartialEq)]
pub enum Enhancement {
    Typewriter,
    Parallax {
        speed: f32,
    },
    Gradient {
        spec: String,
    },
    Keyframe {
        name: String,
        duration: String,
        delay: String,
    },
    /// No effect marker present (the element may still be responsive-marked).
    None,
}

/// Canonical record of a renderable node owned by the store.
///
/// The engine mirrors every style/text mutation it makes here into Outputs,
/// so the record always reflects what the host surface should show.
#[derive(Clone, Debug)]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    pub text: String,
    pub style: StyleMap,
    base_font_size: f32,
    font_size_override: Option<f32>,
    pub enhanced: bool,
    enhancement: Enhancement,
}

impl Element {
    pub(crate) fn from_spec(id: ElementId, spec: ElementSpec, cfg: &EngineConfig) -> Self {
        let mut style = StyleMap::new();
        for (property, value) in &spec.style {
            style.set(property, value.clone());
        }
        let mut el = Self {
            id,
            tag: spec.tag,
            classes: spec.classes,
            attributes: spec.attributes,
            text: spec.text.unwrap_or_default(),
            style,
            base_font_size: spec.font_size,
            font_size_override: None,
            enhanced: false,
            enhancement: Enhancement::None,
        };
        el.enhancement = parse_markers(&el, cfg);
        el
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The treatment parsed from this element's markers at registration.
    pub fn enhancement(&self) -> &Enhancement {
        &self.enhancement
    }

    /// Current computed font size: the scaling override when present,
    /// otherwise the natural size.
    #[inline]
    pub fn computed_font_size(&self) -> f32 {
        self.font_size_override.unwrap_or(self.base_font_size)
    }

    pub(crate) fn set_font_size_override(&mut self, size: f32) {
        self.font_size_override = Some(size);
    }

    pub(crate) fn clear_font_size_override(&mut self) {
        self.font_size_override = None;
    }

    /// True when the element carries any marker the engine reacts to.
    pub fn has_marker(&self) -> bool {
        self.enhancement != Enhancement::None || self.has_class(markers::CLASS_RESPONSIVE)
    }
}

fn parse_markers(el: &Element, cfg: &EngineConfig) -> Enhancement {
    if el.has_class(markers::CLASS_TYPEWRITER) {
        return Enhancement::Typewriter;
    }
    if el.has_class(markers::CLASS_PARALLAX) {
        let speed = el
            .attr(markers::ATTR_SPEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or(cfg.default_parallax_speed);
        return Enhancement::Parallax { speed };
    }
    if let Some(spec) = el.attr(markers::ATTR_GRADIENT) {
        return Enhancement::Gradient {
            spec: spec.to_string(),
        };
    }
    if let Some(name) = el.attr(markers::ATTR_ANIMATE) {
        return Enhancement::Keyframe {
            name: name.to_string(),
            duration: el
                .attr(markers::ATTR_DURATION)
                .unwrap_or(&cfg.default_duration)
                .to_string(),
            delay: el
                .attr(markers::ATTR_DELAY)
                .unwrap_or(&cfg.default_delay)
                .to_string(),
        };
    }
    Enhancement::None
}

/// Minimal element storage keyed by ElementId.
#[derive(Default, Debug)]
pub struct ElementStore {
    items: Vec<Element>,
}

impl ElementStore {
    pub fn insert(&mut self, element: Element) {
        self.items.push(element);
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.items.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
