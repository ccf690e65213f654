//! textfx Effects Core (host-agnostic)
//!
//! Presentation-layer enhancement engine for marked-up text content:
//! typewriter reveal, parallax displacement, gradient/neon/outline/shadow
//! styling, viewport-triggered animation activation, and width-driven font
//! scaling. The core owns canonical element records, consumes host events
//! (`Inputs`), and emits style changes plus semantic events (`Outputs`)
//! that an adapter applies to the real rendering surface.

pub mod color;
pub mod config;
pub mod document;
pub mod effects;
pub mod element;
pub mod engine;
pub mod enhancer;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod plugins;
pub mod registry;
pub mod schedule;
pub mod style;
pub mod watchers;

// Re-exports for consumers (adapters)
pub use color::adjust_color;
pub use config::EngineConfig;
pub use document::{parse_document_json, DocumentError};
pub use effects::{effect_patch, EffectParams, TextEffect};
pub use element::{markers, Element, ElementSpec, Enhancement};
pub use engine::{Engine, BASELINE_STYLESHEET};
pub use enhancer::AnimationParams;
pub use ids::{ElementId, TaskId};
pub use inputs::{HostEvent, Inputs};
pub use outputs::{EngineEvent, Outputs, StyleChange};
pub use plugins::{morphing_plugin, PluginInstaller, PluginRegistry, MORPHING_PLUGIN};
pub use registry::{CleanupRegistry, Teardown};
pub use style::{StyleMap, StylePatch};
pub use watchers::{Rect, SizeWatcher, VisibilityWatcher};
