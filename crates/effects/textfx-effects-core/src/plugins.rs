//! Plugin registry: named installers extending an engine instance.
//!
//! The table is owned by the engine, not process-wide, so two engines never
//! share plugin state. Installers run at `load_plugin` time and flip
//! capabilities on the instance by side effect.

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::engine::Engine;

/// Installer invoked once per `load_plugin` against the target engine.
pub type PluginInstaller = Rc<dyn Fn(&mut Engine)>;

/// Name under which the built-in shape-morphing plugin registers itself.
pub const MORPHING_PLUGIN: &str = "morphing";

#[derive(Default)]
pub struct PluginRegistry {
    installers: HashMap<String, PluginInstaller>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the installer stored under `name`.
    pub fn register(&mut self, name: &str, installer: PluginInstaller) {
        self.installers.insert(name.to_string(), installer);
    }

    pub fn get(&self, name: &str) -> Option<PluginInstaller> {
        self.installers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.installers.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.installers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.installers.is_empty()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("names", &self.installers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Installer for the built-in morphing plugin; enables
/// `Engine::morph_shapes`.
pub fn morphing_plugin() -> PluginInstaller {
    Rc::new(|engine: &mut Engine| engine.enable_morphing())
}

/// Fixed catalog of named clip shapes for the morphing plugin.
pub mod shapes {
    pub const CIRCLE: &str = "circle(50% at 50% 50%)";
    pub const SQUARE: &str = "inset(0%)";
    pub const TRIANGLE: &str = "polygon(50% 0%, 0% 100%, 100% 100%)";

    /// Resolve a shape name to its clip-path; unrecognized names fall back
    /// to the circle.
    pub fn clip_path(name: &str) -> &'static str {
        match name {
            "square" => SQUARE,
            "triangle" => TRIANGLE,
            _ => CIRCLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should fall back to circle for unrecognized shape names
    #[test]
    fn shape_fallback_is_circle() {
        assert_eq!(shapes::clip_path("square"), shapes::SQUARE);
        assert_eq!(shapes::clip_path("triangle"), shapes::TRIANGLE);
        assert_eq!(shapes::clip_path("circle"), shapes::CIRCLE);
        assert_eq!(shapes::clip_path("hexagon"), shapes::CIRCLE);
    }
}
