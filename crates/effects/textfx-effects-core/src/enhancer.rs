//! Element enhancer: the public effect-application operations.
//!
//! `enhance` dispatches on the marker variant parsed at registration; at
//! most one treatment applies per element. Everything that starts a
//! long-running activity registers its teardown with the cleanup registry
//! so `destroy()` halts it deterministically, including the self-completing
//! typewriter reveal.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::effects::{effect_patch, gradient_patch, EffectParams};
use crate::element::{markers, ElementSpec, Enhancement};
use crate::engine::Engine;
use crate::ids::ElementId;
use crate::outputs::EngineEvent;
use crate::plugins::shapes;
use crate::registry::Teardown;
use crate::schedule::TaskKind;
use crate::style::StylePatch;

/// Optional timing parameters for `animate_text`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationParams {
    pub duration: Option<String>,
    pub delay: Option<String>,
}

impl Engine {
    /// Idempotently mark the element enhanced and apply the treatment its
    /// markers select. Unknown ids are ignored.
    pub fn enhance(&mut self, id: ElementId) {
        let Some(el) = self.store().get(id) else {
            debug!("enhance on unknown element {id:?} ignored");
            return;
        };
        if el.enhanced {
            return;
        }
        let enhancement = el.enhancement().clone();

        if let Some(el) = self.store_mut().get_mut(id) {
            el.enhanced = true;
            el.add_class(markers::CLASS_ENHANCED);
        }

        match enhancement {
            Enhancement::Typewriter => self.setup_typewriter_effect(id),
            Enhancement::Parallax { speed } => self.setup_parallax_effect(id, speed),
            Enhancement::Gradient { spec } => self.apply_patch(id, &gradient_patch(&spec)),
            Enhancement::Keyframe {
                name,
                duration,
                delay,
            } => self.setup_custom_animation(id, &name, &duration, &delay),
            Enhancement::None => {}
        }

        self.outputs_mut()
            .push_event(EngineEvent::ElementEnhanced { element: id });
    }

    /// Build an element from `spec`, run it through `enhance`, and return
    /// the handle. The caller owns attachment to the host document.
    pub fn create_text_element(&mut self, spec: ElementSpec) -> ElementId {
        let id = self.register_element(spec);
        self.enhance(id);
        id
    }

    /// Apply a named catalog effect. Unknown names are silently ignored.
    pub fn apply_text_effect(&mut self, id: ElementId, name: &str, params: &EffectParams) {
        match effect_patch(name, params) {
            Some(patch) => self.apply_patch(id, &patch),
            None => debug!("unknown text effect '{name}' ignored"),
        }
    }

    /// Start a keyframe animation on the element and register a teardown
    /// that clears it. No-op under reduced motion.
    pub fn animate_text(&mut self, id: ElementId, animation: &str, params: &AnimationParams) {
        if self.reduce_motion() {
            return;
        }
        let duration = params
            .duration
            .clone()
            .unwrap_or_else(|| self.config().default_duration.clone());
        let delay = params
            .delay
            .clone()
            .unwrap_or_else(|| self.config().default_delay.clone());
        self.set_style(
            id,
            "animation",
            &format!("{animation} {duration} ease {delay} both"),
        );
        self.registry_mut().register(id, Teardown::ClearAnimation(id));
    }

    /// Capture the element's text, clear it, and schedule the per-character
    /// reveal. The task handle is registered as the element's teardown so an
    /// early `destroy()` stops the reveal. No-op under reduced motion.
    pub fn setup_typewriter_effect(&mut self, id: ElementId) {
        if self.reduce_motion() {
            return;
        }
        let Some(full_text) = self.element_text(id).map(str::to_string) else {
            return;
        };
        if full_text.is_empty() {
            return;
        }
        self.set_text(id, "");
        let task = self.alloc_task();
        let interval = self.config().typewriter_interval;
        self.tasks_mut().schedule(
            task,
            id,
            interval,
            TaskKind::Typewriter {
                full_text,
                shown: 0,
            },
        );
        self.registry_mut().register(id, Teardown::CancelTask(task));
    }

    /// Bind the element to the global scroll position with the given speed;
    /// the teardown detaches the binding.
    pub fn setup_parallax_effect(&mut self, id: ElementId, speed: f32) {
        self.parallax_mut().insert(id, speed);
        let offset = self.scroll_offset();
        self.set_style(id, "transform", &format!("translateY({}px)", offset * speed));
        self.registry_mut().register(id, Teardown::DetachScroll(id));
    }

    /// Set the declarative keyframe animation and observe the element with
    /// the visibility watcher so entry resumes it. No-op under reduced
    /// motion.
    pub fn setup_custom_animation(&mut self, id: ElementId, name: &str, duration: &str, delay: &str) {
        if self.reduce_motion() {
            return;
        }
        self.set_style(id, "animation", &format!("{name} {duration} ease {delay} both"));
        if let Some(w) = self.visibility_mut() {
            w.observe(id);
        }
    }

    /// Cycle the element's clip shape among `names` on a recurring task.
    /// Requires the morphing plugin to be loaded; otherwise a no-op.
    pub fn morph_shapes(&mut self, id: ElementId, names: &[String], interval: f32) {
        if !self.morphing_enabled() {
            debug!("morphing plugin not loaded; morph_shapes ignored");
            return;
        }
        if names.is_empty() {
            return;
        }
        let resolved: Vec<String> = names
            .iter()
            .map(|n| shapes::clip_path(n).to_string())
            .collect();
        let task = self.alloc_task();
        self.tasks_mut().schedule(
            task,
            id,
            interval,
            TaskKind::MorphCycle {
                shapes: resolved,
                index: 0,
            },
        );
        self.registry_mut().register(id, Teardown::CancelTask(task));
    }

    fn apply_patch(&mut self, id: ElementId, patch: &StylePatch) {
        for (property, value) in patch.iter() {
            self.set_style(id, property, value);
        }
    }
}
