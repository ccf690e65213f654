//! Engine: element ownership and the lifecycle public API.
//!
//! Methods:
//! - new, register_element, load_document, init (idempotent), update
//!   (host events → watcher transitions → reactions → timers), destroy,
//!   toggle_animations, register_plugin/load_plugin

use hashbrown::HashMap;
use log::debug;

use crate::config::EngineConfig;
use crate::element::{markers, Element, ElementSpec, ElementStore, Enhancement};
use crate::ids::{ElementId, IdAllocator};
use crate::inputs::{HostEvent, Inputs};
use crate::outputs::{EngineEvent, Outputs, StyleChange};
use crate::plugins::{morphing_plugin, PluginInstaller, PluginRegistry, MORPHING_PLUGIN};
use crate::registry::{CleanupRegistry, Teardown};
use crate::schedule::{TaskAction, TaskQueue};
use crate::watchers::{SizeWatcher, VisibilityWatcher};

/// Baseline presentational rules emitted once at init for the host to
/// inject. Keyframe-marked elements start paused; the visibility reaction
/// switches them to running.
pub const BASELINE_STYLESHEET: &str = "\
.tfx-enhanced{text-rendering:optimizeLegibility;-webkit-font-smoothing:antialiased}\n\
.tfx-typewriter{white-space:pre-wrap}\n\
.tfx-parallax{will-change:transform}\n\
[data-tfx-animate]{animation-play-state:paused}\n";

/// Lifecycle manager and effect engine. Owns canonical element state,
/// consumes host events, emits style changes and semantic events.
#[derive(Debug)]
pub struct Engine {
    // Owned data
    cfg: EngineConfig,
    ids: IdAllocator,
    store: ElementStore,

    // Systems
    registry: CleanupRegistry,
    tasks: TaskQueue,
    visibility: Option<VisibilityWatcher>,
    sizes: Option<SizeWatcher>,
    plugins: PluginRegistry,

    // Cross-callback state
    parallax: HashMap<ElementId, f32>,
    reduce_motion: bool,
    scroll_offset: f32,
    initialized: bool,
    watchers_built: u32,
    morphing: bool,

    // Per-tick outputs
    outputs: Outputs,
    /// Set once `update` returns the buffer; the next write clears it first.
    outputs_consumed: bool,
}

impl Engine {
    /// Create a new engine with the given config. The built-in morphing
    /// plugin is registered (not loaded).
    pub fn new(cfg: EngineConfig) -> Self {
        let mut plugins = PluginRegistry::new();
        plugins.register(MORPHING_PLUGIN, morphing_plugin());
        Self {
            reduce_motion: cfg.reduce_motion,
            cfg,
            ids: IdAllocator::new(),
            store: ElementStore::default(),
            registry: CleanupRegistry::new(),
            tasks: TaskQueue::new(),
            visibility: None,
            sizes: None,
            plugins,
            parallax: HashMap::new(),
            scroll_offset: 0.0,
            initialized: false,
            watchers_built: 0,
            morphing: false,
            outputs: Outputs::default(),
            outputs_consumed: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Register an element record without enhancing it; `init()` discovers
    /// and enhances marker-bearing records.
    pub fn register_element(&mut self, spec: ElementSpec) -> ElementId {
        let id = self.ids.alloc_element();
        self.store.insert(Element::from_spec(id, spec, &self.cfg));
        id
    }

    /// Register every element of a parsed document, returning their ids in
    /// document order.
    pub fn load_document(&mut self, specs: Vec<ElementSpec>) -> Vec<ElementId> {
        specs
            .into_iter()
            .map(|spec| self.register_element(spec))
            .collect()
    }

    /// One-way transition to Initialized; calling again is a no-op.
    ///
    /// In order: emit the baseline stylesheet, build both watchers, enhance
    /// every marker-bearing element, observe keyframe-marked elements with
    /// the visibility watcher and responsive-marked ones with the size
    /// watcher.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.outputs_mut().push_event(EngineEvent::StylesheetReady {
            css: BASELINE_STYLESHEET.to_string(),
        });
        self.visibility = Some(VisibilityWatcher::new(
            self.cfg.visibility_threshold,
            self.cfg.visibility_margin,
        ));
        self.sizes = Some(SizeWatcher::new());
        self.watchers_built += 1;

        let marked: Vec<ElementId> = self
            .store
            .iter()
            .filter(|e| e.has_marker())
            .map(|e| e.id)
            .collect();
        for id in marked {
            self.enhance(id);
        }

        let responsive: Vec<ElementId> = self
            .store
            .iter()
            .filter(|e| e.has_class(markers::CLASS_RESPONSIVE))
            .map(|e| e.id)
            .collect();
        if let Some(w) = self.sizes.as_mut() {
            for id in responsive {
                w.observe(id);
            }
        }

        // Covers keyframe elements enhanced before init (or before a
        // re-init), which the enhancement pass above skips.
        let animated: Vec<ElementId> = self
            .store
            .iter()
            .filter(|e| matches!(e.enhancement(), Enhancement::Keyframe { .. }))
            .map(|e| e.id)
            .collect();
        if let Some(w) = self.visibility.as_mut() {
            for id in animated {
                w.observe(id);
            }
        }
        self.initialized = true;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of times the watcher pair has been constructed; stays at 1
    /// across repeated `init()` calls without an intervening `destroy()`.
    #[inline]
    pub fn watchers_built(&self) -> u32 {
        self.watchers_built
    }

    #[inline]
    pub fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    /// Step the engine: apply host events in delivery order, then advance
    /// scheduled tasks by dt. Returns the outputs accumulated since the last
    /// update (including those produced by public operations in between).
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs_mut();

        for event in inputs.events {
            match event {
                HostEvent::Visibility {
                    element,
                    bounds,
                    viewport,
                } => {
                    let entered = self
                        .visibility
                        .as_mut()
                        .is_some_and(|w| w.sample(element, bounds, viewport));
                    if entered {
                        self.on_element_visible(element);
                    }
                }
                HostEvent::Resize {
                    element,
                    width,
                    height,
                } => {
                    let changed = self
                        .sizes
                        .as_mut()
                        .is_some_and(|w| w.sample(element, width, height));
                    if changed {
                        self.on_element_resized(element, width);
                    }
                }
                HostEvent::Scroll { offset } => self.apply_scroll(offset),
                HostEvent::MotionPreference { reduce } => self.apply_motion_preference(reduce),
                HostEvent::FontsReady => self.outputs_mut().push_event(EngineEvent::FontsReady),
            }
        }

        let fires = self.tasks.advance(dt);
        for fire in fires {
            match fire.action {
                TaskAction::RevealText { text, done } => {
                    self.set_text(fire.element, &text);
                    if done {
                        self.registry.clear_task(fire.element, fire.task);
                        self.outputs_mut().push_event(EngineEvent::TypewriterFinished {
                            element: fire.element,
                        });
                    }
                }
                TaskAction::SetClipPath { path } => {
                    self.set_style(fire.element, "clip-path", &path);
                }
            }
        }

        self.outputs_consumed = true;
        &self.outputs
    }

    /// Disconnect both watchers, run every registered cleanup exactly once,
    /// and return to Uninitialized. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if let Some(w) = self.visibility.as_mut() {
            w.disconnect();
        }
        if let Some(w) = self.sizes.as_mut() {
            w.disconnect();
        }
        self.run_all_cleanups();
        if self.initialized {
            self.outputs_mut().push_event(EngineEvent::Destroyed);
        }
        self.initialized = false;
    }

    /// Public switch mirroring the motion-preference reaction: `false`
    /// pauses every keyframe-marked element, `true` resumes them.
    pub fn toggle_animations(&mut self, enabled: bool) {
        self.apply_motion_preference(!enabled);
    }

    // ---- plugin extension ----

    /// Register or overwrite a named plugin installer on this instance.
    pub fn register_plugin(&mut self, name: &str, installer: PluginInstaller) {
        self.plugins.register(name, installer);
    }

    /// Run a registered installer against this instance; unknown names are
    /// ignored.
    pub fn load_plugin(&mut self, name: &str) {
        let Some(installer) = self.plugins.get(name) else {
            debug!("unknown plugin '{name}' ignored");
            return;
        };
        installer(self);
    }

    pub(crate) fn enable_morphing(&mut self) {
        self.morphing = true;
    }

    #[inline]
    pub(crate) fn morphing_enabled(&self) -> bool {
        self.morphing
    }

    // ---- reactions (policy for watcher transitions) ----

    /// Visibility entry: resume the element's keyframe animation unless
    /// motion is reduced or the element has no animation marker.
    fn on_element_visible(&mut self, element: ElementId) {
        if self.reduce_motion {
            return;
        }
        let animated = self
            .store
            .get(element)
            .is_some_and(|e| matches!(e.enhancement(), Enhancement::Keyframe { .. }));
        if animated {
            self.set_style(element, "animation-play-state", "running");
        }
    }

    /// Size change: scale the font against the *current* computed size.
    /// Repeated firings inside the same band therefore compound; that
    /// matches the documented contract, see DESIGN.md.
    fn on_element_resized(&mut self, element: ElementId, width: f32) {
        let Some(el) = self.store.get(element) else {
            return;
        };
        let computed = el.computed_font_size();
        if width < self.cfg.narrow_width {
            let scaled = computed * self.cfg.narrow_scale;
            self.set_font_size(element, scaled);
        } else if width > self.cfg.wide_width {
            let scaled = computed * self.cfg.wide_scale;
            self.set_font_size(element, scaled);
        } else {
            if let Some(el) = self.store.get_mut(element) {
                el.clear_font_size_override();
            }
            self.clear_style(element, "font-size");
        }
    }

    fn set_font_size(&mut self, element: ElementId, size: f32) {
        if let Some(el) = self.store.get_mut(element) {
            el.set_font_size_override(size);
        }
        self.set_style(element, "font-size", &format!("{size}px"));
    }

    fn apply_scroll(&mut self, offset: f32) {
        self.scroll_offset = offset;
        let bindings: Vec<(ElementId, f32)> =
            self.parallax.iter().map(|(el, s)| (*el, *s)).collect();
        for (element, speed) in bindings {
            self.set_style(
                element,
                "transform",
                &format!("translateY({}px)", offset * speed),
            );
        }
    }

    fn apply_motion_preference(&mut self, reduce: bool) {
        self.reduce_motion = reduce;
        let state = if reduce { "paused" } else { "running" };
        let animated: Vec<ElementId> = self
            .store
            .iter()
            .filter(|e| matches!(e.enhancement(), Enhancement::Keyframe { .. }))
            .map(|e| e.id)
            .collect();
        for element in animated {
            self.set_style(element, "animation-play-state", state);
        }
        self.outputs_mut()
            .push_event(EngineEvent::AnimationsToggled { enabled: !reduce });
    }

    // ---- teardown execution ----

    fn run_all_cleanups(&mut self) {
        for (_element, teardown) in self.registry.take_all() {
            self.execute_teardown(teardown);
        }
    }

    fn execute_teardown(&mut self, teardown: Teardown) {
        match teardown {
            Teardown::ClearAnimation(el) => {
                self.clear_style(el, "animation");
                self.clear_style(el, "animation-play-state");
            }
            Teardown::DetachScroll(el) => {
                self.parallax.remove(&el);
                self.clear_style(el, "transform");
            }
            Teardown::CancelTask(task) => {
                self.tasks.cancel(task);
            }
        }
    }

    // ---- canonical mutations (mirrored into Outputs) ----

    pub(crate) fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(el) = self.store.get_mut(element) else {
            debug!("style write to unknown element {element:?} ignored");
            return;
        };
        el.style.set(property, value);
        self.outputs_mut().push_change(StyleChange {
            element,
            property: property.to_string(),
            value: Some(value.to_string()),
        });
    }

    pub(crate) fn clear_style(&mut self, element: ElementId, property: &str) {
        let removed = match self.store.get_mut(element) {
            Some(el) => el.style.remove(property),
            None => return,
        };
        if removed {
            self.outputs_mut().push_change(StyleChange {
                element,
                property: property.to_string(),
                value: None,
            });
        }
    }

    pub(crate) fn set_text(&mut self, element: ElementId, text: &str) {
        let Some(el) = self.store.get_mut(element) else {
            return;
        };
        el.text = text.to_string();
        self.outputs_mut().push_event(EngineEvent::TextChanged {
            element,
            text: text.to_string(),
        });
    }

    // ---- inspection (hosts, tooling, tests) ----

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    pub fn element_text(&self, id: ElementId) -> Option<&str> {
        self.store.get(id).map(|e| e.text.as_str())
    }

    pub fn element_style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.store.get(id).and_then(|e| e.style.get(property))
    }

    pub fn element_has_class(&self, id: ElementId, class: &str) -> bool {
        self.store.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn computed_font_size(&self, id: ElementId) -> Option<f32> {
        self.store.get(id).map(|e| e.computed_font_size())
    }

    pub fn registered_cleanups(&self) -> usize {
        self.registry.len()
    }

    pub fn scheduled_tasks(&self) -> usize {
        self.tasks.len()
    }

    // crate-internal access for the enhancer operations

    pub(crate) fn store(&self) -> &ElementStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut ElementStore {
        &mut self.store
    }

    pub(crate) fn registry_mut(&mut self) -> &mut CleanupRegistry {
        &mut self.registry
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut TaskQueue {
        &mut self.tasks
    }

    pub(crate) fn alloc_task(&mut self) -> crate::ids::TaskId {
        self.ids.alloc_task()
    }

    pub(crate) fn visibility_mut(&mut self) -> Option<&mut VisibilityWatcher> {
        self.visibility.as_mut()
    }

    pub(crate) fn parallax_mut(&mut self) -> &mut HashMap<ElementId, f32> {
        &mut self.parallax
    }

    pub(crate) fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Writable output buffer. Anything `update` already returned is dropped
    /// before the next write so the buffer only ever holds unconsumed output.
    pub(crate) fn outputs_mut(&mut self) -> &mut Outputs {
        if self.outputs_consumed {
            self.outputs.clear();
            self.outputs_consumed = false;
        }
        &mut self.outputs
    }
}
