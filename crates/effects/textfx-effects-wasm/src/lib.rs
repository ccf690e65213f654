use js_sys::JSON;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use textfx_effects_core::{
    parse_document_json, AnimationParams, EffectParams, ElementId, ElementSpec, Engine,
    EngineConfig, Inputs, Outputs, BASELINE_STYLESHEET,
};

#[wasm_bindgen]
pub struct TextfxEngine {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[wasm_bindgen]
impl TextfxEngine {
    /// Create a new engine instance. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new TextfxEngine({ typewriter_interval: 0.05 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TextfxEngine, JsError> {
        console_error_panic_hook::set_once();

        let cfg: EngineConfig = if jsvalue_is_undefined_or_null(&config) {
            EngineConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(TextfxEngine {
            core: Engine::new(cfg),
        })
    }

    /// Load a stored document JSON (object with an `elements` array) into the
    /// engine. Returns the ElementIds (u32) in document order.
    #[wasm_bindgen(js_name = load_document)]
    pub fn load_document(&mut self, doc_json: JsValue) -> Result<Vec<u32>, JsError> {
        if jsvalue_is_undefined_or_null(&doc_json) {
            return Err(JsError::new("load_document: doc_json is null/undefined"));
        }
        // Stringify the JS object so we can reuse the core parser (expects &str)
        let s = JSON::stringify(&doc_json)
            .map_err(|e| JsError::new(&format!("load_document stringify error: {e:?}")))?
            .as_string()
            .ok_or_else(|| JsError::new("load_document: stringify produced non-string"))?;
        let specs = parse_document_json(&s)
            .map_err(|e| JsError::new(&format!("load_document parse error: {e}")))?;
        Ok(self.core.load_document(specs).iter().map(|id| id.0).collect())
    }

    /// Register an element record (JSON matching ElementSpec) without
    /// enhancing it. Returns an ElementId (u32).
    #[wasm_bindgen(js_name = register_element)]
    pub fn register_element(&mut self, spec: JsValue) -> Result<u32, JsError> {
        let spec_rs: ElementSpec = if jsvalue_is_undefined_or_null(&spec) {
            ElementSpec::default()
        } else {
            swb::from_value(spec).map_err(|e| JsError::new(&format!("element spec error: {e}")))?
        };
        Ok(self.core.register_element(spec_rs).0)
    }

    /// Register an element record and enhance it immediately. Returns an
    /// ElementId (u32).
    #[wasm_bindgen(js_name = create_text_element)]
    pub fn create_text_element(&mut self, spec: JsValue) -> Result<u32, JsError> {
        let spec_rs: ElementSpec = if jsvalue_is_undefined_or_null(&spec) {
            ElementSpec::default()
        } else {
            swb::from_value(spec).map_err(|e| JsError::new(&format!("element spec error: {e}")))?
        };
        Ok(self.core.create_text_element(spec_rs).0)
    }

    /// Initialize the engine: emits the baseline stylesheet, builds the
    /// watchers, and enhances every marker-bearing element. Idempotent.
    #[wasm_bindgen]
    pub fn init(&mut self) {
        self.core.init();
    }

    /// Step the engine by dt (seconds) with host events JSON. Returns
    /// Outputs JSON (style changes plus semantic events).
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out: &Outputs = self.core.update(dt, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Tear down: disconnect watchers and run every registered cleanup.
    /// Safe to call repeatedly.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        self.core.destroy();
    }

    /// Enhance a registered element according to its markers.
    #[wasm_bindgen]
    pub fn enhance(&mut self, element: u32) {
        self.core.enhance(ElementId(element));
    }

    /// Apply a named catalog effect ("3d", "neon", "outline", "gradient",
    /// "shadow"). `params` is optional JSON matching EffectParams; unknown
    /// effect names are ignored.
    #[wasm_bindgen(js_name = apply_text_effect)]
    pub fn apply_text_effect(
        &mut self,
        element: u32,
        name: String,
        params: JsValue,
    ) -> Result<(), JsError> {
        let params_rs: EffectParams = if jsvalue_is_undefined_or_null(&params) {
            EffectParams::default()
        } else {
            swb::from_value(params)
                .map_err(|e| JsError::new(&format!("effect params error: {e}")))?
        };
        self.core
            .apply_text_effect(ElementId(element), &name, &params_rs);
        Ok(())
    }

    /// Start a keyframe animation on an element. `params` is optional JSON
    /// matching AnimationParams.
    #[wasm_bindgen(js_name = animate_text)]
    pub fn animate_text(
        &mut self,
        element: u32,
        animation: String,
        params: JsValue,
    ) -> Result<(), JsError> {
        let params_rs: AnimationParams = if jsvalue_is_undefined_or_null(&params) {
            AnimationParams::default()
        } else {
            swb::from_value(params)
                .map_err(|e| JsError::new(&format!("animation params error: {e}")))?
        };
        self.core
            .animate_text(ElementId(element), &animation, &params_rs);
        Ok(())
    }

    /// Pause (false) or resume (true) every keyframe-marked element.
    #[wasm_bindgen(js_name = toggle_animations)]
    pub fn toggle_animations(&mut self, enabled: bool) {
        self.core.toggle_animations(enabled);
    }

    /// Run a registered plugin installer; unknown names are ignored.
    /// The built-in "morphing" plugin enables `morph_shapes`.
    #[wasm_bindgen(js_name = load_plugin)]
    pub fn load_plugin(&mut self, name: String) {
        self.core.load_plugin(&name);
    }

    /// Cycle an element's clip shape among named shapes ("circle", "square",
    /// "triangle") at `interval` seconds. Requires the morphing plugin.
    #[wasm_bindgen(js_name = morph_shapes)]
    pub fn morph_shapes(
        &mut self,
        element: u32,
        shapes: JsValue,
        interval: f32,
    ) -> Result<(), JsError> {
        let names: Vec<String> =
            swb::from_value(shapes).map_err(|e| JsError::new(&format!("shapes error: {e}")))?;
        self.core.morph_shapes(ElementId(element), &names, interval);
        Ok(())
    }

    // ---- inspection ----

    #[wasm_bindgen(js_name = is_initialized)]
    pub fn is_initialized(&self) -> bool {
        self.core.is_initialized()
    }

    #[wasm_bindgen(js_name = element_text)]
    pub fn element_text(&self, element: u32) -> Option<String> {
        self.core
            .element_text(ElementId(element))
            .map(str::to_string)
    }

    #[wasm_bindgen(js_name = element_style)]
    pub fn element_style(&self, element: u32, property: String) -> Option<String> {
        self.core
            .element_style(ElementId(element), &property)
            .map(str::to_string)
    }

    #[wasm_bindgen(js_name = computed_font_size)]
    pub fn computed_font_size(&self, element: u32) -> Option<f32> {
        self.core.computed_font_size(ElementId(element))
    }
}

/// The baseline presentational rules the host should inject once, exposed
/// for hosts that want the CSS before calling init.
#[wasm_bindgen]
pub fn baseline_stylesheet() -> String {
    BASELINE_STYLESHEET.to_string()
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
