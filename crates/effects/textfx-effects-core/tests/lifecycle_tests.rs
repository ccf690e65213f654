use std::rc::Rc;

use textfx_effects_core::{
    morphing_plugin, parse_document_json, EffectParams, ElementId, ElementSpec, Engine,
    EngineConfig, EngineEvent, HostEvent, Inputs, Rect, MORPHING_PLUGIN,
};

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

fn spec(json: &str) -> ElementSpec {
    serde_json::from_str(json).unwrap()
}

fn approx(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-3, "expected {b}, got {a}");
}

/// it should build the watcher pair exactly once across repeated init calls
#[test]
fn init_is_idempotent() {
    let mut eng = engine();
    eng.init();
    eng.init();
    eng.init();
    assert!(eng.is_initialized());
    assert_eq!(eng.watchers_built(), 1);
}

/// it should emit the baseline stylesheet once at init
#[test]
fn init_emits_baseline_stylesheet() {
    let mut eng = engine();
    eng.init();
    let out = eng.update(0.0, Inputs::default());
    let sheets: Vec<&String> = out
        .events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::StylesheetReady { css } => Some(css),
            _ => None,
        })
        .collect();
    assert_eq!(sheets.len(), 1);
    assert!(sheets[0].contains("animation-play-state:paused"));
    assert!(sheets[0].contains(".tfx-enhanced"));
}

/// it should give the declarative gradient marker and the effect call identical style
#[test]
fn gradient_marker_matches_effect_call() {
    let gradient = "linear-gradient(90deg, #ff0000, #0000ff)";
    let mut eng = engine();
    let marked = eng.register_element(spec(
        r#"{"tag":"h2","attributes":{"data-tfx-gradient":"linear-gradient(90deg, #ff0000, #0000ff)"}}"#,
    ));
    let plain = eng.register_element(spec(r#"{"tag":"h2"}"#));
    eng.init();
    let params = EffectParams {
        gradient: Some(gradient.to_string()),
        ..Default::default()
    };
    eng.apply_text_effect(plain, "gradient", &params);

    for property in [
        "background-image",
        "-webkit-background-clip",
        "background-clip",
        "color",
    ] {
        assert_eq!(
            eng.element_style(marked, property),
            eng.element_style(plain, property),
            "property '{property}' diverged"
        );
    }
    assert_eq!(eng.element_style(marked, "background-image"), Some(gradient));
}

/// it should register, enhance, and style an element in one create call
#[test]
fn create_text_element_enhances_in_one_call() {
    let mut eng = engine();
    let id = eng.create_text_element(spec(
        r#"{"tag":"h1","text":"Hi","attributes":{"data-tfx-gradient":"linear-gradient(0deg, #111111, #eeeeee)"}}"#,
    ));
    assert_eq!(eng.element_text(id), Some("Hi"));
    assert_eq!(eng.element_style(id, "color"), Some("transparent"));
    assert_eq!(
        eng.element_style(id, "background-image"),
        Some("linear-gradient(0deg, #111111, #eeeeee)")
    );
    assert!(eng.element_has_class(id, "tfx-enhanced"));

    let out = eng.update(0.0, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::ElementEnhanced { element } if *element == id)));
}

/// it should ignore unknown effect names and unknown element ids
#[test]
fn unknown_effect_and_element_are_ignored() {
    let mut eng = engine();
    let id = eng.register_element(ElementSpec::default());
    eng.apply_text_effect(id, "sparkle", &EffectParams::default());
    assert!(eng.element_style(id, "text-shadow").is_none());
    eng.apply_text_effect(ElementId(999), "neon", &EffectParams::default());
    eng.enhance(ElementId(999));
}

/// it should skip every animated treatment when motion is reduced
#[test]
fn reduced_motion_blocks_animation_setup() {
    let cfg = EngineConfig {
        reduce_motion: true,
        ..Default::default()
    };
    let mut eng = Engine::new(cfg);
    let typed = eng.register_element(spec(
        r#"{"tag":"p","classes":["tfx-typewriter"],"text":"keep me"}"#,
    ));
    let keyframed =
        eng.register_element(spec(r#"{"tag":"p","attributes":{"data-tfx-animate":"fade-in"}}"#));
    eng.init();

    assert_eq!(eng.element_text(typed), Some("keep me"));
    assert_eq!(eng.scheduled_tasks(), 0);
    assert!(eng.element_style(keyframed, "animation").is_none());

    eng.animate_text(keyframed, "pulse", &Default::default());
    assert!(eng.element_style(keyframed, "animation").is_none());
    assert_eq!(eng.registered_cleanups(), 0);
}

/// it should pause and resume keyframe animations with the motion preference
#[test]
fn motion_preference_toggles_play_state() {
    let mut eng = engine();
    let id =
        eng.register_element(spec(r#"{"tag":"div","attributes":{"data-tfx-animate":"fade-up"}}"#));
    eng.init();

    let toggled_off = eng
        .update(0.0, Inputs::event(HostEvent::MotionPreference { reduce: true }))
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::AnimationsToggled { enabled: false }));
    assert!(toggled_off);
    assert!(eng.reduce_motion());
    assert_eq!(eng.element_style(id, "animation-play-state"), Some("paused"));

    eng.toggle_animations(true);
    assert!(!eng.reduce_motion());
    assert_eq!(eng.element_style(id, "animation-play-state"), Some("running"));
}

/// it should compound font scaling against the current computed size
#[test]
fn responsive_scaling_compounds() {
    let mut eng = engine();
    let id = eng.register_element(spec(
        r#"{"tag":"div","classes":["tfx-responsive"],"font_size":16.0}"#,
    ));
    eng.init();

    eng.update(
        0.0,
        Inputs::event(HostEvent::Resize {
            element: id,
            width: 300.0,
            height: 40.0,
        }),
    );
    approx(eng.computed_font_size(id).unwrap(), 12.8);

    // The box reflows after the shrink, so the watcher fires again at the
    // same width and the scale compounds.
    eng.update(
        0.0,
        Inputs::event(HostEvent::Resize {
            element: id,
            width: 300.0,
            height: 32.0,
        }),
    );
    approx(eng.computed_font_size(id).unwrap(), 10.24);

    eng.update(
        0.0,
        Inputs::event(HostEvent::Resize {
            element: id,
            width: 800.0,
            height: 30.0,
        }),
    );
    approx(eng.computed_font_size(id).unwrap(), 16.0);
    assert!(eng.element_style(id, "font-size").is_none());

    eng.update(
        0.0,
        Inputs::event(HostEvent::Resize {
            element: id,
            width: 1300.0,
            height: 30.0,
        }),
    );
    approx(eng.computed_font_size(id).unwrap(), 19.2);
}

/// it should keep only the most recent cleanup registered per element
#[test]
fn cleanup_registry_keeps_latest() {
    let mut eng = engine();
    let id = eng.register_element(ElementSpec::default());
    eng.init();

    eng.animate_text(id, "pulse", &Default::default());
    assert_eq!(eng.registered_cleanups(), 1);
    eng.setup_parallax_effect(id, 1.0);
    assert_eq!(eng.registered_cleanups(), 1);

    eng.destroy();
    // The scroll detach replaced the animation teardown, so the animation
    // property survives while the transform is cleared.
    assert!(eng.element_style(id, "animation").is_some());
    assert!(eng.element_style(id, "transform").is_none());
}

/// it should run every cleanup exactly once and survive repeated destroy calls
#[test]
fn destroy_is_idempotent_and_exhaustive() {
    let mut eng = engine();
    let typed = eng.create_text_element(spec(
        r#"{"tag":"h1","classes":["tfx-typewriter"],"text":"reveal"}"#,
    ));
    let drifter = eng.register_element(spec(r#"{"tag":"p","classes":["tfx-parallax"]}"#));
    let animated = eng.register_element(ElementSpec::default());
    eng.init();
    eng.animate_text(animated, "pulse", &Default::default());
    assert_eq!(eng.registered_cleanups(), 3);
    assert_eq!(eng.scheduled_tasks(), 1);

    eng.destroy();
    assert_eq!(eng.registered_cleanups(), 0);
    assert_eq!(eng.scheduled_tasks(), 0);
    assert!(eng.element_style(drifter, "transform").is_none());
    assert!(eng.element_style(animated, "animation").is_none());
    assert!(!eng.is_initialized());

    eng.destroy();
    let out = eng.update(0.0, Inputs::default());
    let destroyed = out
        .events
        .iter()
        .filter(|e| matches!(e, EngineEvent::Destroyed))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(eng.element_text(typed), Some(""));
}

/// it should reveal text one character per interval and report completion
#[test]
fn typewriter_reveals_text_then_finishes() {
    let mut eng = engine();
    let id = eng.create_text_element(spec(
        r#"{"tag":"h1","classes":["tfx-typewriter"],"text":"Hi!"}"#,
    ));
    assert_eq!(eng.element_text(id), Some(""));
    assert_eq!(eng.scheduled_tasks(), 1);
    assert_eq!(eng.registered_cleanups(), 1);

    eng.update(0.1, Inputs::default());
    assert_eq!(eng.element_text(id), Some("H"));
    eng.update(0.1, Inputs::default());
    assert_eq!(eng.element_text(id), Some("Hi"));
    let finished = eng
        .update(0.1, Inputs::default())
        .events
        .iter()
        .any(|e| matches!(e, EngineEvent::TypewriterFinished { element } if *element == id));
    assert!(finished);
    assert_eq!(eng.element_text(id), Some("Hi!"));
    assert_eq!(eng.scheduled_tasks(), 0);
    assert_eq!(eng.registered_cleanups(), 0);
}

/// it should halt a mid-flight typewriter reveal on destroy
#[test]
fn destroy_halts_typewriter() {
    let mut eng = engine();
    let id = eng.create_text_element(spec(
        r#"{"tag":"h1","classes":["tfx-typewriter"],"text":"Hi!"}"#,
    ));
    eng.update(0.1, Inputs::default());
    assert_eq!(eng.element_text(id), Some("H"));

    eng.destroy();
    assert_eq!(eng.scheduled_tasks(), 0);
    eng.update(0.5, Inputs::default());
    assert_eq!(eng.element_text(id), Some("H"));
}

/// it should translate parallax elements by scroll offset times speed
#[test]
fn parallax_tracks_scroll() {
    let mut eng = engine();
    let id = eng.register_element(spec(
        r#"{"tag":"p","classes":["tfx-parallax"],"attributes":{"data-tfx-speed":"2"}}"#,
    ));
    eng.init();
    assert_eq!(eng.element_style(id, "transform"), Some("translateY(0px)"));

    eng.update(0.0, Inputs::event(HostEvent::Scroll { offset: 100.0 }));
    assert_eq!(eng.element_style(id, "transform"), Some("translateY(200px)"));

    eng.destroy();
    assert!(eng.element_style(id, "transform").is_none());
}

/// it should resume a keyframe animation only on the visibility entry edge
#[test]
fn visibility_entry_resumes_keyframe_animation() {
    let mut eng = engine();
    let id = eng.register_element(spec(
        r#"{"tag":"div","attributes":{"data-tfx-animate":"fade-in","data-tfx-duration":"1.2s","data-tfx-delay":"0.3s"}}"#,
    ));
    eng.init();
    assert_eq!(
        eng.element_style(id, "animation"),
        Some("fade-in 1.2s ease 0.3s both")
    );

    let visible = HostEvent::Visibility {
        element: id,
        bounds: Rect::new(0.0, 0.0, 100.0, 20.0),
        viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
    };
    eng.update(0.0, Inputs::event(visible.clone()));
    assert_eq!(
        eng.element_style(id, "animation-play-state"),
        Some("running")
    );

    // Staying visible is not an entry; nothing new is emitted.
    let out = eng.update(0.0, Inputs::event(visible));
    assert!(out.changes.is_empty());
}

/// it should observe keyframe elements enhanced before init
#[test]
fn preinit_keyframe_element_resumes_on_visibility() {
    let mut eng = engine();
    let id = eng.create_text_element(spec(
        r#"{"tag":"div","attributes":{"data-tfx-animate":"fade-in"}}"#,
    ));
    eng.init();

    let visible = HostEvent::Visibility {
        element: id,
        bounds: Rect::new(0.0, 0.0, 100.0, 20.0),
        viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
    };
    eng.update(0.0, Inputs::event(visible.clone()));
    assert_eq!(
        eng.element_style(id, "animation-play-state"),
        Some("running")
    );

    // A destroy/init cycle rebuilds the watcher; the element is swept back
    // into observation even though it stays enhanced.
    eng.destroy();
    eng.init();
    let resumed = eng
        .update(0.0, Inputs::event(visible))
        .changes
        .iter()
        .any(|c| {
            c.element == id
                && c.property == "animation-play-state"
                && c.value.as_deref() == Some("running")
        });
    assert!(resumed);
}

/// it should gate shape morphing behind the plugin and cycle the clip path
#[test]
fn morphing_plugin_gates_and_cycles() {
    let mut eng = engine();
    let id = eng.register_element(ElementSpec::default());
    let shapes = vec!["circle".to_string(), "square".to_string()];

    eng.morph_shapes(id, &shapes, 0.5);
    assert_eq!(eng.scheduled_tasks(), 0);

    eng.load_plugin(MORPHING_PLUGIN);
    eng.morph_shapes(id, &shapes, 0.5);
    assert_eq!(eng.scheduled_tasks(), 1);

    eng.update(0.5, Inputs::default());
    assert_eq!(
        eng.element_style(id, "clip-path"),
        Some("circle(50% at 50% 50%)")
    );
    eng.update(0.5, Inputs::default());
    assert_eq!(eng.element_style(id, "clip-path"), Some("inset(0%)"));
    eng.update(0.5, Inputs::default());
    assert_eq!(
        eng.element_style(id, "clip-path"),
        Some("circle(50% at 50% 50%)")
    );

    eng.destroy();
    assert_eq!(eng.scheduled_tasks(), 0);
}

/// it should overwrite same-named plugins and ignore unknown ones
#[test]
fn plugin_registration_overwrites() {
    let mut eng = engine();
    let id = eng.register_element(ElementSpec::default());
    eng.load_plugin("nonexistent");

    eng.register_plugin("custom", Rc::new(|_: &mut Engine| {}));
    eng.register_plugin("custom", morphing_plugin());
    eng.load_plugin("custom");

    eng.morph_shapes(id, &["circle".to_string()], 1.0);
    assert_eq!(eng.scheduled_tasks(), 1);
}

/// it should enhance a loaded document end to end
#[test]
fn loads_document_fixture_end_to_end() {
    let json = textfx_test_fixtures::documents::json("landing").unwrap();
    let specs = parse_document_json(&json).unwrap();
    let mut eng = engine();
    let ids = eng.load_document(specs);
    assert_eq!(ids.len(), 4);
    eng.init();

    // Typewriter headline cleared and scheduled.
    assert_eq!(eng.element_text(ids[0]), Some(""));
    assert_eq!(eng.scheduled_tasks(), 1);

    // Parallax subtitle bound to the scroll position.
    assert_eq!(eng.element_style(ids[1], "transform"), Some("translateY(0px)"));

    // Gradient headline clipped to its gradient.
    assert_eq!(
        eng.element_style(ids[2], "background-image"),
        Some("linear-gradient(90deg, #ff0000, #0000ff)")
    );

    // Animated card: explicit duration, default delay, and wide scaling.
    assert_eq!(
        eng.element_style(ids[3], "animation"),
        Some("fade-up 1.2s ease 0s both")
    );
    eng.update(
        0.0,
        Inputs::event(HostEvent::Resize {
            element: ids[3],
            width: 1300.0,
            height: 60.0,
        }),
    );
    approx(eng.computed_font_size(ids[3]).unwrap(), 21.6);
}

/// it should resolve multiple markers on one element by priority
#[test]
fn marker_priority_resolves_multiple() {
    let json = textfx_test_fixtures::documents::json("showcase").unwrap();
    let specs = parse_document_json(&json).unwrap();
    let mut eng = engine();
    let ids = eng.load_document(specs);
    eng.init();

    // Unmarked elements stay untouched.
    assert!(!eng.element_has_class(ids[0], "tfx-enhanced"));
    assert_eq!(eng.element_text(ids[0]), Some("plain copy with no markers"));

    // Responsive-only elements are enhanced without any effect style.
    assert!(eng.element_has_class(ids[1], "tfx-enhanced"));
    assert!(eng.element_style(ids[1], "transform").is_none());

    // Typewriter outranks parallax and gradient on the multi-marked element.
    assert_eq!(eng.element_text(ids[2]), Some(""));
    assert_eq!(eng.scheduled_tasks(), 1);
    assert!(eng.element_style(ids[2], "transform").is_none());
    assert!(eng.element_style(ids[2], "background-image").is_none());
}
