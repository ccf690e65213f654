//! Core configuration for textfx-effects-core.

use serde::{Deserialize, Serialize};

/// Engine tuning knobs and marker defaults.
/// Hosts usually keep the defaults; every field is overridable for tests
/// and embedding scenarios.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum visible fraction before the visibility watcher reports entry.
    pub visibility_threshold: f32,
    /// Proximity margin (device-independent px) expanding the watched region.
    pub visibility_margin: f32,
    /// Seconds between typewriter character reveals.
    pub typewriter_interval: f32,
    /// Container width below which fonts scale down.
    pub narrow_width: f32,
    /// Container width above which fonts scale up.
    pub wide_width: f32,
    pub narrow_scale: f32,
    pub wide_scale: f32,
    /// Default keyframe animation duration when the marker omits one.
    pub default_duration: String,
    /// Default keyframe animation delay when the marker omits one.
    pub default_delay: String,
    pub default_parallax_speed: f32,
    /// Initial motion-preference query result supplied by the host.
    pub reduce_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.1,
            visibility_margin: 50.0,
            typewriter_interval: 0.1,
            narrow_width: 400.0,
            wide_width: 1200.0,
            narrow_scale: 0.8,
            wide_scale: 1.2,
            default_duration: "0.8s".to_string(),
            default_delay: "0s".to_string(),
            default_parallax_speed: 0.5,
            reduce_motion: false,
        }
    }
}
