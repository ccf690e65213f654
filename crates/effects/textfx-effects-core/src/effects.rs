//! Effect catalog: pure functions computing style patches for each named
//! visual effect. These constants are the single source of effect defaults;
//! anything needing a default value should use them, not a hardcoded number.

use serde::{Deserialize, Serialize};

use crate::color::adjust_color;
use crate::style::StylePatch;

/// Default parameter values for the catalog.
pub mod defaults {
    /// Base text color when an effect needs one and the caller omits it.
    pub const BASE_COLOR: &str = "#333333";
    /// Number of stacked shadow layers for the 3D effect.
    pub const DEPTH_3D: u32 = 5;
    /// Fixed blue used by the neon glow when no color is given.
    pub const NEON_COLOR: &str = "#00aaff";
    pub const NEON_INTENSITY: f32 = 1.0;
    /// Glow radii multiplied by intensity, innermost first.
    pub const NEON_RADII: [f32; 5] = [5.0, 10.0, 15.0, 20.0, 25.0];
    pub const OUTLINE_WIDTH: &str = "1px";
    pub const GRADIENT: &str = "linear-gradient(45deg, #ff6b6b, #4ecdc4)";
    pub const SHADOW_BLUR: f32 = 4.0;
    pub const SHADOW_COLOR: &str = "rgba(0,0,0,0.35)";
    pub const SHADOW_OFFSET_X: f32 = 2.0;
    pub const SHADOW_OFFSET_Y: f32 = 2.0;
}

/// Optional parameters accepted by every catalog entry; each effect reads
/// the fields it understands and defaults the rest.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectParams {
    pub color: Option<String>,
    pub depth: Option<u32>,
    pub intensity: Option<f32>,
    pub width: Option<String>,
    pub gradient: Option<String>,
    pub blur: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
}

/// The fixed set of named text effects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TextEffect {
    ThreeD,
    Neon,
    Outline,
    Gradient,
    Shadow,
}

impl TextEffect {
    /// Look up an effect by its public name. Unknown names yield None so the
    /// caller can degrade to a no-op.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "3d" => Some(TextEffect::ThreeD),
            "neon" => Some(TextEffect::Neon),
            "outline" => Some(TextEffect::Outline),
            "gradient" => Some(TextEffect::Gradient),
            "shadow" => Some(TextEffect::Shadow),
            _ => None,
        }
    }
}

/// Compute the style patch for a named effect, or None for an unknown name.
pub fn effect_patch(name: &str, params: &EffectParams) -> Option<StylePatch> {
    TextEffect::from_name(name).map(|effect| match effect {
        TextEffect::ThreeD => three_d_patch(params),
        TextEffect::Neon => neon_patch(params),
        TextEffect::Outline => outline_patch(params),
        TextEffect::Gradient => {
            gradient_patch(params.gradient.as_deref().unwrap_or(defaults::GRADIENT))
        }
        TextEffect::Shadow => shadow_patch(params),
    })
}

/// Stacked-shadow 3D: layer i (1..=depth) offset i px down, progressively
/// darkened from the base color.
fn three_d_patch(params: &EffectParams) -> StylePatch {
    let depth = params.depth.unwrap_or(defaults::DEPTH_3D).max(1);
    let color = params.color.as_deref().unwrap_or(defaults::BASE_COLOR);
    let layers: Vec<String> = (1..=depth)
        .map(|i| format!("0 {i}px 0 {}", adjust_color(color, -10 * i as i32)))
        .collect();
    StylePatch::new()
        .set("color", color)
        .set("text-shadow", layers.join(", "))
}

/// Neon glow: white text over five shadow layers; the two innermost layers
/// stay white, the outer three take the glow color.
fn neon_patch(params: &EffectParams) -> StylePatch {
    let color = params.color.as_deref().unwrap_or(defaults::NEON_COLOR);
    let intensity = params.intensity.unwrap_or(defaults::NEON_INTENSITY);
    let layers: Vec<String> = defaults::NEON_RADII
        .iter()
        .enumerate()
        .map(|(i, radius)| {
            let layer_color = if i < 2 { "#ffffff" } else { color };
            format!("0 0 {}px {layer_color}", radius * intensity)
        })
        .collect();
    StylePatch::new()
        .set("color", "#ffffff")
        .set("text-shadow", layers.join(", "))
}

fn outline_patch(params: &EffectParams) -> StylePatch {
    let width = params.width.as_deref().unwrap_or(defaults::OUTLINE_WIDTH);
    let color = params.color.as_deref().unwrap_or(defaults::BASE_COLOR);
    StylePatch::new()
        .set("-webkit-text-stroke", format!("{width} {color}"))
        .set("color", "transparent")
}

/// Gradient fill via background-clip-to-text. Shared by the declarative
/// gradient marker and the public effect dispatcher so both paths produce
/// identical style.
pub(crate) fn gradient_patch(spec: &str) -> StylePatch {
    StylePatch::new()
        .set("background-image", spec)
        .set("-webkit-background-clip", "text")
        .set("background-clip", "text")
        .set("color", "transparent")
}

fn shadow_patch(params: &EffectParams) -> StylePatch {
    let blur = params.blur.unwrap_or(defaults::SHADOW_BLUR);
    let color = params.color.as_deref().unwrap_or(defaults::SHADOW_COLOR);
    let x = params.offset_x.unwrap_or(defaults::SHADOW_OFFSET_X);
    let y = params.offset_y.unwrap_or(defaults::SHADOW_OFFSET_Y);
    StylePatch::new().set("text-shadow", format!("{x}px {y}px {blur}px {color}"))
}
