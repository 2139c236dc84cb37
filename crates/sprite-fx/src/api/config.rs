use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{check_duration, FxError, Result};
use crate::api::types::NodeId;
use crate::components::color::Color;
use crate::core::scene::Scene;
use crate::extensions::action::Action;
use crate::extensions::screen::{color_glitch, screen_shake, screen_tumble, screen_zoom, GlitchStyle};

/// Tuning for the screen effects, usually loaded from a JSON file.
/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Oscillations for shake and zoom (default: 10).
    pub oscillations: u32,
    /// Shake length in seconds (default: 3.0).
    pub shake_duration: f32,
    /// Zoom factor per axis (default: 1.02).
    pub zoom_amount: Vec2,
    /// Zoom length in seconds (default: 3.0).
    pub zoom_duration: f32,
    /// Oscillations for tumble (default: 1).
    pub tumble_oscillations: u32,
    /// Tumble length in seconds (default: 1.0).
    pub tumble_duration: f32,
    /// Glitch length in seconds (default: 0.1).
    pub glitch_duration: f32,
    pub glitch_style: GlitchStyle,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            oscillations: 10,
            shake_duration: 3.0,
            zoom_amount: Vec2::splat(1.02),
            zoom_duration: 3.0,
            tumble_oscillations: 1,
            tumble_duration: 1.0,
            glitch_duration: 0.1,
            glitch_style: GlitchStyle::Invert,
        }
    }
}

impl FxConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every value before any effect is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.oscillations == 0 || self.tumble_oscillations == 0 {
            return Err(FxError::ZeroOscillations);
        }
        for (name, value) in [
            ("shake_duration", self.shake_duration),
            ("zoom_duration", self.zoom_duration),
            ("tumble_duration", self.tumble_duration),
            ("glitch_duration", self.glitch_duration),
        ] {
            check_duration(value).map_err(|e| FxError::InvalidConfig(format!("{name}: {e}")))?;
        }
        if !self.zoom_amount.is_finite() {
            return Err(FxError::InvalidConfig(format!(
                "zoom_amount must be finite, got {}",
                self.zoom_amount
            )));
        }
        Ok(())
    }

    /// Screen shake by `amount` with the configured oscillations and duration.
    pub fn shake(&self, scene: &Scene, node: NodeId, amount: Vec2) -> Result<Action> {
        screen_shake(scene, node, amount, self.oscillations, self.shake_duration)
    }

    /// Screen zoom by the configured amount.
    pub fn zoom(&self, scene: &Scene, node: NodeId) -> Result<Action> {
        screen_zoom(scene, node, self.zoom_amount, self.oscillations, self.zoom_duration)
    }

    /// Screen tumble by `angle` radians.
    pub fn tumble(&self, scene: &Scene, node: NodeId, angle: f32) -> Result<Action> {
        screen_tumble(scene, node, angle, self.tumble_oscillations, self.tumble_duration)
    }

    /// Color glitch on the scene root, restoring `original`.
    pub fn glitch(&self, scene: &Scene, original: Color) -> Result<Action> {
        color_glitch(scene, scene.root(), original, self.glitch_style, self.glitch_duration)
    }
}
