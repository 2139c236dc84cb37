use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::random::Rng;

/// Linear RGBA color, each channel in [0, 1].
/// `#[repr(C)]` so a background color can be uploaded as a clear value as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 0-255 channel values.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 1.0)
    }

    /// 0-255 channels plus alpha in [0, 1].
    pub fn from_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Opaque color with every channel drawn from `rng`.
    pub fn random(rng: &mut Rng) -> Self {
        Self::from_rgb(
            rng.int_below(256) as u8,
            rng.int_below(256) as u8,
            rng.int_below(256) as u8,
        )
    }

    /// Component-wise blend, `t = 0` gives `self`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// RGB complement, alpha untouched.
    pub fn inverted(self) -> Color {
        Color {
            r: 1.0 - self.r,
            g: 1.0 - self.g,
            b: 1.0 - self.b,
            a: self.a,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
