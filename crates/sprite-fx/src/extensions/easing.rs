// extensions/easing.rs
//
// Timing functions: pure curves mapping normalized time to eased progress.
// Penner's easing equations plus one decaying-sine factory for shake effects.
// No dependencies on Node/Scene; just math.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{FxError, Result};

/// Anything that maps normalized time `t` in [0, 1] to an eased value.
///
/// Implementations must be pure: the same `t` always yields the same value, so a
/// single curve can be shared by any number of effects at once.
pub trait TimingFunction: Send + Sync {
    fn apply(&self, t: f32) -> f32;
}

/// Shared, immutable timing function as stored by effects.
pub type SharedTiming = Arc<dyn TimingFunction>;

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity. The in/out/in-out variants of linear all coincide.
    #[default]
    #[serde(alias = "linear_in", alias = "linear_out", alias = "linear_in_out")]
    Linear,

    QuadIn,
    QuadOut,
    QuadInOut,

    CubicIn,
    CubicOut,
    CubicInOut,

    QuartIn,
    QuartOut,
    QuartInOut,

    QuintIn,
    QuintOut,
    QuintInOut,

    SineIn,
    SineOut,
    SineInOut,

    /// Quarter-circle arcs.
    CircIn,
    CircOut,
    CircInOut,

    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,

    /// Elastic spring: overshoots both ways before settling.
    ElasticIn,
    ElasticOut,
    ElasticInOut,

    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,

    /// Deeper overshoot driven by a half sine.
    ExtremeBackIn,
    ExtremeBackOut,
    ExtremeBackInOut,

    BounceIn,
    BounceOut,
    BounceInOut,

    /// `3t² - 2t³`.
    Smoothstep,
}

impl Easing {
    /// Every named curve, in declaration order.
    pub const ALL: [Easing; 35] = [
        Self::Linear,
        Self::QuadIn, Self::QuadOut, Self::QuadInOut,
        Self::CubicIn, Self::CubicOut, Self::CubicInOut,
        Self::QuartIn, Self::QuartOut, Self::QuartInOut,
        Self::QuintIn, Self::QuintOut, Self::QuintInOut,
        Self::SineIn, Self::SineOut, Self::SineInOut,
        Self::CircIn, Self::CircOut, Self::CircInOut,
        Self::ExpoIn, Self::ExpoOut, Self::ExpoInOut,
        Self::ElasticIn, Self::ElasticOut, Self::ElasticInOut,
        Self::BackIn, Self::BackOut, Self::BackInOut,
        Self::ExtremeBackIn, Self::ExtremeBackOut, Self::ExtremeBackInOut,
        Self::BounceIn, Self::BounceOut, Self::BounceInOut,
        Self::Smoothstep,
    ];

    /// Apply the easing function to a normalized time value `t`.
    /// Out-of-range input is clamped to [0, 1] first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let f = t - 1.0;
                    1.0 - 2.0 * f * f
                }
            }

            // Cubic
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 + (t - 1.0).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 + 4.0 * (t - 1.0).powi(3)
                }
            }

            // Quartic
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (t - 1.0).powi(4),
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - 8.0 * (t - 1.0).powi(4)
                }
            }

            // Quintic
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 + (t - 1.0).powi(5),
            Easing::QuintInOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 + 16.0 * (t - 1.0).powi(5)
                }
            }

            // Sine
            Easing::SineIn => ((t - 1.0) * PI / 2.0).sin() + 1.0,
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => 0.5 * (1.0 - (t * PI).cos()),

            // Circular
            Easing::CircIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::CircOut => ((2.0 - t) * t).max(0.0).sqrt(),
            Easing::CircInOut => {
                if t < 0.5 {
                    0.5 * (1.0 - (1.0 - 4.0 * t * t).max(0.0).sqrt())
                } else {
                    0.5 * (-4.0 * t * t + 8.0 * t - 3.0).max(0.0).sqrt() + 0.5
                }
            }

            // Exponential
            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * (t - 1.0)) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Easing::ExpoInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    0.5 * 2.0_f32.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2.0_f32.powf(-20.0 * t + 10.0)
                }
            }

            // Elastic
            Easing::ElasticIn => elastic_in(t),
            Easing::ElasticOut => {
                (-13.0 * PI / 2.0 * (t + 1.0)).sin() * 2.0_f32.powf(-10.0 * t) + 1.0
            }
            Easing::ElasticInOut => {
                if t < 0.5 {
                    0.5 * (13.0 * PI * t).sin() * 2.0_f32.powf(20.0 * t - 10.0)
                } else {
                    0.5 * (-13.0 * PI * t).sin() * 2.0_f32.powf(-20.0 * t + 10.0) + 1.0
                }
            }

            // Back (overshoot)
            Easing::BackIn => back_in(t),
            Easing::BackOut => 1.0 - back_in(1.0 - t),
            Easing::BackInOut => {
                if t < 0.5 {
                    0.5 * back_in(2.0 * t)
                } else {
                    1.0 - 0.5 * back_in(2.0 * (1.0 - t))
                }
            }

            // Extreme back
            Easing::ExtremeBackIn => extreme_back_in(t),
            Easing::ExtremeBackOut => 1.0 - extreme_back_in(1.0 - t),
            Easing::ExtremeBackInOut => {
                if t < 0.5 {
                    0.5 * extreme_back_in(2.0 * t)
                } else {
                    1.0 - 0.5 * extreme_back_in(2.0 * (1.0 - t))
                }
            }

            // Bounce
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    0.5 * (1.0 - bounce_out(1.0 - t * 2.0))
                } else {
                    0.5 * bounce_out(t * 2.0 - 1.0) + 0.5
                }
            }

            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Whether the curve leaves [0, 1] strictly between its endpoints.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Easing::ElasticIn
                | Easing::ElasticOut
                | Easing::ElasticInOut
                | Easing::BackIn
                | Easing::BackOut
                | Easing::BackInOut
                | Easing::ExtremeBackIn
                | Easing::ExtremeBackOut
                | Easing::ExtremeBackInOut
        )
    }

    /// Snake-case name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::QuartIn => "quart_in",
            Easing::QuartOut => "quart_out",
            Easing::QuartInOut => "quart_in_out",
            Easing::QuintIn => "quint_in",
            Easing::QuintOut => "quint_out",
            Easing::QuintInOut => "quint_in_out",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::SineInOut => "sine_in_out",
            Easing::CircIn => "circ_in",
            Easing::CircOut => "circ_out",
            Easing::CircInOut => "circ_in_out",
            Easing::ExpoIn => "expo_in",
            Easing::ExpoOut => "expo_out",
            Easing::ExpoInOut => "expo_in_out",
            Easing::ElasticIn => "elastic_in",
            Easing::ElasticOut => "elastic_out",
            Easing::ElasticInOut => "elastic_in_out",
            Easing::BackIn => "back_in",
            Easing::BackOut => "back_out",
            Easing::BackInOut => "back_in_out",
            Easing::ExtremeBackIn => "extreme_back_in",
            Easing::ExtremeBackOut => "extreme_back_out",
            Easing::ExtremeBackInOut => "extreme_back_in_out",
            Easing::BounceIn => "bounce_in",
            Easing::BounceOut => "bounce_out",
            Easing::BounceInOut => "bounce_in_out",
            Easing::Smoothstep => "smoothstep",
        }
    }

    /// Wrap the curve for storage in an effect.
    pub fn shared(self) -> SharedTiming {
        Arc::new(self)
    }
}

impl TimingFunction for Easing {
    #[inline]
    fn apply(&self, t: f32) -> f32 {
        Easing::apply(*self, t)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a curve name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEasing(pub String);

impl fmt::Display for UnknownEasing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing curve `{}`", self.0)
    }
}

impl std::error::Error for UnknownEasing {}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "linear_in" | "linear_out" | "linear_in_out" => Ok(Easing::Linear),
            _ => Easing::ALL
                .iter()
                .copied()
                .find(|e| e.name() == s)
                .ok_or_else(|| UnknownEasing(s.to_string())),
        }
    }
}

#[inline]
fn elastic_in(t: f32) -> f32 {
    (13.0 * PI / 2.0 * t).sin() * 2.0_f32.powf(10.0 * (t - 1.0))
}

#[inline]
fn back_in(t: f32) -> f32 {
    const S: f32 = 1.70158;
    ((S + 1.0) * t - S) * t * t
}

#[inline]
fn extreme_back_in(t: f32) -> f32 {
    (t * t - (t * PI).sin()) * t
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Oscillation ──────────────────────────────────────────────────────────

/// Decaying sine around 1: `-2^(-10t) · sin(2π · t · oscillations) + 1`.
///
/// Starts and ends at 1 and swings above and below it `oscillations` times with
/// shrinking amplitude. Used by the screen shake family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Oscillation {
    oscillations: u32,
}

impl Oscillation {
    /// Fails with [`FxError::ZeroOscillations`] when `oscillations` is 0.
    pub fn new(oscillations: u32) -> Result<Self> {
        if oscillations == 0 {
            return Err(FxError::ZeroOscillations);
        }
        Ok(Self { oscillations })
    }

    pub fn oscillations(&self) -> u32 {
        self.oscillations
    }

    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        -(2.0_f32.powf(-10.0 * t)) * (t * PI * self.oscillations as f32 * 2.0).sin() + 1.0
    }
}

impl TimingFunction for Oscillation {
    #[inline]
    fn apply(&self, t: f32) -> f32 {
        Oscillation::apply(self, t)
    }
}

impl TryFrom<u32> for Oscillation {
    type Error = FxError;

    fn try_from(value: u32) -> Result<Self> {
        Oscillation::new(value)
    }
}

impl From<Oscillation> for u32 {
    fn from(value: Oscillation) -> Self {
        value.oscillations
    }
}

/// Oscillating curve factory. Around 10 oscillations gives a pleasing decay.
pub fn shake(oscillations: u32) -> Result<Oscillation> {
    Oscillation::new(oscillations)
}

// ── Custom curves ────────────────────────────────────────────────────────

/// Adapter turning any pure closure into a [`TimingFunction`].
#[derive(Clone, Copy)]
pub struct FnCurve<F>(pub F);

impl<F> TimingFunction for FnCurve<F>
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    #[inline]
    fn apply(&self, t: f32) -> f32 {
        (self.0)(t)
    }
}

impl<F> fmt::Debug for FnCurve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnCurve(..)")
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}
