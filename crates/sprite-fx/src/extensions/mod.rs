// extensions/mod.rs
//
// The animation layers, bottom-up: timing curves, per-node effects, the action
// scheduler that drives them, and the self-reverting screen effects on top.

pub mod action;
pub mod easing;
pub mod effect;
pub mod screen;

pub use action::{Action, ActionRunner, CustomBlock, RunBlock};
pub use easing::{
    lerp, lerp_vec2, shake, Easing, FnCurve, Oscillation, SharedTiming,
    TimingFunction, UnknownEasing,
};
pub use effect::{Effect, EffectKind};
pub use screen::{color_glitch, screen_shake, screen_tumble, screen_zoom, GlitchStyle};
