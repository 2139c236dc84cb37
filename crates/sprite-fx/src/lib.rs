pub mod api;
pub mod core;
pub mod components;
pub mod math;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::FxConfig;
pub use api::error::{FxError, Result};
pub use api::types::{ActionId, NodeId};
pub use components::color::Color;
pub use components::node::Node;
pub use crate::core::scene::Scene;
pub use math::random::Rng;

pub use extensions::{
    Easing, Oscillation, TimingFunction, SharedTiming, FnCurve, shake, lerp, lerp_vec2,
    Effect, EffectKind,
    Action, ActionRunner,
    GlitchStyle, screen_shake, screen_tumble, screen_zoom, color_glitch,
};
