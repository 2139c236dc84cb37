//! Error types shared by every constructor in the crate.

use thiserror::Error;

use super::types::NodeId;

/// Construction-time failures. Nothing in the per-frame path returns an error:
/// stale targets and out-of-range progress are absorbed there.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    /// Durations must be finite and strictly positive.
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f32),

    /// The oscillating curve needs at least one cycle.
    #[error("oscillation count must be at least 1")]
    ZeroOscillations,

    /// Shake, tumble and zoom move a node relative to its parent, so the root is off limits.
    #[error("{effect} cannot be applied to the scene root")]
    SceneRootTarget { effect: &'static str },

    /// Background color is a scene-level property.
    #[error("{effect} must target the scene root, got {node:?}")]
    NotSceneRoot { effect: &'static str, node: NodeId },

    /// The node was removed before the effect could read its starting state.
    #[error("node {0:?} is no longer in the scene")]
    StaleNode(NodeId),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FxError>;

/// Reject zero, negative, NaN and infinite durations.
pub(crate) fn check_duration(duration: f32) -> Result<f32> {
    if duration.is_finite() && duration > 0.0 {
        Ok(duration)
    } else {
        Err(FxError::InvalidDuration(duration))
    }
}
