//! Small numeric helpers that sit next to the effect system: angle and
//! clamping utilities plus a deterministic random source.

pub mod random;
pub mod scalar;

pub use random::Rng;
pub use scalar::{
    clamped, degrees_to_radians, radians_to_degrees, shortest_angle_between, sign,
};
