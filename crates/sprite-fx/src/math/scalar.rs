use std::f32::consts::{PI, TAU};

/// Converts an angle in degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    PI * degrees / 180.0
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Clamp `value` between two bounds given in either order.
#[inline]
pub fn clamped(value: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    value.clamp(lo, hi)
}

/// 1.0 for zero and positive values, -1.0 otherwise.
#[inline]
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

/// Signed turn from `from` to `to` that never goes the long way round.
pub fn shortest_angle_between(from: f32, to: f32) -> f32 {
    let mut angle = (to - from) % TAU;
    if angle >= PI {
        angle -= TAU;
    }
    if angle <= -PI {
        angle += TAU;
    }
    angle
}
