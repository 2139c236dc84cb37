use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A scene node: name plus a local transform relative to its parent.
/// Tree links live in the [`Scene`](crate::core::scene::Scene), not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Name for finding nodes with `Scene::find_by_name`.
    pub name: String,
    /// Position relative to the parent.
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
    /// Non-uniform scale factor.
    pub scale: Vec2,
}

impl Node {
    /// A node at the origin with unit scale.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Turn towards the heading of `velocity`, assuming rotation 0 faces up.
    ///
    /// `rate` in (0, 1] is the fraction of the remaining turn taken this call;
    /// 1.0 snaps instantly. The turn always takes the short way round.
    pub fn rotate_to_velocity(&mut self, velocity: Vec2, rate: f32) {
        if velocity == Vec2::ZERO {
            return;
        }
        let target = velocity.y.atan2(velocity.x) - FRAC_PI_2;

        if target - self.rotation > PI {
            self.rotation += TAU;
        } else if self.rotation - target > PI {
            self.rotation -= TAU;
        }

        self.rotation += (target - self.rotation) * rate;
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
