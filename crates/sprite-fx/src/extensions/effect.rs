// extensions/effect.rs
//
// Effects: per-node interpolators driven by a timing function.
//
// An effect is a pure function of normalized progress `t`: the scheduler owns the
// clock and calls `update(t, scene)` once per frame. Time tracking lives in
// `action.rs`.

use std::fmt;

use glam::Vec2;

use crate::api::error::{check_duration, Result};
use crate::api::types::NodeId;
use crate::core::scene::Scene;
use super::easing::{lerp, lerp_vec2, SharedTiming};

/// Which property an effect animates, with its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Animate Node.position
    Move { start: Vec2, end: Vec2 },
    /// Animate Node.scale (non-uniform)
    Scale { start: Vec2, end: Vec2 },
    /// Animate Node.rotation. The raw difference `end - start` is used,
    /// so callers choose the direction of travel.
    Rotate { start: f32, end: f32 },
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Move { .. } => "move",
            EffectKind::Scale { .. } => "scale",
            EffectKind::Rotate { .. } => "rotate",
        }
    }
}

/// Where a progress value lands on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Weight {
    Start,
    End,
    Eased(f32),
}

/// A single-use interpolator bound to one node and one property.
pub struct Effect {
    node: NodeId,
    duration: f32,
    timing: SharedTiming,
    kind: EffectKind,
}

impl Effect {
    /// Fails when `duration` is not a positive, finite number of seconds.
    pub fn new(node: NodeId, duration: f32, kind: EffectKind, timing: SharedTiming) -> Result<Self> {
        let duration = check_duration(duration)?;
        Ok(Self { node, duration, timing, kind })
    }

    /// Create a position effect.
    pub fn move_between(
        node: NodeId,
        duration: f32,
        start: Vec2,
        end: Vec2,
        timing: SharedTiming,
    ) -> Result<Self> {
        Self::new(node, duration, EffectKind::Move { start, end }, timing)
    }

    /// Create a scale effect.
    pub fn scale_between(
        node: NodeId,
        duration: f32,
        start: Vec2,
        end: Vec2,
        timing: SharedTiming,
    ) -> Result<Self> {
        Self::new(node, duration, EffectKind::Scale { start, end }, timing)
    }

    /// Create a rotation effect; angles in radians.
    pub fn rotate_between(
        node: NodeId,
        duration: f32,
        start: f32,
        end: f32,
        timing: SharedTiming,
    ) -> Result<Self> {
        Self::new(node, duration, EffectKind::Rotate { start, end }, timing)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// `t <= 0` and `t >= 1` pin the exact bounds; only the interior goes
    /// through the curve, so overshooting curves still land on the end value.
    fn weight(&self, t: f32) -> Weight {
        if t.is_nan() || t <= 0.0 {
            Weight::Start
        } else if t >= 1.0 {
            Weight::End
        } else {
            Weight::Eased(self.timing.apply(t))
        }
    }

    /// Write the interpolated value for progress `t` onto the target node.
    /// A node that has left the scene is skipped silently.
    pub fn update(&self, t: f32, scene: &mut Scene) {
        let Some(node) = scene.get_mut(self.node) else {
            log::trace!("{} effect skipped: node {:?} is gone", self.kind.label(), self.node);
            return;
        };
        let weight = self.weight(t);

        match self.kind {
            EffectKind::Move { start, end } => {
                node.position = blend(start, end, weight, lerp_vec2);
            }
            EffectKind::Scale { start, end } => {
                node.scale = blend(start, end, weight, lerp_vec2);
            }
            EffectKind::Rotate { start, end } => {
                node.rotation = blend(start, end, weight, lerp);
            }
        }
    }
}

#[inline]
fn blend<T: Copy>(start: T, end: T, weight: Weight, lerp: fn(T, T, f32) -> T) -> T {
    match weight {
        Weight::Start => start,
        Weight::End => end,
        Weight::Eased(w) => lerp(start, end, w),
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("node", &self.node)
            .field("duration", &self.duration)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::FxError;
    use crate::components::node::Node;
    use crate::extensions::easing::{shake, Easing};
    use std::sync::Arc;

    fn scene_with_node() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let id = scene.spawn(scene.root(), Node::new()).unwrap();
        (scene, id)
    }

    #[test]
    fn endpoints_are_exact_for_every_curve() {
        let (mut scene, id) = scene_with_node();
        let start = Vec2::new(0.1, 7.3);
        let end = Vec2::new(-33.7, 0.9);

        let mut curves: Vec<SharedTiming> = Easing::ALL.iter().map(|e| e.shared()).collect();
        curves.push(Arc::new(shake(10).unwrap()));

        for timing in curves {
            let mv = Effect::move_between(id, 1.0, start, end, timing.clone()).unwrap();
            let sc = Effect::scale_between(id, 1.0, start, end, timing.clone()).unwrap();
            let rot = Effect::rotate_between(id, 1.0, 0.3, -2.1, timing).unwrap();

            for (t, pos, angle) in [(0.0, start, 0.3), (1.0, end, -2.1)] {
                mv.update(t, &mut scene);
                sc.update(t, &mut scene);
                rot.update(t, &mut scene);
                let node = scene.get(id).unwrap();
                assert_eq!(node.position, pos);
                assert_eq!(node.scale, pos);
                assert_eq!(node.rotation, angle);
            }
        }
    }

    #[test]
    fn linear_midpoint() {
        let (mut scene, id) = scene_with_node();
        let timing = Easing::Linear.shared();

        Effect::move_between(id, 2.0, Vec2::new(10.0, 20.0), Vec2::new(30.0, 60.0), timing.clone())
            .unwrap()
            .update(0.5, &mut scene);
        Effect::scale_between(id, 2.0, Vec2::ONE, Vec2::new(2.0, 3.0), timing.clone())
            .unwrap()
            .update(0.5, &mut scene);
        Effect::rotate_between(id, 2.0, 0.0, 1.0, timing)
            .unwrap()
            .update(0.5, &mut scene);

        let node = scene.get(id).unwrap();
        assert_eq!(node.position, Vec2::new(20.0, 40.0));
        assert_eq!(node.scale, Vec2::new(1.5, 2.0));
        assert_eq!(node.rotation, 0.5);
    }

    #[test]
    fn interior_follows_curve() {
        let (mut scene, id) = scene_with_node();
        let effect = Effect::move_between(
            id,
            1.0,
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            Easing::QuadIn.shared(),
        )
        .unwrap();
        effect.update(0.5, &mut scene);
        assert!((scene.get(id).unwrap().position.x - 25.0).abs() < 1e-4);
    }

    #[test]
    fn rotation_uses_raw_difference() {
        let (mut scene, id) = scene_with_node();
        let effect = Effect::rotate_between(id, 1.0, 3.0, -3.0, Easing::Linear.shared()).unwrap();
        effect.update(0.25, &mut scene);
        // Travels through zero rather than across the ±π seam.
        assert!((scene.get(id).unwrap().rotation - 1.5).abs() < 1e-6);
    }

    #[test]
    fn stale_target_is_a_no_op() {
        let (mut scene, id) = scene_with_node();
        let effect = Effect::move_between(
            id,
            1.0,
            Vec2::ZERO,
            Vec2::new(50.0, 50.0),
            Easing::Linear.shared(),
        )
        .unwrap();

        scene.remove_from_parent(id);
        let before = scene.len();
        effect.update(0.5, &mut scene);
        assert_eq!(scene.len(), before);
        assert!(scene.get(id).is_none());
    }

    #[test]
    fn rejects_bad_durations() {
        let (_, id) = scene_with_node();
        for duration in [0.0, -0.5, f32::NAN] {
            let result = Effect::move_between(id, duration, Vec2::ZERO, Vec2::ONE, Easing::Linear.shared());
            assert!(matches!(result, Err(FxError::InvalidDuration(_))));
        }
    }

    #[test]
    fn out_of_range_progress_is_pinned() {
        let (mut scene, id) = scene_with_node();
        let effect = Effect::move_between(
            id,
            1.0,
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Easing::BackOut.shared(),
        )
        .unwrap();
        effect.update(1.7, &mut scene);
        assert_eq!(scene.get(id).unwrap().position, Vec2::new(10.0, 0.0));
        effect.update(-0.2, &mut scene);
        assert_eq!(scene.get(id).unwrap().position, Vec2::ZERO);
    }
}
