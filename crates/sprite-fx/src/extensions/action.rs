// extensions/action.rs
//
// Action system: schedulable units that run against a node, frame by frame.
// Effects plug in through an adapter that turns elapsed time into progress.
//
// Usage:
//   let mut runner = ActionRunner::new();
//   runner.add(node, Action::sequence(vec![Action::wait(0.5), effect_action]));
//   runner.tick(dt, &mut scene);  // Advances all actions, updates nodes

use std::fmt;

use glam::Vec2;

use crate::api::error::{check_duration, Result};
use crate::api::types::{ActionId, NodeId};
use crate::core::scene::Scene;
use super::easing::SharedTiming;
use super::effect::Effect;

/// One-shot callback.
pub type RunBlock = Box<dyn FnOnce(&mut Scene)>;

/// Per-frame callback receiving the target node and the elapsed seconds.
pub type CustomBlock = Box<dyn FnMut(&mut Scene, NodeId, f32)>;

enum ActionKind {
    Effect { effect: Effect, elapsed: f32 },
    Custom { duration: f32, elapsed: f32, block: CustomBlock },
    Wait { duration: f32, elapsed: f32 },
    Run(Option<RunBlock>),
    RemoveFromParent,
    Sequence { actions: Vec<Action>, index: usize },
    Group { actions: Vec<Action>, leftover: Vec<Option<f32>> },
}

/// A schedulable unit of animation.
///
/// Actions are single-use: once finished they stay finished.
pub struct Action {
    kind: ActionKind,
}

impl Action {
    fn from_kind(kind: ActionKind) -> Self {
        Self { kind }
    }

    /// Drive an effect for its duration.
    pub fn effect(effect: Effect) -> Self {
        Self::from_kind(ActionKind::Effect { effect, elapsed: 0.0 })
    }

    /// Call `block` every frame for `duration` seconds, and once more at the end
    /// with the elapsed time equal to `duration`.
    pub fn custom<F>(duration: f32, block: F) -> Self
    where
        F: FnMut(&mut Scene, NodeId, f32) + 'static,
    {
        Self::from_kind(ActionKind::Custom {
            duration: duration.max(0.0),
            elapsed: 0.0,
            block: Box::new(block),
        })
    }

    /// Do nothing for `duration` seconds.
    pub fn wait(duration: f32) -> Self {
        Self::from_kind(ActionKind::Wait { duration: duration.max(0.0), elapsed: 0.0 })
    }

    /// Run `block` once, instantly.
    pub fn run<F>(block: F) -> Self
    where
        F: FnOnce(&mut Scene) + 'static,
    {
        Self::from_kind(ActionKind::Run(Some(Box::new(block))))
    }

    /// Remove the target node (and its subtree) from the scene.
    pub fn remove_from_parent() -> Self {
        Self::from_kind(ActionKind::RemoveFromParent)
    }

    /// Run actions one after another.
    pub fn sequence(actions: Vec<Action>) -> Self {
        Self::from_kind(ActionKind::Sequence { actions, index: 0 })
    }

    /// Run actions side by side; finishes with the slowest one.
    pub fn group(actions: Vec<Action>) -> Self {
        let leftover = vec![None; actions.len()];
        Self::from_kind(ActionKind::Group { actions, leftover })
    }

    // -- Conveniences --

    /// Perform `action` after `delay` seconds.
    pub fn after_delay(delay: f32, action: Action) -> Self {
        Self::sequence(vec![Self::wait(delay), action])
    }

    /// Run `block` after `delay` seconds.
    pub fn after_delay_run<F>(delay: f32, block: F) -> Self
    where
        F: FnOnce(&mut Scene) + 'static,
    {
        Self::after_delay(delay, Self::run(block))
    }

    /// Remove the target node after `delay` seconds.
    pub fn remove_from_parent_after_delay(delay: f32) -> Self {
        Self::after_delay(delay, Self::remove_from_parent())
    }

    /// Parabolic hop of `height` above `origin`, landing back on it.
    pub fn jump_to_height(height: f32, duration: f32, origin: Vec2) -> Result<Self> {
        let duration = check_duration(duration)?;
        Ok(Self::custom(duration, move |scene, node, elapsed| {
            let fraction = elapsed / duration;
            let offset = height * 4.0 * fraction * (1.0 - fraction);
            if let Some(n) = scene.get_mut(node) {
                n.position = Vec2::new(origin.x, origin.y + offset);
            }
        }))
    }

    /// Position effect wrapped as an action.
    pub fn move_effect(
        node: NodeId,
        duration: f32,
        start: Vec2,
        end: Vec2,
        timing: SharedTiming,
    ) -> Result<Self> {
        Effect::move_between(node, duration, start, end, timing).map(Self::effect)
    }

    /// Scale effect wrapped as an action.
    pub fn scale_effect(
        node: NodeId,
        duration: f32,
        start: Vec2,
        end: Vec2,
        timing: SharedTiming,
    ) -> Result<Self> {
        Effect::scale_between(node, duration, start, end, timing).map(Self::effect)
    }

    /// Rotation effect wrapped as an action.
    pub fn rotate_effect(
        node: NodeId,
        duration: f32,
        start: f32,
        end: f32,
        timing: SharedTiming,
    ) -> Result<Self> {
        Effect::rotate_between(node, duration, start, end, timing).map(Self::effect)
    }

    /// Total running time in seconds, assuming nothing is cut short.
    pub fn duration(&self) -> f32 {
        match &self.kind {
            ActionKind::Effect { effect, .. } => effect.duration(),
            ActionKind::Custom { duration, .. } | ActionKind::Wait { duration, .. } => *duration,
            ActionKind::Run(_) | ActionKind::RemoveFromParent => 0.0,
            ActionKind::Sequence { actions, .. } => actions.iter().map(Action::duration).sum(),
            ActionKind::Group { actions, .. } => {
                actions.iter().map(Action::duration).fold(0.0, f32::max)
            }
        }
    }

    /// Advance by `dt` seconds against `node`.
    ///
    /// Returns `Some(leftover)` once finished, where `leftover` is the part of `dt`
    /// the action did not need. Sequences hand it to their next child.
    pub fn step(&mut self, dt: f32, node: NodeId, scene: &mut Scene) -> Option<f32> {
        match &mut self.kind {
            ActionKind::Effect { effect, elapsed } => {
                *elapsed += dt;
                let duration = effect.duration();
                let t = (*elapsed / duration).clamp(0.0, 1.0);
                effect.update(t, scene);
                finished(*elapsed, duration)
            }
            ActionKind::Custom { duration, elapsed, block } => {
                *elapsed += dt;
                block(scene, node, elapsed.min(*duration));
                finished(*elapsed, *duration)
            }
            ActionKind::Wait { duration, elapsed } => {
                *elapsed += dt;
                finished(*elapsed, *duration)
            }
            ActionKind::Run(block) => {
                if let Some(block) = block.take() {
                    block(scene);
                }
                Some(dt)
            }
            ActionKind::RemoveFromParent => {
                scene.remove_from_parent(node);
                Some(dt)
            }
            ActionKind::Sequence { actions, index } => {
                let mut remaining = dt;
                while *index < actions.len() {
                    if !scene.contains(node) {
                        log::debug!("sequence stopped: node {:?} left the scene", node);
                        *index = actions.len();
                        break;
                    }
                    match actions[*index].step(remaining, node, scene) {
                        Some(left) => {
                            *index += 1;
                            remaining = left;
                        }
                        None => return None,
                    }
                }
                Some(remaining)
            }
            ActionKind::Group { actions, leftover } => {
                for (action, left) in actions.iter_mut().zip(leftover.iter_mut()) {
                    if left.is_none() {
                        *left = action.step(dt, node, scene);
                    }
                }
                if leftover.iter().all(Option::is_some) {
                    Some(leftover.iter().flatten().copied().fold(dt, f32::min))
                } else {
                    None
                }
            }
        }
    }
}

#[inline]
fn finished(elapsed: f32, duration: f32) -> Option<f32> {
    if elapsed >= duration {
        Some(elapsed - duration)
    } else {
        None
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::Effect { effect, elapsed } => f
                .debug_struct("Effect")
                .field("effect", effect)
                .field("elapsed", elapsed)
                .finish(),
            ActionKind::Custom { duration, elapsed, .. } => f
                .debug_struct("Custom")
                .field("duration", duration)
                .field("elapsed", elapsed)
                .finish_non_exhaustive(),
            ActionKind::Wait { duration, elapsed } => f
                .debug_struct("Wait")
                .field("duration", duration)
                .field("elapsed", elapsed)
                .finish(),
            ActionKind::Run(block) => f.debug_tuple("Run").field(&block.is_some()).finish(),
            ActionKind::RemoveFromParent => f.write_str("RemoveFromParent"),
            ActionKind::Sequence { actions, index } => f
                .debug_struct("Sequence")
                .field("actions", actions)
                .field("index", index)
                .finish(),
            ActionKind::Group { actions, .. } => {
                f.debug_struct("Group").field("actions", actions).finish_non_exhaustive()
            }
        }
    }
}

struct Running {
    id: ActionId,
    node: NodeId,
    action: Action,
    playing: bool,
}

/// Manages all running actions.
///
/// Actions are stepped in the order they were added, so when two of them write
/// the same property in one frame the later one wins.
#[derive(Default)]
pub struct ActionRunner {
    running: Vec<Running>,
    next_id: u32,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `action` on `node`. Returns a handle for later control.
    pub fn add(&mut self, node: NodeId, action: Action) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.running.push(Running { id, node, action, playing: true });
        id
    }

    /// Stop an action by handle.
    pub fn remove(&mut self, id: ActionId) -> bool {
        let before = self.running.len();
        self.running.retain(|r| r.id != id);
        self.running.len() != before
    }

    /// Stop all actions on a node.
    pub fn remove_node(&mut self, node: NodeId) {
        self.running.retain(|r| r.node != node);
    }

    /// Pause an action.
    pub fn pause(&mut self, id: ActionId) {
        if let Some(r) = self.running.iter_mut().find(|r| r.id == id) {
            r.playing = false;
        }
    }

    /// Resume a paused action.
    pub fn resume(&mut self, id: ActionId) {
        if let Some(r) = self.running.iter_mut().find(|r| r.id == id) {
            r.playing = true;
        }
    }

    /// Whether any action is still bound to `node`.
    pub fn has_actions(&self, node: NodeId) -> bool {
        self.running.iter().any(|r| r.node == node)
    }

    /// Advance all actions by `dt` seconds.
    /// Returns the number of actions that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut completed = 0;

        self.running.retain_mut(|r| {
            if !scene.contains(r.node) {
                log::debug!("dropping action {:?}: node {:?} left the scene", r.id, r.node);
                return false;
            }
            if !r.playing {
                return true;
            }
            match r.action.step(dt, r.node, scene) {
                Some(_) => {
                    completed += 1;
                    false
                }
                None => true,
            }
        });

        completed
    }

    /// Number of running actions.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether there are no running actions.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Stop everything.
    pub fn clear(&mut self) {
        self.running.clear();
    }
}

impl fmt::Debug for ActionRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRunner")
            .field("running", &self.running.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
