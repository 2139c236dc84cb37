// extensions/screen.rs
//
// Composite screen effects: shake, tumble, zoom and color glitch.
//
// Each factory snapshots the node's current state, builds an effect driven by
// the oscillation curve and appends a reset step, so the node always ends up
// exactly where it started.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::{check_duration, FxError, Result};
use crate::api::types::NodeId;
use crate::components::color::Color;
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::math::random::Rng;
use super::action::Action;
use super::easing::{shake, Easing, SharedTiming};
use super::effect::Effect;

/// How the color glitch picks its flash color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlitchStyle {
    /// Flash to a fixed color, then ease back.
    Flash(Color),
    /// Flash to the complement of the original color, then ease back.
    #[default]
    Invert,
    /// A fresh random color every frame.
    Noise { seed: u64 },
}

/// Validate the shared preconditions of shake, tumble and zoom.
fn prepare<'a>(
    scene: &'a Scene,
    node: NodeId,
    oscillations: u32,
    duration: f32,
    effect: &'static str,
) -> Result<(&'a Node, SharedTiming)> {
    check_duration(duration)?;
    let curve = shake(oscillations)?;
    if scene.is_root(node) {
        return Err(FxError::SceneRootTarget { effect });
    }
    let target = scene.get(node).ok_or(FxError::StaleNode(node))?;
    log::debug!("{effect} on {node:?}: {oscillations} oscillations over {duration}s");
    Ok((target, Arc::new(curve)))
}

/// Shake `node` by `amount`, settling back on its current position.
///
/// Apply it to a layer node, never to the scene root.
/// Around 10 oscillations works well; shorter durations feel punchier.
pub fn screen_shake(
    scene: &Scene,
    node: NodeId,
    amount: Vec2,
    oscillations: u32,
    duration: f32,
) -> Result<Action> {
    let (target, timing) = prepare(scene, node, oscillations, duration, "screen shake")?;
    let origin = target.position;

    let effect = Effect::move_between(node, duration, origin + amount, origin, timing)?;
    Ok(Action::sequence(vec![
        Action::effect(effect),
        Action::run(move |scene| {
            if let Some(n) = scene.get_mut(node) {
                n.position = origin;
            }
        }),
    ]))
}

/// Rock `node` by `angle` radians around its anchor.
///
/// Usually applied to a pivot node centered in the scene.
pub fn screen_tumble(
    scene: &Scene,
    node: NodeId,
    angle: f32,
    oscillations: u32,
    duration: f32,
) -> Result<Action> {
    let (target, timing) = prepare(scene, node, oscillations, duration, "screen tumble")?;
    let origin = target.rotation;

    let effect = Effect::rotate_between(node, duration, origin + angle, origin, timing)?;
    Ok(Action::sequence(vec![
        Action::effect(effect),
        Action::run(move |scene| {
            if let Some(n) = scene.get_mut(node) {
                n.rotation = origin;
            }
        }),
    ]))
}

/// Pump the scale of `node` by the factor `amount` and let it wobble back.
pub fn screen_zoom(
    scene: &Scene,
    node: NodeId,
    amount: Vec2,
    oscillations: u32,
    duration: f32,
) -> Result<Action> {
    let (target, timing) = prepare(scene, node, oscillations, duration, "screen zoom")?;
    let origin = target.scale;

    let effect = Effect::scale_between(node, duration, origin * amount, origin, timing)?;
    Ok(Action::sequence(vec![
        Action::effect(effect),
        Action::run(move |scene| {
            if let Some(n) = scene.get_mut(node) {
                n.scale = origin;
            }
        }),
    ]))
}

/// Flash the scene background for `duration` seconds, ending on `original`.
///
/// `target` must be the scene root: background color belongs to the scene.
pub fn color_glitch(
    scene: &Scene,
    target: NodeId,
    original: Color,
    style: GlitchStyle,
    duration: f32,
) -> Result<Action> {
    let duration = check_duration(duration)?;
    if !scene.is_root(target) {
        return Err(FxError::NotSceneRoot { effect: "color glitch", node: target });
    }
    log::debug!("color glitch: {style:?} over {duration}s");

    let flash = match style {
        GlitchStyle::Flash(color) => color,
        GlitchStyle::Invert | GlitchStyle::Noise { .. } => original.inverted(),
    };
    let mut noise = match style {
        GlitchStyle::Noise { seed } => Some(Rng::new(seed)),
        _ => None,
    };

    Ok(Action::custom(duration, move |scene, _, elapsed| {
        if elapsed >= duration {
            scene.set_background(original);
            return;
        }
        let color = match noise.as_mut() {
            Some(rng) => Color::random(rng),
            None => flash.lerp(original, Easing::QuadOut.apply(elapsed / duration)),
        };
        scene.set_background(color);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::action::ActionRunner;

    const FRAME: f32 = 1.0 / 60.0;

    fn layer_at(scene: &mut Scene, node: Node) -> NodeId {
        scene.spawn(scene.root(), node).unwrap()
    }

    /// Tick until the runner drains, with a hard cap so a bug cannot hang the test.
    fn run_to_end(runner: &mut ActionRunner, scene: &mut Scene) {
        for _ in 0..10_000 {
            if runner.is_empty() {
                return;
            }
            runner.tick(FRAME, scene);
        }
        panic!("actions never finished");
    }

    #[test]
    fn shake_departs_then_reverts_exactly() {
        let mut scene = Scene::new();
        let layer = layer_at(&mut scene, Node::new().with_position(Vec2::new(100.0, 100.0)));
        let action = screen_shake(&scene, layer, Vec2::new(20.0, 0.0), 10, 0.4).unwrap();

        let mut runner = ActionRunner::new();
        runner.add(layer, action);

        // First swing peaks a quarter of the way through the first cycle.
        runner.tick(0.01, &mut scene);
        let x = scene.get(layer).unwrap().position.x;
        assert!((x - 100.0).abs() > 1.0, "x was {x}");

        let mut max_offset: f32 = 0.0;
        for _ in 0..100 {
            if runner.is_empty() {
                break;
            }
            runner.tick(FRAME, &mut scene);
            max_offset = max_offset.max((scene.get(layer).unwrap().position.x - 100.0).abs());
        }
        run_to_end(&mut runner, &mut scene);

        assert!(max_offset > 0.0);
        assert_eq!(scene.get(layer).unwrap().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn zoom_overshoots_then_reverts() {
        let mut scene = Scene::new();
        let pivot = layer_at(&mut scene, Node::new());
        let action = screen_zoom(&scene, pivot, Vec2::splat(1.2), 10, 0.4).unwrap();

        let mut runner = ActionRunner::new();
        runner.add(pivot, action);

        runner.tick(0.01, &mut scene);
        let scale = scene.get(pivot).unwrap().scale;
        assert!(scale.x > 1.0 && scale.y > 1.0, "scale was {scale}");

        run_to_end(&mut runner, &mut scene);
        assert_eq!(scene.get(pivot).unwrap().scale, Vec2::ONE);
    }

    #[test]
    fn tumble_rocks_then_reverts() {
        let mut scene = Scene::new();
        let pivot = layer_at(&mut scene, Node::new().with_rotation(0.3));
        let action = screen_tumble(&scene, pivot, 10.0_f32.to_radians(), 1, 1.0).unwrap();

        let mut runner = ActionRunner::new();
        runner.add(pivot, action);

        runner.tick(0.2, &mut scene);
        assert!(scene.get(pivot).unwrap().rotation > 0.3);

        run_to_end(&mut runner, &mut scene);
        assert_eq!(scene.get(pivot).unwrap().rotation, 0.3);
    }

    #[test]
    fn shake_family_rejects_scene_root() {
        let scene = Scene::new();
        let root = scene.root();
        assert_eq!(
            screen_shake(&scene, root, Vec2::ONE, 10, 0.4).unwrap_err(),
            FxError::SceneRootTarget { effect: "screen shake" }
        );
        assert!(matches!(
            screen_tumble(&scene, root, 0.1, 10, 0.4),
            Err(FxError::SceneRootTarget { .. })
        ));
        assert!(matches!(
            screen_zoom(&scene, root, Vec2::ONE, 10, 0.4),
            Err(FxError::SceneRootTarget { .. })
        ));
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let mut scene = Scene::new();
        let layer = layer_at(&mut scene, Node::new());

        for duration in [0.0, -1.0] {
            assert_eq!(
                screen_shake(&scene, layer, Vec2::ONE, 10, duration).unwrap_err(),
                FxError::InvalidDuration(duration)
            );
            assert!(color_glitch(&scene, scene.root(), Color::BLACK, GlitchStyle::Invert, duration)
                .is_err());
        }
        assert_eq!(
            screen_zoom(&scene, layer, Vec2::ONE, 0, 0.4).unwrap_err(),
            FxError::ZeroOscillations
        );
    }

    #[test]
    fn stale_node_is_reported() {
        let mut scene = Scene::new();
        let layer = layer_at(&mut scene, Node::new());
        scene.remove_from_parent(layer);
        assert_eq!(
            screen_shake(&scene, layer, Vec2::ONE, 10, 0.4).unwrap_err(),
            FxError::StaleNode(layer)
        );
    }

    #[test]
    fn shake_on_removed_node_stops_quietly() {
        let mut scene = Scene::new();
        let layer = layer_at(&mut scene, Node::new());
        let mut runner = ActionRunner::new();
        runner.add(layer, screen_shake(&scene, layer, Vec2::ONE, 10, 0.4).unwrap());

        runner.tick(FRAME, &mut scene);
        scene.remove_from_parent(layer);
        runner.tick(FRAME, &mut scene);
        assert!(runner.is_empty());
    }

    #[test]
    fn glitch_requires_scene_root() {
        let mut scene = Scene::new();
        let layer = layer_at(&mut scene, Node::new());
        assert_eq!(
            color_glitch(&scene, layer, Color::BLACK, GlitchStyle::Invert, 0.1).unwrap_err(),
            FxError::NotSceneRoot { effect: "color glitch", node: layer }
        );
    }

    #[test]
    fn glitch_flashes_then_restores() {
        let original = Color::from_rgb(8, 57, 71);
        for style in [
            GlitchStyle::Flash(Color::WHITE),
            GlitchStyle::Invert,
            GlitchStyle::Noise { seed: 11 },
        ] {
            let mut scene = Scene::new().with_background(original);
            let root = scene.root();
            let mut runner = ActionRunner::new();
            runner.add(root, color_glitch(&scene, root, original, style, 0.4).unwrap());

            runner.tick(0.01, &mut scene);
            assert_ne!(scene.background(), original, "{style:?} did not flash");

            run_to_end(&mut runner, &mut scene);
            assert_eq!(scene.background(), original);
        }
    }

    #[test]
    fn flash_starts_near_flash_color() {
        let original = Color::BLACK;
        let mut scene = Scene::new();
        let root = scene.root();
        let mut action =
            color_glitch(&scene, root, original, GlitchStyle::Flash(Color::RED), 1.0).unwrap();

        action.step(0.001, root, &mut scene);
        let bg = scene.background();
        assert!(bg.r > 0.99 && bg.g < 0.01, "background was {bg:?}");
    }
}
