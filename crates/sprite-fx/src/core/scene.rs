use glam::Vec2;
use slotmap::SlotMap;

use crate::api::error::{FxError, Result};
use crate::api::types::NodeId;
use crate::components::color::Color;
use crate::components::node::Node;

/// Node plus its place in the tree.
#[derive(Debug, Clone)]
struct Slot {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Slot {
    fn new(node: Node, parent: Option<NodeId>) -> Self {
        Self {
            node,
            parent,
            children: Vec::new(),
        }
    }
}

/// Node tree with a single root and a scene-level background color.
///
/// Nodes are stored in a generational slot map, so a [`NodeId`] kept by an effect
/// goes stale instead of dangling once its node is removed.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<NodeId, Slot>,
    root: NodeId,
    background: Color,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Slot::new(Node::new().with_name("scene"), None));
        Self {
            nodes,
            root,
            background: Color::BLACK,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// The scene node itself.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// Whether `id` still refers to a node in this scene.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Add `node` as the last (frontmost) child of `parent`.
    pub fn spawn(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(FxError::StaleNode(parent));
        }
        let id = self.nodes.insert(Slot::new(node, Some(parent)));
        if let Some(slot) = self.nodes.get_mut(parent) {
            slot.children.push(id);
        }
        Ok(id)
    }

    /// Remove a node and its whole subtree. Every handle into the subtree goes stale.
    /// Returns the removed node itself.
    pub fn remove_from_parent(&mut self, id: NodeId) -> Option<Node> {
        if self.is_root(id) {
            log::warn!("ignoring attempt to remove the scene root");
            return None;
        }
        let parent = self.nodes.get(id)?.parent;
        if let Some(parent_slot) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_slot.children.retain(|&c| c != id);
        }

        let mut pending = vec![id];
        let mut removed = None;
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.nodes.remove(next) {
                pending.extend(slot.children);
                if next == id {
                    removed = Some(slot.node);
                }
            }
        }
        removed
    }

    /// Make a node the frontmost child of its parent.
    pub fn bring_to_front(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else { return };
        if let Some(slot) = self.nodes.get_mut(parent) {
            slot.children.retain(|&c| c != id);
            slot.children.push(id);
        }
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|s| &s.node)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).map(|s| &mut s.node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|s| s.parent)
    }

    /// Children back to front.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(id).map(|s| s.children.as_slice())
    }

    /// Find the first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, s)| s.node.name == name)
            .map(|(id, _)| id)
    }

    /// World position, rotation and scale of a node, composed through its ancestors.
    pub fn world_transform(&self, id: NodeId) -> Option<(Vec2, f32, Vec2)> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let slot = self.nodes.get(current)?;
            chain.push(current);
            cursor = slot.parent;
        }

        let mut pos = Vec2::ZERO;
        let mut rot = 0.0_f32;
        let mut scale = Vec2::ONE;
        for &node_id in chain.iter().rev() {
            let local = &self.nodes.get(node_id)?.node;
            // Scale the offset in the parent's frame, then rotate into world space
            pos += Vec2::from_angle(rot).rotate(local.position * scale);
            rot += local.rotation;
            scale *= local.scale;
        }
        Some((pos, rot, scale))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A scene always holds its root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene
            .spawn(scene.root(), Node::new().with_position(Vec2::new(10.0, 20.0)))
            .unwrap();
        assert_eq!(scene.get(id).unwrap().position, Vec2::new(10.0, 20.0));
        assert_eq!(scene.parent(id), Some(scene.root()));
        assert_eq!(scene.children(scene.root()), Some([id].as_slice()));
    }

    #[test]
    fn remove_subtree_makes_handles_stale() {
        let mut scene = Scene::new();
        let layer = scene.spawn(scene.root(), Node::new()).unwrap();
        let child = scene.spawn(layer, Node::new().with_name("ball")).unwrap();
        assert_eq!(scene.len(), 3);

        let removed = scene.remove_from_parent(layer);
        assert!(removed.is_some());
        assert!(!scene.contains(layer));
        assert!(!scene.contains(child));
        assert!(scene.get_mut(child).is_none());
        assert_eq!(scene.len(), 1);
        assert!(scene.children(scene.root()).unwrap().is_empty());
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut scene = Scene::new();
        let root = scene.root();
        assert!(scene.remove_from_parent(root).is_none());
        assert!(scene.contains(root));
    }

    #[test]
    fn spawn_under_stale_parent_fails() {
        let mut scene = Scene::new();
        let gone = scene.spawn(scene.root(), Node::new()).unwrap();
        scene.remove_from_parent(gone);
        assert_eq!(scene.spawn(gone, Node::new()), Err(FxError::StaleNode(gone)));
    }

    #[test]
    fn bring_to_front_reorders_siblings() {
        let mut scene = Scene::new();
        let a = scene.spawn(scene.root(), Node::new()).unwrap();
        let b = scene.spawn(scene.root(), Node::new()).unwrap();
        scene.bring_to_front(a);
        assert_eq!(scene.children(scene.root()), Some([b, a].as_slice()));
    }

    #[test]
    fn find_by_name() {
        let mut scene = Scene::new();
        scene.spawn(scene.root(), Node::new().with_name("enemy")).unwrap();
        let hero = scene.spawn(scene.root(), Node::new().with_name("hero")).unwrap();
        assert_eq!(scene.find_by_name("hero"), Some(hero));
        assert_eq!(scene.find_by_name("boss"), None);
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut scene = Scene::new();
        let pivot = scene
            .spawn(
                scene.root(),
                Node::new()
                    .with_position(Vec2::new(100.0, 100.0))
                    .with_rotation(std::f32::consts::FRAC_PI_2)
                    .with_scale(Vec2::splat(2.0)),
            )
            .unwrap();
        let child = scene
            .spawn(pivot, Node::new().with_position(Vec2::new(10.0, 0.0)))
            .unwrap();

        let (pos, rot, scale) = scene.world_transform(child).unwrap();
        assert!((pos - Vec2::new(100.0, 120.0)).length() < 1e-4, "pos was {pos}");
        assert!((rot - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(scale, Vec2::splat(2.0));
    }

    #[test]
    fn world_transform_scales_before_rotating() {
        let mut scene = Scene::new();
        let parent = scene
            .spawn(
                scene.root(),
                Node::new()
                    .with_rotation(std::f32::consts::FRAC_PI_2)
                    .with_scale(Vec2::new(2.0, 1.0)),
            )
            .unwrap();
        let child = scene
            .spawn(parent, Node::new().with_position(Vec2::new(10.0, 0.0)))
            .unwrap();

        let (pos, _, scale) = scene.world_transform(child).unwrap();
        assert!((pos - Vec2::new(0.0, 20.0)).length() < 1e-4, "pos was {pos}");
        assert_eq!(scale, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn background_color() {
        let mut scene = Scene::new().with_background(Color::from_rgb(8, 57, 71));
        assert_eq!(scene.background(), Color::from_rgb(8, 57, 71));
        scene.set_background(Color::WHITE);
        assert_eq!(scene.background(), Color::WHITE);
    }
}
