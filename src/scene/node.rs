//! Scene tree storage.
//!
//! Nodes live in a [`Scene`] arena and refer to each other by [`NodeId`].
//! Each node has at most one parent; the parent link is a plain id, the
//! parent's `children` list is the owning side. Removed slots are recycled
//! with a bumped generation so stale ids stop resolving.

use crate::error::SceneError;
use crate::geometry::Mesh;
use crate::light::DirectionalLight;
use crate::math::{Angles3D, Vec4};

/// Handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Offset contributed by a translation node: `vector * scale_factor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translation {
    pub vector: Vec4,
    pub scale_factor: f32,
}

impl Translation {
    pub fn new(vector: Vec4) -> Self {
        Self {
            vector: vector.with_w(0.0),
            scale_factor: 1.0,
        }
    }

    pub fn offset(&self) -> Vec4 {
        (self.vector * self.scale_factor).with_w(0.0)
    }
}

/// Rotation contributed by a rotation node, angles in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub angles: Angles3D,
}

impl Rotation {
    pub fn new(angles: Angles3D) -> Self {
        Self { angles }
    }
}

/// What a node contributes to a traversal.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    Translation(Translation),
    Rotation(Rotation),
    Light(DirectionalLight),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Group => "group",
            NodeKind::Mesh(_) => "mesh",
            NodeKind::Translation(_) => "translation",
            NodeKind::Rotation(_) => "rotation",
            NodeKind::Light(_) => "light",
        }
    }
}

impl From<Mesh> for NodeKind {
    fn from(mesh: Mesh) -> Self {
        NodeKind::Mesh(mesh)
    }
}

impl From<Translation> for NodeKind {
    fn from(t: Translation) -> Self {
        NodeKind::Translation(t)
    }
}

impl From<Rotation> for NodeKind {
    fn from(r: Rotation) -> Self {
        NodeKind::Rotation(r)
    }
}

impl From<DirectionalLight> for NodeKind {
    fn from(l: DirectionalLight) -> Self {
        NodeKind::Light(l)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    enabled: bool,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            enabled: true,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attach order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node of a scene tree (or forest).
#[derive(Clone, Debug, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached node.
    pub fn insert(&mut self, kind: impl Into<NodeKind>) -> NodeId {
        let node = Node::new(kind.into());
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub fn insert_group(&mut self) -> NodeId {
        self.insert(NodeKind::Group)
    }

    /// Adds a node and attaches it under `parent`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        kind: impl Into<NodeKind>,
    ) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let child = self.insert(kind);
        self.attach_child(parent, child)?;
        Ok(child)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    pub fn kind_mut(&mut self, id: NodeId) -> Result<&mut NodeKind, SceneError> {
        Ok(&mut self.node_mut(id)?.kind)
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        match self.get_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn rotation_mut(&mut self, id: NodeId) -> Option<&mut Rotation> {
        match self.get_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Rotation(rotation)) => Some(rotation),
            _ => None,
        }
    }

    pub fn translation_mut(&mut self, id: NodeId) -> Option<&mut Translation> {
        match self.get_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Translation(translation)) => Some(translation),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(self.node(id)?.children())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Makes `child` the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if parent == child {
            return Err(SceneError::SelfAttach);
        }
        self.node(child)?;
        self.node(parent)?;

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(SceneError::WouldCreateCycle);
            }
            ancestor = self.node(id)?.parent;
        }

        if let Some(old_parent) = self.node(child)?.parent {
            if old_parent == parent {
                return Ok(());
            }
            self.detach_child(old_parent, child)?;
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from `parent`. Returns false if it was not a child.
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        let children = &mut self.node_mut(parent)?.children;
        let Some(pos) = children.iter().position(|&c| c == child) else {
            return Ok(false);
        };
        children.remove(pos);
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Ok(true)
    }

    /// Detaches every child of `parent` and returns them.
    pub fn detach_all_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let children = std::mem::take(&mut self.node_mut(parent)?.children);
        for &child in &children {
            if let Some(node) = self.get_mut(child) {
                node.parent = None;
            }
        }
        Ok(children)
    }

    /// A disabled node is skipped by traversal together with its subtree.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn is_enabled(&self, id: NodeId) -> Result<bool, SceneError> {
        Ok(self.node(id)?.enabled)
    }

    /// Removes `id` and its whole subtree, detaching it from its parent.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.node(id)?.parent {
            self.detach_child(parent, id)?;
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let slot = &mut self.slots[next.index as usize];
            if let Some(node) = slot.node.take() {
                pending.extend(node.children);
                self.free.push(next.index);
                self.live -= 1;
            }
        }
        Ok(())
    }

    /// Path from the tree root down to `id`, inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let mut path = vec![id];
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent)?.parent;
        }
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_then_detach_round_trip() {
        let mut scene = Scene::new();
        let parent = scene.insert_group();
        let existing = scene.insert_child(parent, NodeKind::Group).unwrap();
        let child = scene.insert_group();
        let before = scene.children(parent).unwrap().len();

        scene.attach_child(parent, child).unwrap();
        assert_eq!(scene.children(parent).unwrap(), &[existing, child]);
        assert_eq!(scene.parent(child).unwrap(), Some(parent));

        assert!(scene.detach_child(parent, child).unwrap());
        assert_eq!(scene.children(parent).unwrap().len(), before);
        assert_eq!(scene.parent(child).unwrap(), None);
    }

    #[test]
    fn attach_moves_child_between_parents() {
        let mut scene = Scene::new();
        let a = scene.insert_group();
        let b = scene.insert_group();
        let child = scene.insert_child(a, NodeKind::Group).unwrap();

        scene.attach_child(b, child).unwrap();
        assert!(scene.children(a).unwrap().is_empty());
        assert_eq!(scene.children(b).unwrap(), &[child]);
        assert_eq!(scene.parent(child).unwrap(), Some(b));
    }

    #[test]
    fn reattach_to_same_parent_is_noop() {
        let mut scene = Scene::new();
        let a = scene.insert_group();
        let child = scene.insert_child(a, NodeKind::Group).unwrap();
        scene.attach_child(a, child).unwrap();
        assert_eq!(scene.children(a).unwrap(), &[child]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scene = Scene::new();
        let root = scene.insert_group();
        let mid = scene.insert_child(root, NodeKind::Group).unwrap();
        let leaf = scene.insert_child(mid, NodeKind::Group).unwrap();

        assert_eq!(scene.attach_child(root, root), Err(SceneError::SelfAttach));
        assert_eq!(scene.attach_child(leaf, root), Err(SceneError::WouldCreateCycle));
        assert_eq!(scene.parent(root).unwrap(), None);
    }

    #[test]
    fn detach_non_child_returns_false() {
        let mut scene = Scene::new();
        let a = scene.insert_group();
        let b = scene.insert_group();
        assert!(!scene.detach_child(a, b).unwrap());
    }

    #[test]
    fn detach_all_clears_parent_links() {
        let mut scene = Scene::new();
        let root = scene.insert_group();
        let kids: Vec<_> = (0..3)
            .map(|_| scene.insert_child(root, NodeKind::Group).unwrap())
            .collect();

        assert_eq!(scene.detach_all_children(root).unwrap(), kids);
        assert!(scene.children(root).unwrap().is_empty());
        for kid in kids {
            assert_eq!(scene.parent(kid).unwrap(), None);
        }
    }

    #[test]
    fn remove_frees_subtree_and_invalidates_ids() {
        let mut scene = Scene::new();
        let root = scene.insert_group();
        let branch = scene.insert_child(root, NodeKind::Group).unwrap();
        let leaf = scene.insert_child(branch, NodeKind::Group).unwrap();
        assert_eq!(scene.len(), 3);

        scene.remove(branch).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(!scene.contains(branch));
        assert!(!scene.contains(leaf));
        assert!(scene.children(root).unwrap().is_empty());

        // Recycled slot gets a new generation.
        let fresh = scene.insert_group();
        assert!(scene.contains(fresh));
        assert!(!scene.contains(leaf));
        assert_eq!(scene.node(leaf).unwrap_err(), SceneError::UnknownNode(leaf));
    }

    #[test]
    fn path_from_root_is_ordered() {
        let mut scene = Scene::new();
        let root = scene.insert_group();
        let mid = scene.insert_child(root, NodeKind::Group).unwrap();
        let leaf = scene.insert_child(mid, NodeKind::Group).unwrap();
        assert_eq!(scene.path_from_root(leaf).unwrap(), vec![root, mid, leaf]);
    }

    #[test]
    fn translation_offset_is_scaled() {
        let mut t = Translation::new(Vec4::direction(1.0, 2.0, 3.0));
        t.scale_factor = 2.0;
        assert_eq!(t.offset(), Vec4::direction(2.0, 4.0, 6.0));
    }
}
