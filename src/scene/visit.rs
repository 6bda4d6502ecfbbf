//! Scene traversal.
//!
//! [`traverse`] walks a whole subtree depth-first, feeding each enabled
//! node's contribution to a [`NodeVisitor`] before its children. When a node
//! has more than one child the visitor is asked to [`save`](NodeVisitor::save)
//! before and [`restore`](NodeVisitor::restore) after each child so siblings
//! never see each other's accumulated state.
//!
//! [`visit_down`] and [`visit_up`] only walk the path between a node and its
//! root, without descending into children.

use crate::error::SceneError;
use crate::geometry::Mesh;
use crate::math::{Angles3D, Vec4};

use super::node::{NodeId, NodeKind, Scene};

/// Receives node contributions during a traversal.
pub trait NodeVisitor {
    type Error: From<SceneError>;

    fn group(&mut self, _id: NodeId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn mesh(&mut self, id: NodeId, mesh: &Mesh) -> Result<(), Self::Error>;

    /// Offset already multiplied by the node's scale factor.
    fn translation(&mut self, id: NodeId, offset: Vec4) -> Result<(), Self::Error>;

    /// Angles in radians, applied about X, then Y, then Z.
    fn rotation(&mut self, id: NodeId, angles: Angles3D) -> Result<(), Self::Error>;

    fn light(&mut self, id: NodeId, direction: Vec4) -> Result<(), Self::Error>;

    fn save(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

fn apply<V: NodeVisitor>(
    id: NodeId,
    kind: &NodeKind,
    direction: Direction,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let sign = match direction {
        Direction::Down => 1.0,
        Direction::Up => -1.0,
    };

    match kind {
        NodeKind::Group => visitor.group(id),
        NodeKind::Mesh(mesh) => visitor.mesh(id, mesh),
        NodeKind::Translation(t) => visitor.translation(id, t.offset() * sign),
        NodeKind::Rotation(r) => {
            let a = r.angles;
            visitor.rotation(id, Angles3D::new(a.x * sign, a.y * sign, a.z * sign))
        }
        NodeKind::Light(light) => visitor.light(id, light.direction),
    }
}

/// Depth-first walk of the subtree rooted at `root`.
pub fn traverse<V: NodeVisitor>(scene: &Scene, root: NodeId, visitor: &mut V) -> Result<(), V::Error> {
    let node = scene.node(root)?;
    if !node.is_enabled() {
        return Ok(());
    }

    log::trace!("Visiting {} node {:?}", node.kind.name(), root);
    apply(root, &node.kind, Direction::Down, visitor)?;

    let children = node.children();
    let isolate = children.len() > 1;
    for &child in children {
        if isolate {
            visitor.save()?;
        }
        traverse(scene, child, visitor)?;
        if isolate {
            visitor.restore()?;
        }
    }
    Ok(())
}

/// Applies the contributions on the path from the root down to `id`.
///
/// Nothing is applied if any node on the path is disabled.
pub fn visit_down<V: NodeVisitor>(scene: &Scene, id: NodeId, visitor: &mut V) -> Result<(), V::Error> {
    let path = scene.path_from_root(id)?;
    walk_path(scene, &path, Direction::Down, visitor)
}

/// Applies negated contributions on the path from `id` up to the root.
///
/// Translations and rotations are applied with their values negated; lights
/// and meshes are passed through unchanged. Nothing is applied if any node
/// on the path is disabled.
pub fn visit_up<V: NodeVisitor>(scene: &Scene, id: NodeId, visitor: &mut V) -> Result<(), V::Error> {
    let mut path = scene.path_from_root(id)?;
    path.reverse();
    walk_path(scene, &path, Direction::Up, visitor)
}

fn walk_path<V: NodeVisitor>(
    scene: &Scene,
    path: &[NodeId],
    direction: Direction,
    visitor: &mut V,
) -> Result<(), V::Error> {
    for &id in path {
        if !scene.node(id)?.is_enabled() {
            return Ok(());
        }
    }
    for &id in path {
        apply(id, &scene.node(id)?.kind, direction, visitor)?;
    }
    Ok(())
}
