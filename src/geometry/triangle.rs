use crate::colors::Color;
use crate::math::Vec4;

/// Three vertices of a [`Mesh`](super::Mesh), referenced by index into the
/// mesh's vertex table so adjacent triangles share the same vertex.
///
/// Only [`Mesh::add_triangle`](super::Mesh::add_triangle) creates triangles,
/// so the indices are always in bounds for the owning mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle3D {
    vertices: [usize; 3],
    /// Model-space face normal, refreshed by [`Mesh::calculate_vertex_normals`](super::Mesh::calculate_vertex_normals).
    pub normal: Vec4,
    /// Overrides the first vertex's color when set.
    pub color: Option<Color>,
}

impl Triangle3D {
    pub(crate) fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            vertices: [a, b, c],
            normal: Vec4::ZERO,
            color: None,
        }
    }

    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }
}
