//! Polygon and primitive builders.
//!
//! Faces are given as vertex loops that run clockwise when seen from the
//! side the face should be visible from.

use crate::error::GeometryError;
use crate::math::Vec4;

use super::{Mesh, Vertex3D};

/// Number of triangles a fan over `vertex_count` vertices produces.
pub fn expected_triangles(vertex_count: usize) -> usize {
    vertex_count.saturating_sub(2)
}

/// Triangulates a convex polygon over existing mesh vertices as a fan
/// around the first one. Returns the indices of the added triangles.
pub fn face(mesh: &mut Mesh, loop_indices: &[usize]) -> Result<Vec<usize>, GeometryError> {
    if loop_indices.len() < 3 {
        return Err(GeometryError::TooFewVertices(loop_indices.len()));
    }

    let first = loop_indices[0];
    loop_indices[1..]
        .windows(2)
        .map(|pair| mesh.add_triangle(first, pair[0], pair[1]))
        .collect()
}

/// Builds a standalone mesh for one polygon and computes its normals.
pub fn face_mesh(points: &[Vec4]) -> Result<Mesh, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewVertices(points.len()));
    }

    let mut mesh = Mesh::with_capacity(points.len(), expected_triangles(points.len()));
    let indices: Vec<usize> = points
        .iter()
        .map(|&p| mesh.add_vertex(Vertex3D::new(p)))
        .collect();
    face(&mut mesh, &indices)?;
    mesh.calculate_vertex_normals();
    Ok(mesh)
}

/// An axis-aligned cube of edge length `size` centered on `center`.
///
/// Eight shared vertices, six faces, twelve triangles, all facing outward.
pub fn cube(center: Vec4, size: f32) -> Result<Mesh, GeometryError> {
    if size <= 0.0 || !size.is_finite() {
        return Err(GeometryError::NonPositiveSize(size));
    }

    let h = size * 0.5;
    let mut mesh = Mesh::with_capacity(8, 12);

    // Front corners (0..4) then back corners (4..8): top-left, top-right,
    // bottom-right, bottom-left.
    for z in [h, -h] {
        for (x, y) in [(-h, h), (h, h), (h, -h), (-h, -h)] {
            let p = Vec4::point(center.x + x, center.y + y, center.z + z);
            mesh.add_vertex(Vertex3D::new(p));
        }
    }

    const FACES: [[usize; 4]; 6] = [
        [0, 1, 2, 3], // front
        [1, 5, 6, 2], // right
        [4, 0, 3, 7], // left
        [4, 5, 1, 0], // top
        [3, 2, 6, 7], // bottom
        [5, 4, 7, 6], // back
    ];
    for quad in FACES {
        face(&mut mesh, &quad)?;
    }

    mesh.calculate_vertex_normals();
    Ok(mesh)
}
