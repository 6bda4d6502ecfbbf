//! Indexed triangle mesh.
//!
//! A [`Mesh`] owns a vertex table and a list of triangles that reference it
//! by index. Vertices are inserted once when the mesh is built; triangles
//! sharing an index share the vertex, so averaged normals propagate to every
//! face that touches it.

use crate::colors::Color;
use crate::error::GeometryError;
use crate::math::Vec4;

use super::{Triangle3D, Vertex3D};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    triangles: Vec<Triangle3D>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: Vertex3D) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Appends a triangle over existing vertices and returns its index.
    ///
    /// The face normal is computed immediately from the current positions.
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<usize, GeometryError> {
        let len = self.vertices.len();
        if let Some(&index) = [a, b, c].iter().find(|&&i| i >= len) {
            return Err(GeometryError::VertexOutOfBounds { index, len });
        }

        let mut triangle = Triangle3D::new(a, b, c);
        triangle.normal = self.face_normal(&triangle);
        self.triangles.push(triangle);
        Ok(self.triangles.len() - 1)
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [Vertex3D] {
        &mut self.vertices
    }

    pub fn triangles(&self) -> &[Triangle3D] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Positions of a triangle's three vertices. `triangle` must belong to this mesh.
    #[inline]
    pub(crate) fn triangle_positions(&self, triangle: &Triangle3D) -> [Vec4; 3] {
        triangle.vertices().map(|i| self.vertices[i].position)
    }

    /// Color the triangle is drawn with before lighting. `triangle` must
    /// belong to this mesh.
    #[inline]
    pub(crate) fn base_color(&self, triangle: &Triangle3D) -> Color {
        triangle
            .color
            .unwrap_or(self.vertices[triangle.vertices()[0]].color)
    }

    /// Tints every triangle with `color`.
    pub fn set_color(&mut self, color: Color) {
        for triangle in &mut self.triangles {
            triangle.color = Some(color);
        }
    }

    /// Recomputes face normals, then sets each vertex normal to the
    /// normalized sum of the normals of the faces that use it.
    pub fn calculate_vertex_normals(&mut self) {
        log::trace!("Calculating normals for {} triangles", self.triangles.len());

        for vertex in &mut self.vertices {
            vertex.normal = Vec4::ZERO;
        }

        for i in 0..self.triangles.len() {
            let normal = self.face_normal(&self.triangles[i]);
            self.triangles[i].normal = normal;
            for index in self.triangles[i].vertices() {
                self.vertices[index].normal += normal;
            }
        }

        for vertex in &mut self.vertices {
            vertex.normal = vertex.normal.normalize();
        }
    }

    fn face_normal(&self, triangle: &Triangle3D) -> Vec4 {
        let [p0, p1, p2] = self.triangle_positions(triangle);
        Vec4::surface_normal(p0, p1, p2)
    }
}
