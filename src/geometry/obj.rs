//! Wavefront OBJ loading.
//!
//! OBJ faces wind counter-clockwise when seen from the front; triangles are
//! flipped on load so they match the clockwise-front winding used by
//! [`Vec4::surface_normal`].

use std::io::BufRead;
use std::path::Path;

use crate::colors::Color;
use crate::error::LoadError;
use crate::math::Vec4;

use super::{Mesh, Vertex3D};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Loads every object in an OBJ file and merges them into one mesh.
///
/// Materials are ignored. Per-vertex colors are kept when present.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    log::info!("Loading mesh from {}", path.display());
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    build_mesh(&models)
}

/// Like [`load_obj`], reading OBJ text from `reader`. `mtllib` statements fail to resolve.
pub fn load_obj_from_reader(reader: &mut impl BufRead) -> Result<Mesh, LoadError> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    build_mesh(&models)
}

fn build_mesh(models: &[tobj::Model]) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::new();

    for model in models {
        let data = &model.mesh;
        let base = mesh.vertex_count();

        for (i, p) in data.positions.chunks_exact(3).enumerate() {
            let mut vertex = Vertex3D::new(Vec4::point(p[0], p[1], p[2]));
            if let Some(c) = data.vertex_color.get(i * 3..i * 3 + 3) {
                let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
                vertex.color = Color::rgb(channel(c[0]), channel(c[1]), channel(c[2]));
            }
            mesh.add_vertex(vertex);
        }

        for face in data.indices.chunks_exact(3) {
            let [a, b, c] = [face[0], face[1], face[2]].map(|i| base + i as usize);
            mesh.add_triangle(a, c, b)?;
        }

        log::debug!(
            "Loaded object '{}': {} vertices, {} triangles",
            model.name,
            data.positions.len() / 3,
            data.indices.len() / 3
        );
    }

    mesh.calculate_vertex_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const SQUARE: &str = "\
o square
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
f 1 2 3 4
";

    #[test]
    fn counter_clockwise_obj_faces_the_viewer() {
        let mesh = load_obj_from_reader(&mut Cursor::new(SQUARE)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for tri in mesh.triangles() {
            assert_relative_eq!(tri.normal, Vec4::UNIT_Z, epsilon = 1e-6);
        }
    }

    #[test]
    fn vertex_colors_are_kept() {
        let src = "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n";
        let mesh = load_obj_from_reader(&mut Cursor::new(src)).unwrap();
        assert_eq!(mesh.vertices()[0].color, Color::RED);
        assert_eq!(mesh.vertices()[2].color, Color::BLUE);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_obj("does/not/exist.obj"),
            Err(LoadError::Obj(_))
        ));
    }
}
