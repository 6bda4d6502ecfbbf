//! Mesh data and builders.

pub mod builders;
pub mod mesh;
pub mod obj;
pub mod triangle;
pub mod vertex;

pub use builders::{cube, face, face_mesh};
pub use mesh::Mesh;
pub use obj::{load_obj, load_obj_from_reader};
pub use triangle::Triangle3D;
pub use vertex::Vertex3D;
