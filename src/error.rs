//! Error types.

use thiserror::Error;

use crate::scene::NodeId;

/// Rejected geometry construction input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a face needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("size must be positive, got {0}")]
    NonPositiveSize(f32),
    #[error("vertex index {index} out of bounds for mesh with {len} vertices")]
    VertexOutOfBounds { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixStackError {
    #[error("pop on an empty matrix stack")]
    Underflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("a node cannot be its own child")]
    SelfAttach,
    #[error("attaching would make a node its own ancestor")]
    WouldCreateCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("task interval must be greater than zero")]
    ZeroInterval,
}

/// A fault that abandons the current frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("viewport not configured")]
    ViewportNotConfigured,
    #[error("camera not configured")]
    CameraNotConfigured,
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    MatrixStack(#[from] MatrixStackError),
    #[error("matrix stack left with {0} entries after traversal")]
    UnbalancedMatrixStack(usize),
}

/// Failure loading a mesh from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
