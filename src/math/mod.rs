//! Homogeneous-coordinate math used by the pipeline.

pub mod angles;
pub mod frustum;
pub mod mat4;
pub mod plane;
pub mod quat;
pub mod vec4;

pub use angles::{Angles3D, DEG_TO_RAD, MAX_DEGREES, MAX_RADIANS};
pub use frustum::Frustum;
pub use mat4::Mat4;
pub use plane::Plane;
pub use quat::Quat;
pub use vec4::Vec4;
