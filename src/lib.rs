//! A CPU scanline renderer driven by a scene graph and a UVN camera.
//!
//! Scenes are trees of group, mesh, translation, rotation and light nodes.
//! Each frame the [`Renderer`] walks the tree, composes transforms on a
//! matrix stack, culls and lights triangles, and fills them with a z-buffered
//! scanline rasterizer. Output goes to any [`render::Surface`]; SDL2 is used
//! only by the demo window.
//!
//! # Quick Start
//!
//! ```ignore
//! use uvnraster::prelude::*;
//!
//! let mut scene = Scene::new();
//! let root = scene.insert_group();
//! scene.insert_child(root, cube(Vec4::ORIGIN, 1.0)?)?;
//!
//! let mut renderer = Renderer::default();
//! renderer.setup_viewport(Viewport::new(320, 240));
//! renderer.setup_camera(&Camera::default());
//!
//! let mut ctx = RenderContext::new();
//! let mut pixels = PixelBuffer::new(320, 240);
//! renderer.render(&mut ctx, &scene, root, &mut pixels);
//! pixels.save("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod light;
pub mod math;
pub mod render;
pub mod renderer;
pub mod scene;
pub mod scheduler;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use error::{GeometryError, LoadError, RenderError, SceneError};
pub use renderer::{FrameStats, Renderer};
pub use scene::{NodeId, Scene};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use uvnraster::prelude::*;
/// ```
pub mod prelude {
    // Camera & interaction
    pub use crate::camera::Camera;
    pub use crate::interaction::{InputEvent, Key, OrbitController, Response};

    // Geometry
    pub use crate::geometry::{cube, face, face_mesh, load_obj, Mesh, Vertex3D};
    pub use crate::light::DirectionalLight;

    // Math
    pub use crate::math::{Angles3D, Frustum, Mat4, Quat, Vec4};

    // Scene
    pub use crate::scene::{NodeId, NodeKind, Rotation, Scene, Translation};
    pub use crate::scheduler::Scheduler;

    // Rendering
    pub use crate::colors::Color;
    pub use crate::config::{RenderSettings, Viewport};
    pub use crate::render::{PixelBuffer, RenderContext, Surface};
    pub use crate::renderer::{FrameStats, Renderer};

    // Window
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
