use crate::config::Viewport;
use crate::scene::MatrixStack;

use super::DepthBuffer;

/// Mutable state one render pass works in.
///
/// Create one per render loop and reuse it every frame; the depth buffer
/// keeps its allocation and frame counter between frames. Only one frame
/// may use a context at a time, which `&mut` access enforces.
#[derive(Debug, Default)]
pub struct RenderContext {
    pub depth: DepthBuffer,
    pub matrix_stack: MatrixStack,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the matrix stack and, when depth testing, starts a new depth frame.
    pub fn reset_for_frame(&mut self, viewport: Viewport, z_buffer: bool) {
        self.matrix_stack.clear();
        if z_buffer {
            self.depth.reset_for_frame(viewport);
        }
    }
}
