//! Render settings and host constants.

use crate::colors::Color;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// Size of the pixel grid the pipeline projects onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Per-renderer toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub backface_culling: bool,
    pub wireframe: bool,
    pub z_buffer: bool,
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backface_culling: true,
            wireframe: false,
            z_buffer: true,
            background: Color::BLACK,
        }
    }
}
