//! Pixel output: drawing surfaces, the depth buffer and the rasterizer.

mod context;
mod depth;
mod pixel_buffer;
mod rasterizer;
mod surface;

pub use context::RenderContext;
pub use depth::DepthBuffer;
pub use pixel_buffer::PixelBuffer;
pub use rasterizer::{RasterSettings, Rasterizer, ScreenVertex};
pub use surface::Surface;
