//! In-memory ARGB8888 surface.

use std::path::Path;

use crate::colors::Color;

use super::Surface;

/// Owned pixel grid the demo window presents and tests inspect.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    color: u32,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); (width * height) as usize],
            width,
            height,
            color: Color::WHITE.to_argb(),
        }
    }

    /// Reallocates for new dimensions. Contents are cleared to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = vec![Color::BLACK.to_argb(); (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    #[inline]
    fn set_pixel(&mut self, x: i64, y: i64) {
        if x >= 0 && x < i64::from(self.width) && y >= 0 && y < i64::from(self.height) {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.pixels[index] = self.color;
        }
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(Color::from_argb(
                self.pixels[(y as u32 * self.width + x as u32) as usize],
            ))
        } else {
            None
        }
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Color) -> usize {
        let argb = color.to_argb();
        self.pixels.iter().filter(|&&p| p == argb).count()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw ARGB8888 bytes in native endianness, as SDL streaming textures expect.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // slice covers exactly the vector's initialized storage.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = Color::from_argb(self.pixels[(y * self.width + x) as usize]);
            image::Rgba([c.r, c.g, c.b, 255])
        })
    }

    /// Writes the buffer as an image file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_image().save(path)
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_color(&mut self, color: Color) {
        self.color = color.to_argb();
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// Steps along both axes with an integer error term that tracks the
    /// distance between the ideal line and the current pixel; when the
    /// error crosses a threshold the line also steps along the minor axis.
    /// A line lying wholly past one edge of the buffer is skipped.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        if (x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h) {
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }
}
