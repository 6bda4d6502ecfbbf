//! Frame-stamped depth buffer.
//!
//! Each pixel stores a depth and the number of the frame that wrote it. A
//! pixel whose stamp differs from the current frame counts as empty, so the
//! buffer never has to be cleared between frames.
//!
//! Depth is camera-space z. The camera looks down -z, so a larger value
//! (closer to zero) is nearer.

use crate::config::Viewport;

#[derive(Clone, Debug, Default)]
pub struct DepthBuffer {
    depth: Vec<f32>,
    stamps: Vec<u32>,
    width: u32,
    height: u32,
    frame: u32,
}

impl DepthBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame, growing the buffer if `viewport` is larger than
    /// any seen before. Never shrinks.
    pub fn reset_for_frame(&mut self, viewport: Viewport) {
        if viewport.width > self.width || viewport.height > self.height {
            self.width = self.width.max(viewport.width);
            self.height = self.height.max(viewport.height);
            let len = (self.width * self.height) as usize;
            self.depth = vec![0.0; len];
            self.stamps = vec![0; len];
            log::debug!("Depth buffer resized to {}x{}", self.width, self.height);
        }

        self.frame = self.frame.wrapping_add(1);
        if self.frame == 0 {
            // Stamp 0 would alias pixels never written since the wrap.
            self.stamps.fill(0);
            self.frame = 1;
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// True if `z` at (x, y) is nearer than whatever this frame has drawn there.
    ///
    /// Pixels outside the buffer are always visible and never recorded.
    #[inline]
    pub fn is_visible(&self, x: i32, y: i32, z: f32) -> bool {
        match self.index(x, y) {
            Some(i) => self.stamps[i] != self.frame || z > self.depth[i],
            None => true,
        }
    }

    #[inline]
    pub fn write(&mut self, x: i32, y: i32, z: f32) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = z;
            self.stamps[i] = self.frame;
        }
    }

    /// Depth written at (x, y) during the current frame.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y)
            .filter(|&i| self.stamps[i] == self.frame)
            .map(|i| self.depth[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_invalidates_old_depths() {
        let mut depth = DepthBuffer::new();
        depth.reset_for_frame(Viewport::new(4, 4));
        depth.write(1, 1, -2.0);
        assert!(!depth.is_visible(1, 1, -3.0));
        assert!(depth.is_visible(1, 1, -1.0));

        depth.reset_for_frame(Viewport::new(4, 4));
        assert!(depth.is_visible(1, 1, -3.0));
        assert_eq!(depth.depth_at(1, 1), None);
    }

    #[test]
    fn grows_but_never_shrinks() {
        let mut depth = DepthBuffer::new();
        depth.reset_for_frame(Viewport::new(8, 2));
        depth.reset_for_frame(Viewport::new(4, 6));
        assert_eq!((depth.width(), depth.height()), (8, 6));
        depth.reset_for_frame(Viewport::new(2, 2));
        assert_eq!((depth.width(), depth.height()), (8, 6));
    }

    #[test]
    fn frame_counter_wraps_to_one() {
        let mut depth = DepthBuffer::new();
        depth.reset_for_frame(Viewport::new(2, 2));
        depth.write(0, 0, -1.0);
        depth.frame = u32::MAX;
        depth.stamps[0] = u32::MAX;
        depth.reset_for_frame(Viewport::new(2, 2));
        assert_eq!(depth.frame(), 1);
        assert!(depth.is_visible(0, 0, -50.0));
    }

    #[test]
    fn equal_depth_is_occluded() {
        let mut depth = DepthBuffer::new();
        depth.reset_for_frame(Viewport::new(2, 2));
        depth.write(0, 0, -2.0);
        assert!(!depth.is_visible(0, 0, -2.0));
    }
}
