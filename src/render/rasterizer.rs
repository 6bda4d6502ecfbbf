//! Scanline triangle rasterization with a span-based depth test.
//!
//! # Decomposition
//!
//! ```text
//!        t                    t
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>    m /----\ P   split at m.y
//!   m /      \              \     \
//!      \      \              \     \
//!        \     \               \    \
//!          \    \                \   \
//!             \  \                  \ \
//!                 b                    b
//! ```
//!
//! A triangle with two vertices on the same (truncated) row is drawn
//! directly: the shared row is its base and rows are walked towards the
//! third vertex. Any other triangle is split at the middle vertex's row by a
//! point P on the long edge, and both halves are walked outwards from that
//! row.
//!
//! # Edges and spans
//!
//! Two edge trackers step x and z by `dx/dy` and `dz/dy` per row. Each row
//! draws the two short edge segments covered since the previous row and,
//! unless in wireframe mode, the span between them. Everything is drawn as
//! horizontal lines through [`Surface::draw_line`], so edges and spans go
//! through the same depth test.
//!
//! # Depth
//!
//! With the z-buffer on, a span is walked left to right: runs of visible
//! pixels are recorded in the depth buffer and drawn as one line, runs of
//! occluded pixels are skipped. A single row can therefore be partly hidden.

use crate::colors::Color;
use crate::config::Viewport;
use crate::math::Vec4;

use super::{DepthBuffer, Surface};

/// A projected vertex: pixel x/y, camera-space z, and the color its edges
/// and spans are drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub position: Vec4,
    pub color: Color,
}

impl ScreenVertex {
    pub fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            position: Vec4::point(x, y, z),
            color,
        }
    }

    #[inline]
    fn row(&self) -> i32 {
        self.position.y as i32
    }
}

/// Per-frame switches the rasterizer reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSettings {
    pub viewport: Viewport,
    pub z_buffer: bool,
    pub wireframe: bool,
}

/// Draws triangles and depth-tested lines onto a borrowed surface.
///
/// The depth buffer must have been reset for the current frame with a
/// viewport at least as large as `settings.viewport`.
pub struct Rasterizer<'a, S: Surface + ?Sized> {
    settings: RasterSettings,
    depth: &'a mut DepthBuffer,
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Rasterizer<'a, S> {
    pub fn new(settings: RasterSettings, depth: &'a mut DepthBuffer, surface: &'a mut S) -> Self {
        Self {
            settings,
            depth,
            surface,
        }
    }

    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    #[inline]
    fn width(&self) -> i32 {
        self.settings.viewport.width as i32
    }

    #[inline]
    fn height(&self) -> i32 {
        self.settings.viewport.height as i32
    }

    pub fn draw_triangle(&mut self, a: ScreenVertex, b: ScreenVertex, c: ScreenVertex) {
        let (ya, yb, yc) = (a.row(), b.row(), c.row());

        if ya == yb {
            self.draw_flat(a, b, c, true);
        } else if yb == yc {
            self.draw_flat(b, c, a, true);
        } else if ya == yc {
            self.draw_flat(a, c, b, true);
        } else {
            let mut sorted = [a, b, c];
            sorted.sort_by_key(ScreenVertex::row);
            let [top, mid, bottom] = sorted;
            self.draw_split(top, mid, bottom);
        }
    }

    /// Splits a triangle with three distinct rows at the middle row.
    fn draw_split(&mut self, top: ScreenVertex, mid: ScreenVertex, bottom: ScreenVertex) {
        let (t, m, b) = (top.position, mid.position, bottom.position);
        let d = (m.y - t.y) / (b.y - t.y);

        // Color at the split is not interpolated; it reuses the top vertex's.
        let split = ScreenVertex::new(
            t.x + d * (b.x - t.x),
            m.y,
            t.z + d * (b.z - t.z),
            top.color,
        );

        self.draw_flat(mid, split, top, false);
        self.draw_flat(mid, split, bottom, false);
    }

    /// Walks rows from the base `p1`-`p2` towards the apex `p3`, upwards or
    /// downwards depending on where the apex lies. Only rows inside the
    /// viewport are visited.
    fn draw_flat(&mut self, p1: ScreenVertex, p2: ScreenVertex, p3: ScreenVertex, draw_base: bool) {
        // Rows are i64 so apexes far off-screen cannot overflow the row count.
        let start_y = i64::from(p1.row());
        let end_y = i64::from(p3.row());
        let (mut x1, mut z1) = (p1.position.x, p1.position.z);
        let (mut x2, mut z2) = (p2.position.x, p2.position.z);
        let (x3, z3) = (p3.position.x, p3.position.z);

        if draw_base {
            self.draw_horizontal_line(x1 as i32, z1, x2 as i32, z2, start_y as i32, p1.color);
        }

        let y_diff = end_y - start_y;
        if y_diff == 0 {
            // All three on one row: draw its full extent.
            let points = [p1.position, p2.position, p3.position];
            let left = points.iter().fold(points[0], |m, p| if p.x < m.x { *p } else { m });
            let right = points.iter().fold(points[0], |m, p| if p.x > m.x { *p } else { m });
            self.draw_horizontal_line(left.x as i32, left.z, right.x as i32, right.z, start_y as i32, p1.color);
            return;
        }

        let rows = y_diff.abs();
        let x_inc1 = (x3 - x1) / rows as f32;
        let x_inc2 = (x3 - x2) / rows as f32;
        let z_inc1 = (z3 - z1) / rows as f32;
        let z_inc2 = (z3 - z2) / rows as f32;
        let step = y_diff.signum();

        // Jump the edge trackers over rows that lie before the viewport.
        let last_row = i64::from(self.height()) - 1;
        let skipped = if step > 0 { -start_y } else { start_y - last_row }.clamp(0, rows);
        if skipped > 0 {
            let k = skipped as f32;
            x1 += x_inc1 * k;
            x2 += x_inc2 * k;
            z1 += z_inc1 * k;
            z2 += z_inc2 * k;
        }

        let (mut old_x1, mut old_z1) = (x1, z1);
        let (mut old_x2, mut old_z2) = (x2, z2);
        let mut y = start_y + step * skipped;
        let mut old_y = y;

        loop {
            if y != old_y {
                let row = old_y as i32;
                self.draw_horizontal_line(old_x1 as i32, old_z1, x1 as i32, z1, row, p1.color);
                self.draw_horizontal_line(old_x2 as i32, old_z2, x2 as i32, z2, row, p2.color);
                if !self.settings.wireframe {
                    self.draw_horizontal_line(x1 as i32, z1, x2 as i32, z2, row, p1.color);
                }
            }

            old_x1 = x1;
            old_x2 = x2;
            old_z1 = z1;
            old_z2 = z2;
            old_y = y;

            x1 += x_inc1;
            x2 += x_inc2;
            z1 += z_inc1;
            z2 += z_inc2;

            if y == end_y || (step > 0 && y > last_row) || (step < 0 && y < 0) {
                break;
            }
            y += step;
        }

        let row = old_y as i32;
        self.draw_horizontal_line(old_x1 as i32, old_z1, x3 as i32, z3, row, p1.color);
        self.draw_horizontal_line(old_x2 as i32, old_z2, x3 as i32, z3, row, p2.color);
    }

    /// Draws row `y` from `x1` to `x2`, with z interpolated linearly between
    /// `z1` and `z2`. Rows outside the viewport are skipped and the span is
    /// clamped to `[0, width)`.
    pub fn draw_horizontal_line(&mut self, x1: i32, z1: f32, x2: i32, z2: f32, y: i32, color: Color) {
        if y < 0 || y >= self.height() {
            return;
        }
        let Some((start, end, z, z_inc)) = clip_span(x1, z1, x2, z2, self.width()) else {
            return;
        };
        self.surface.set_color(color);

        if !self.settings.z_buffer {
            self.surface.draw_line(start, y, end, y);
            return;
        }
        self.fill_span(start, end, z, z_inc, |x| (x, y));
    }

    /// Draws column `x` from `y1` to `y2`, clamped to `[0, height)`. Columns
    /// outside the viewport are skipped.
    pub fn draw_vertical_line(&mut self, y1: i32, z1: f32, y2: i32, z2: f32, x: i32, color: Color) {
        if x < 0 || x >= self.width() {
            return;
        }
        let Some((start, end, z, z_inc)) = clip_span(y1, z1, y2, z2, self.height()) else {
            return;
        };
        self.surface.set_color(color);

        if !self.settings.z_buffer {
            self.surface.draw_line(x, start, x, end);
            return;
        }
        self.fill_span(start, end, z, z_inc, |y| (x, y));
    }

    /// Depth-tested walk over `start..=end` along one axis; `pixel` maps the
    /// position along the span to (x, y).
    fn fill_span(&mut self, start: i32, end: i32, mut z: f32, z_inc: f32, pixel: impl Fn(i32) -> (i32, i32)) {
        let mut i = start;
        while i <= end {
            let run_start = i;
            loop {
                let (x, y) = pixel(i);
                if i > end || !self.depth.is_visible(x, y, z) {
                    break;
                }
                self.depth.write(x, y, z);
                i += 1;
                z += z_inc;
            }

            if i > run_start {
                let (x0, y0) = pixel(run_start);
                let (x1, y1) = pixel(i - 1);
                self.surface.draw_line(x0, y0, x1, y1);
            }

            loop {
                let (x, y) = pixel(i);
                if i > end || self.depth.is_visible(x, y, z) {
                    break;
                }
                i += 1;
                z += z_inc;
            }
        }
    }
}

/// Orders a span, clamps it to `[0, limit)` and returns
/// `(start, end, z at start, z per pixel)`, or None if nothing is left.
fn clip_span(a: i32, za: f32, b: i32, zb: f32, limit: i32) -> Option<(i32, i32, f32, f32)> {
    let (mut a, mut za, mut b, mut zb) = (i64::from(a), za, i64::from(b), zb);
    if a > b {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut za, &mut zb);
    }
    let limit = i64::from(limit);
    if b < 0 || a >= limit {
        return None;
    }

    let z_inc = if a < b { (zb - za) / (b - a) as f32 } else { 0.0 };
    if a < 0 {
        za += -a as f32 * z_inc;
        a = 0;
    }
    let b = b.min(limit - 1);
    Some((a as i32, b as i32, za, z_inc))
}
