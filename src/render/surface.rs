use crate::colors::Color;

/// A 2D drawing target.
///
/// The rasterizer only ever calls [`set_color`](Surface::set_color) and
/// [`draw_line`](Surface::draw_line); pixels outside the surface must be
/// ignored by the implementation.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color used by subsequent [`draw_line`](Surface::draw_line) calls.
    fn set_color(&mut self, color: Color);

    /// Draws the segment between two pixels, both endpoints inclusive.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);
}
