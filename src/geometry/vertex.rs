use crate::colors::Color;
use crate::math::Vec4;

/// A mesh vertex: position (w=1), smoothed normal (w=0) and color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex3D {
    pub position: Vec4,
    pub normal: Vec4,
    pub color: Color,
}

impl Default for Vertex3D {
    fn default() -> Self {
        Self::new(Vec4::ORIGIN)
    }
}

impl Vertex3D {
    /// A white vertex with a zero normal.
    pub fn new(position: Vec4) -> Self {
        Self {
            position: position.with_w(1.0),
            normal: Vec4::ZERO,
            color: Color::WHITE,
        }
    }

    pub fn with_normal(position: Vec4, normal: Vec4) -> Self {
        Self {
            normal: normal.with_w(0.0),
            ..Self::new(position)
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
