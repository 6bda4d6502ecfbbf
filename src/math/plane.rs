use super::vec4::Vec4;

/// A plane through `point` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec4,
    pub normal: Vec4,
}

impl Plane {
    pub fn new(point: Vec4, normal: Vec4) -> Self {
        Self {
            point: point.with_w(1.0),
            normal: normal.normalize().with_w(0.0),
        }
    }

    /// Plane through three points, facing the viewer that sees them clockwise.
    pub fn from_points(p0: Vec4, p1: Vec4, p2: Vec4) -> Self {
        Self::new(p0, Vec4::surface_normal(p0, p1, p2))
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        self.normal.dot(p - self.point)
    }
}
