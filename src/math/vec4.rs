//! 4D vector for homogeneous coordinates.
//!
//! Points carry `w = 1` and directions carry `w = 0`. Addition, subtraction
//! and scaling act on all four components; the direction-only operations
//! ([`length`](Vec4::length), [`normalize`](Vec4::normalize), [`dot`](Vec4::dot),
//! [`cross`](Vec4::cross), [`invert`](Vec4::invert)) ignore `w`.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const ORIGIN: Self = Self::point(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::direction(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::direction(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::direction(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Create a direction vector (w=0) from x, y, z coordinates.
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Same x, y, z with the given w.
    pub const fn with_w(self, w: f32) -> Self {
        Self::new(self.x, self.y, self.z, w)
    }

    /// Euclidean length of (x, y, z).
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scales (x, y, z) to unit length. A zero-length vector is returned unchanged.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w)
    }

    /// Negates (x, y, z), leaving w untouched.
    pub fn invert(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product `self x other`. The result is a direction (w=0).
    pub fn cross(&self, other: Self) -> Self {
        Self::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit normal of the plane through three points.
    ///
    /// Computed as `normalize((p2 - p1) x (p1 - p0))`, so the normal points
    /// towards a viewer who sees `p0, p1, p2` in clockwise order.
    pub fn surface_normal(p0: Self, p1: Self, p2: Self) -> Self {
        let edge1 = p1 - p0;
        let edge2 = p2 - p1;
        edge2.cross(edge1).normalize()
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

impl Add<Vec4> for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl AddAssign<Vec4> for Vec4 {
    fn add_assign(&mut self, rhs: Vec4) {
        *self = *self + rhs;
    }
}

impl Sub<Vec4> for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Self::Output {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl SubAssign<Vec4> for Vec4 {
    fn sub_assign(&mut self, rhs: Vec4) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl MulAssign<f32> for Vec4 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = self.scale(rhs);
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl approx::AbsDiffEq for Vec4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl approx::RelativeEq for Vec4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

impl std::fmt::Display for Vec4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_produces_unit_length() {
        for v in [
            Vec4::direction(3.0, 4.0, 0.0),
            Vec4::direction(-0.01, 0.2, 7.5),
            Vec4::point(1e3, -2e3, 5e2),
        ] {
            assert_relative_eq!(v.normalize().length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);
    }

    #[test]
    fn normalize_keeps_w() {
        let p = Vec4::point(0.0, 2.0, 0.0).normalize();
        assert_eq!(p, Vec4::point(0.0, 1.0, 0.0));
    }

    #[test]
    fn length_ignores_w() {
        assert_relative_eq!(Vec4::new(3.0, 4.0, 0.0, 100.0).length(), 5.0);
    }

    #[test]
    fn cross_is_right_handed_direction() {
        let c = Vec4::UNIT_X.cross(Vec4::UNIT_Y);
        assert_eq!(c, Vec4::UNIT_Z);
        assert_eq!(c.w, 0.0);
    }

    #[test]
    fn surface_normal_is_perpendicular_to_edges() {
        let p0 = Vec4::point(0.3, -1.2, 2.0);
        let p1 = Vec4::point(1.7, 0.4, -0.5);
        let p2 = Vec4::point(-0.9, 2.2, 1.1);
        let n = Vec4::surface_normal(p0, p1, p2);

        assert_relative_eq!(n.dot(p1 - p0), 0.0, epsilon = 1e-5);
        assert_relative_eq!(n.dot(p2 - p1), 0.0, epsilon = 1e-5);
        assert_relative_eq!(n.dot(p2 - p0), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn surface_normal_faces_clockwise_viewer() {
        // Clockwise from top-left when looking down -z from +z.
        let n = Vec4::surface_normal(
            Vec4::point(-1.0, 1.0, 0.0),
            Vec4::point(1.0, 1.0, 0.0),
            Vec4::point(1.0, -1.0, 0.0),
        );
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn surface_normal_of_colinear_points_is_zero() {
        let n = Vec4::surface_normal(
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(1.0, 1.0, 1.0),
            Vec4::point(2.0, 2.0, 2.0),
        );
        assert_eq!(n, Vec4::ZERO);
    }

    #[test]
    fn invert_leaves_w() {
        assert_eq!(
            Vec4::point(1.0, -2.0, 3.0).invert(),
            Vec4::point(-1.0, 2.0, -3.0)
        );
    }
}
