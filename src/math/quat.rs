//! Quaternions for rotating about arbitrary axes.
//!
//! Only used to compose rotations around a camera's own U/V/N axes, so the
//! API stays small: multiply, conjugate, inverse and an Euler constructor.

use std::ops::Mul;

use super::vec4::Vec4;

/// A quaternion `(real, imag)`. The imaginary part always has `w = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub real: f32,
    pub imag: Vec4,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self {
        real: 1.0,
        imag: Vec4::ZERO,
    };

    pub fn new(real: f32, imag: Vec4) -> Self {
        Self {
            real,
            imag: imag.with_w(0.0),
        }
    }

    /// A pure quaternion `(0, v)`, used to rotate a vector.
    pub fn pure(v: Vec4) -> Self {
        Self::new(0.0, v)
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec4, angle: f32) -> Self {
        let half = angle * 0.5;
        Self::new(half.cos(), axis * half.sin())
    }

    /// Rotation by `angles.x` about `u`, then `angles.y` about `v`, then
    /// `angles.z` about `w`, composed as `qw * qv * qu`.
    pub fn from_euler(angles: Vec4, u: Vec4, v: Vec4, w: Vec4) -> Self {
        let qx = Self::from_axis_angle(u, angles.x);
        let qy = Self::from_axis_angle(v, angles.y);
        let qz = Self::from_axis_angle(w, angles.z);
        qz * qy * qx
    }

    pub fn length(&self) -> f32 {
        (self.real * self.real + self.imag.dot(self.imag)).sqrt()
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.real, self.imag.invert())
    }

    /// Conjugate divided by length. Matches the true inverse only for unit
    /// quaternions, which is all the camera ever feeds in.
    pub fn inverse(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        let c = self.conjugate();
        Self::new(c.real / len, c.imag / len)
    }

    /// Rotates a direction by `q * (0, v) * q^-1`, returning the imaginary part.
    pub fn rotate(&self, v: Vec4) -> Vec4 {
        (*self * Self::pure(v) * self.inverse()).imag
    }
}

impl Mul<Quat> for Quat {
    type Output = Quat;

    /// `(r1, v1) * (r2, v2) = (r1 r2 - v1.v2, r2 v1 + r1 v2 + v1 x v2)`
    fn mul(self, rhs: Quat) -> Self::Output {
        let real = self.real * rhs.real - self.imag.dot(rhs.imag);
        let imag = self.imag * rhs.real + rhs.imag * self.real + self.imag.cross(rhs.imag);
        Quat::new(real, imag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_is_neutral() {
        let q = Quat::from_axis_angle(Vec4::UNIT_Y, 0.7);
        assert_relative_eq!((q * Quat::IDENTITY).real, q.real);
        assert_relative_eq!((Quat::IDENTITY * q).imag, q.imag);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let q = Quat::from_axis_angle(Vec4::UNIT_Z, FRAC_PI_2);
        let r = q.rotate(Vec4::UNIT_X);
        assert_relative_eq!(r, Vec4::UNIT_Y, epsilon = 1e-6);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let q = Quat::from_euler(
            Vec4::direction(0.3, -1.1, 2.0),
            Vec4::UNIT_X,
            Vec4::UNIT_Y,
            Vec4::UNIT_Z,
        );
        let v = Vec4::direction(0.5, -2.0, 1.25);
        let back = q.inverse().rotate(q.rotate(v));
        assert_relative_eq!(back, v, epsilon = 1e-5);
    }

    #[test]
    fn product_of_unit_quaternions_is_unit() {
        let a = Quat::from_axis_angle(Vec4::UNIT_X, 1.2);
        let b = Quat::from_axis_angle(Vec4::direction(0.0, 0.6, 0.8), -0.4);
        assert_relative_eq!((a * b).length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn euler_applies_first_axis_first() {
        // Half turn about X sends +Y to -Y; a quarter turn about Z then sends -Y to +X.
        let q = Quat::from_euler(
            Vec4::direction(PI, 0.0, FRAC_PI_2),
            Vec4::UNIT_X,
            Vec4::UNIT_Y,
            Vec4::UNIT_Z,
        );
        let r = q.rotate(Vec4::UNIT_Y);
        assert_relative_eq!(r, Vec4::UNIT_X, epsilon = 1e-6);
    }

    #[test]
    fn imaginary_part_has_zero_w() {
        let q = Quat::new(1.0, Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(q.imag.w, 0.0);
    }
}
