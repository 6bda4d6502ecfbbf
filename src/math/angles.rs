//! Three-axis angle triple with wrap-around increments.

use super::vec4::Vec4;

pub const MAX_DEGREES: f32 = 360.0;
pub const MAX_RADIANS: f32 = std::f32::consts::TAU;
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Rotation angles about X (pitch), Y (yaw) and Z (roll).
///
/// The unit is whatever the caller uses; pass the matching `max` to the
/// `inc_*` methods ([`MAX_RADIANS`] or [`MAX_DEGREES`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angles3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Angles3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn inc_x(&mut self, amount: f32, max: f32) {
        self.x = wrap(self.x + amount, max);
    }

    pub fn inc_y(&mut self, amount: f32, max: f32) {
        self.y = wrap(self.y + amount, max);
    }

    pub fn inc_z(&mut self, amount: f32, max: f32) {
        self.z = wrap(self.z + amount, max);
    }

    pub fn to_radians(self) -> Self {
        Self::new(self.x * DEG_TO_RAD, self.y * DEG_TO_RAD, self.z * DEG_TO_RAD)
    }

    pub fn as_vec4(self) -> Vec4 {
        Vec4::direction(self.x, self.y, self.z)
    }
}

/// Folds `value` into `[0, max)`.
fn wrap(value: f32, max: f32) -> f32 {
    let folded = value % max;
    let folded = if folded < 0.0 { folded + max } else { folded };
    // A tiny negative remainder rounds up to exactly `max`.
    if folded >= max {
        0.0
    } else {
        folded
    }
}
