//! 4x4 transformation matrix.
//!
//! # Convention
//! - Stored row-major as `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let transform = projection * camera;  // camera applied first, then projection
//! let result = transform * vertex;      // transform the vertex
//! ```

use std::ops::{Add, Mul, Sub};

use approx::{AbsDiffEq, RelativeEq};

use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn zero() -> Self {
        Mat4::new([[0.0; 4]; 4])
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (counter-clockwise looking down -X).
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about X, then Y, then Z, composed as `Rx * Ry * Rz`.
    pub fn rotation_xyz(ax: f32, ay: f32, az: f32) -> Self {
        Mat4::rotation_x(ax) * Mat4::rotation_y(ay) * Mat4::rotation_z(az)
    }

    /// Creates a pinhole perspective matrix for a camera looking down -Z.
    ///
    /// `view_plane` is the (positive) view-plane depth. Clip-space `w` takes
    /// the camera-space `z`, which is negative in front of the eye, so x and y
    /// are scaled by `-view_plane` to keep the image upright after the divide.
    /// Camera-space `z` passes through unchanged for depth testing.
    pub fn perspective(view_plane: f32) -> Self {
        Mat4::new([
            [-view_plane, 0.0, 0.0, 0.0],
            [0.0, -view_plane, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Creates the world-to-camera matrix from a UVN basis and eye point.
    ///
    /// ```text
    /// |Ux Uy Uz -U.E|
    /// |Vx Vy Vz -V.E|
    /// |Nx Ny Nz -N.E|
    /// | 0  0  0    1|
    /// ```
    pub fn camera(u: Vec4, v: Vec4, n: Vec4, eye: Vec4) -> Self {
        Mat4::new([
            [u.x, u.y, u.z, -u.dot(eye)],
            [v.x, v.y, v.z, -v.dot(eye)],
            [n.x, n.y, n.z, -n.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps projected coordinates in `[-1, 1]` onto a `width x height` pixel grid.
    ///
    /// `x_screen = a / aspect * x + a` and `y_screen = b - b * y`, where
    /// `a = floor(width / 2 - 0.5)` and `b = floor(height / 2 - 0.5)`.
    /// Z and W pass through.
    pub fn viewport(width: u32, height: u32) -> Self {
        let a = (0.5 * width as f32 - 0.5).floor();
        let b = (0.5 * height as f32 - 0.5).floor();
        let aspect_ratio = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };

        let mut m = Mat4::identity();
        m.data[0][0] = a / aspect_ratio;
        m.data[0][3] = a;
        m.data[1][1] = -b;
        m.data[1][3] = b;
        m
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    fn zip_with(&self, other: &Mat4, f: impl Fn(f32, f32) -> f32) -> Mat4 {
        let mut data = self.data;
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = f(*value, other.data[row][col]);
            }
        }
        Mat4::new(data)
    }
}

impl Add<Mat4> for Mat4 {
    type Output = Mat4;

    fn add(self, rhs: Mat4) -> Self::Output {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub<Mat4> for Mat4 {
    type Output = Mat4;

    fn sub(self, rhs: Mat4) -> Self::Output {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Mul<f32> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: f32) -> Self::Output {
        let mut data = self.data;
        data.iter_mut().flatten().for_each(|v| *v *= rhs);
        Mat4::new(data)
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
