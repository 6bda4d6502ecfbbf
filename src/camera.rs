//! UVN orbit camera
//!
//! # Coordinate System
//!
//! Right-handed, camera looking down its own -N axis:
//! - U: right
//! - V: up
//! - N: from the focus point back towards the eye
//!
//! # Orientation
//!
//! The camera stores only eye, focus and up. The UVN basis is derived on
//! demand, so the view matrix always reflects the latest state. Orbiting
//! rotates eye and up with a quaternion built from the camera's current
//! basis, so the rotation axes follow the camera as it moves.

use crate::math::{Angles3D, Frustum, Mat4, Quat, Vec4};

/// Camera-local basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvnAxes {
    pub u: Vec4,
    pub v: Vec4,
    pub n: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec4,
    focus: Vec4,
    up: Vec4,
    frustum: Frustum,
    orthographic: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec4::point(0.0, 0.0, 2.0),
            Vec4::ORIGIN,
            Vec4::direction(0.0, 1.0, 0.0),
        )
    }
}

impl Camera {
    /// Creates a perspective camera with the default frustum.
    pub fn new(eye: Vec4, focus: Vec4, up: Vec4) -> Self {
        Self {
            eye: eye.with_w(1.0),
            focus: focus.with_w(1.0),
            up: up.with_w(0.0),
            frustum: Frustum::default(),
            orthographic: false,
        }
    }

    /// Restores the default eye, focus, up, frustum and projection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn eye(&self) -> Vec4 {
        self.eye
    }

    pub fn set_eye(&mut self, eye: Vec4) {
        self.eye = eye.with_w(1.0);
    }

    pub fn focus(&self) -> Vec4 {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Vec4) {
        self.focus = focus.with_w(1.0);
    }

    pub fn up(&self) -> Vec4 {
        self.up
    }

    pub fn set_up(&mut self, up: Vec4) {
        self.up = up.with_w(0.0);
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.orthographic = orthographic;
        log::info!(
            "Projection: {}",
            if orthographic { "orthographic" } else { "perspective" }
        );
    }

    // =========================================================================
    // Derived matrices
    // =========================================================================

    /// `V = normalize(up)`, `N = normalize(eye - focus)`, `U = V x N`.
    ///
    /// U is not renormalized, so an up vector that is not perpendicular to
    /// the view direction yields a shortened U.
    pub fn axes(&self) -> UvnAxes {
        let v = self.up.normalize();
        let n = (self.eye - self.focus).normalize();
        let u = v.cross(n);
        UvnAxes { u, v, n }
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        let UvnAxes { u, v, n } = self.axes();
        Mat4::camera(u, v, n, self.eye)
    }

    /// Perspective scale by the frustum's view-plane depth, or the identity
    /// when orthographic.
    pub fn projection_matrix(&self) -> Mat4 {
        if self.orthographic {
            Mat4::identity()
        } else {
            Mat4::perspective(self.frustum.view_plane_depth())
        }
    }

    // =========================================================================
    // Orbit
    // =========================================================================

    /// Orbits the eye around the focus point.
    ///
    /// `angles` are in degrees about the camera's current U (x), V (y) and
    /// W = normalize(eye - focus) (z) axes. The eye keeps its distance from
    /// the focus and the up vector is rotated along with it.
    pub fn rotate_around_focus(&mut self, angles: Angles3D) {
        let radians = angles.to_radians();

        let relative = self.eye - self.focus;
        let distance = relative.length();
        let v = self.up.normalize();
        let w = relative.normalize();
        let u = v.cross(w).normalize();

        let q = Quat::from_euler(radians.as_vec4(), u, v, w);

        let new_relative = q.rotate(w).normalize() * distance;
        self.eye = (self.focus + new_relative).with_w(1.0);
        self.up = q.rotate(v).normalize();
    }
}
