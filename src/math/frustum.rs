//! Viewing volume of a camera.

/// Left/right/top/bottom bounds of the view plane window, near/far planes
/// along camera-space z, and a vertical field of view in degrees.
///
/// The camera looks down -z, so `near` and `far` are negative with
/// `far < near < 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub fov: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(-1.0, 1.0, 1.0, -1.0, -1.0, -100.0, 90.0)
    }
}

impl Frustum {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32, fov: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
            fov,
        }
    }

    /// Distance from the eye to the view plane: `(top - bottom) / 2 / tan(fov / 2)`.
    pub fn view_plane_depth(&self) -> f32 {
        (self.top - self.bottom) * 0.5 / (self.fov * std::f32::consts::PI / 360.0).tan()
    }

    /// True if camera-space `z` lies between the far and near planes.
    pub fn contains_depth(&self, z: f32) -> bool {
        z <= self.near && z >= self.far
    }
}
