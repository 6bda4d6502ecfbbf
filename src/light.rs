//! Directional lighting.

use crate::math::Vec4;

/// A light whose rays all travel along `direction`, like a distant sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light travels (w = 0).
    pub direction: Vec4,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec4::direction(0.0, 0.0, -1.0))
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec4) -> Self {
        Self {
            direction: direction.normalize().with_w(0.0),
        }
    }
}

/// Flat-shading brightness `|normal . light|`.
///
/// Two-sided: a face lit from behind is as bright as one lit from the front.
/// A zero light (no light node visited) gives zero brightness.
#[inline]
pub fn intensity(normal: Vec4, light: Vec4) -> f32 {
    normal.dot(light).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn direct_illumination() {
        let light = DirectionalLight::new(Vec4::direction(0.0, 0.0, -3.0));
        assert_relative_eq!(intensity(Vec4::UNIT_Z, light.direction), 1.0);
    }

    #[test]
    fn back_lighting_is_absolute() {
        let light = DirectionalLight::new(Vec4::direction(0.0, 0.0, 1.0));
        assert_relative_eq!(intensity(Vec4::UNIT_Z, light.direction), 1.0);
    }

    #[test]
    fn grazing_light_is_dark() {
        let light = DirectionalLight::new(Vec4::direction(1.0, 0.0, 0.0));
        assert_relative_eq!(intensity(Vec4::UNIT_Z, light.direction), 0.0);
    }

    #[test]
    fn angled_illumination() {
        // Light pointing straight down (-Y), normal at 45 degrees
        let light = DirectionalLight::new(Vec4::direction(0.0, -1.0, 0.0));
        let normal = Vec4::direction(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(
            intensity(normal, light.direction),
            std::f32::consts::FRAC_1_SQRT_2,
            epsilon = 1e-6
        );
    }

    #[test]
    fn no_light_is_dark() {
        assert_eq!(intensity(Vec4::UNIT_Z, Vec4::ZERO), 0.0);
    }
}
