//! Host-agnostic input handling for an orbiting camera.
//!
//! The window layer translates its native events into [`InputEvent`]s and
//! feeds them to an [`OrbitController`], which updates the camera and the
//! renderer toggles. Every handled event asks for a redraw.

use crate::camera::Camera;
use crate::math::Angles3D;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Reset the camera.
    R,
    /// Toggle wireframe.
    W,
    /// Toggle backface culling.
    B,
    /// Toggle the z-buffer.
    Z,
    /// Toggle orthographic/perspective projection.
    P,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MousePressed { x: i32, y: i32 },
    MouseReleased,
    MouseDragged { x: i32, y: i32 },
    KeyPressed(Key),
}

/// Whether the host should draw a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Response {
    Redraw,
    Ignored,
}

/// Mouse drag orbits, keys toggle render state.
///
/// Dragging by `(dx, dy)` pixels rotates the camera `dy` degrees about its
/// U axis and `dx` degrees about its V axis.
#[derive(Debug, Clone, Default)]
pub struct OrbitController {
    last_mouse: Option<(i32, i32)>,
}

impl OrbitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event` and re-captures the camera into `renderer` when it moved.
    pub fn handle(
        &mut self,
        event: InputEvent,
        camera: &mut Camera,
        renderer: &mut Renderer,
    ) -> Response {
        match event {
            InputEvent::MousePressed { x, y } => {
                self.last_mouse = Some((x, y));
                Response::Ignored
            }
            InputEvent::MouseReleased => {
                self.last_mouse = None;
                Response::Ignored
            }
            InputEvent::MouseDragged { x, y } => {
                // A drag that started outside the window has no anchor yet.
                let Some((last_x, last_y)) = self.last_mouse.replace((x, y)) else {
                    return Response::Ignored;
                };
                let angles = Angles3D::new((y - last_y) as f32, (x - last_x) as f32, 0.0);
                camera.rotate_around_focus(angles);
                renderer.setup_camera(camera);
                Response::Redraw
            }
            InputEvent::KeyPressed(key) => {
                self.key_pressed(key, camera, renderer);
                Response::Redraw
            }
        }
    }

    fn key_pressed(&mut self, key: Key, camera: &mut Camera, renderer: &mut Renderer) {
        match key {
            Key::R => camera.reset(),
            Key::W => renderer.set_wireframe(!renderer.is_wireframe_enabled()),
            Key::B => renderer.set_backface_culling(!renderer.is_backface_culling_enabled()),
            Key::Z => renderer.set_z_buffer(!renderer.is_z_buffer_enabled()),
            Key::P => camera.set_orthographic(!camera.is_orthographic()),
            Key::Up => {
                let frustum = camera.frustum_mut();
                frustum.fov = (frustum.fov + 1.0) % 360.0;
                log::info!("Vertical FOV: {}", frustum.fov);
            }
            Key::Down => {
                let frustum = camera.frustum_mut();
                frustum.fov = (frustum.fov + 359.0) % 360.0;
                log::info!("Vertical FOV: {}", frustum.fov);
            }
        }
        renderer.setup_camera(camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    fn fixture() -> (OrbitController, Camera, Renderer) {
        let camera = Camera::default();
        let mut renderer = Renderer::default();
        renderer.setup_viewport(Viewport::new(32, 32));
        renderer.setup_camera(&camera);
        (OrbitController::new(), camera, renderer)
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let (mut controller, mut camera, mut renderer) = fixture();
        let response = controller.handle(
            InputEvent::MouseDragged { x: 50, y: 50 },
            &mut camera,
            &mut renderer,
        );
        assert_eq!(response, Response::Ignored);
        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn horizontal_drag_orbits_about_up_axis() {
        let (mut controller, mut camera, mut renderer) = fixture();
        let _ = controller.handle(InputEvent::MousePressed { x: 10, y: 10 }, &mut camera, &mut renderer);
        let response = controller.handle(
            InputEvent::MouseDragged { x: 100, y: 10 },
            &mut camera,
            &mut renderer,
        );

        assert_eq!(response, Response::Redraw);
        // 90 degrees of yaw keeps the eye at distance 2 in the y = 0 plane.
        assert_relative_eq!(camera.eye().y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.eye().z, 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.eye().x.abs(), 2.0, epsilon = 1e-4);
        assert_relative_eq!(camera.up(), Vec4::direction(0.0, 1.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn release_clears_drag_anchor() {
        let (mut controller, mut camera, mut renderer) = fixture();
        let _ = controller.handle(InputEvent::MousePressed { x: 0, y: 0 }, &mut camera, &mut renderer);
        let _ = controller.handle(InputEvent::MouseReleased, &mut camera, &mut renderer);
        let response = controller.handle(
            InputEvent::MouseDragged { x: 30, y: 0 },
            &mut camera,
            &mut renderer,
        );
        assert_eq!(response, Response::Ignored);
    }

    #[test]
    fn keys_toggle_renderer_state() {
        let (mut controller, mut camera, mut renderer) = fixture();
        for key in [Key::W, Key::B, Key::Z, Key::P] {
            assert_eq!(
                controller.handle(InputEvent::KeyPressed(key), &mut camera, &mut renderer),
                Response::Redraw
            );
        }
        assert!(renderer.is_wireframe_enabled());
        assert!(!renderer.is_backface_culling_enabled());
        assert!(!renderer.is_z_buffer_enabled());
        assert!(camera.is_orthographic());
    }

    #[test]
    fn fov_keys_wrap_modulo_360() {
        let (mut controller, mut camera, mut renderer) = fixture();
        camera.frustum_mut().fov = 359.0;
        let _ = controller.handle(InputEvent::KeyPressed(Key::Up), &mut camera, &mut renderer);
        assert_eq!(camera.frustum().fov, 0.0);
        let _ = controller.handle(InputEvent::KeyPressed(Key::Down), &mut camera, &mut renderer);
        assert_eq!(camera.frustum().fov, 359.0);
    }

    #[test]
    fn reset_restores_default_camera() {
        let (mut controller, mut camera, mut renderer) = fixture();
        camera.set_eye(Vec4::point(5.0, 5.0, 5.0));
        let _ = controller.handle(InputEvent::KeyPressed(Key::R), &mut camera, &mut renderer);
        assert_eq!(camera, Camera::default());
    }
}
