//! Per-frame render pipeline.
//!
//! The [`Renderer`] holds the matrices derived from the viewport and camera
//! plus the user toggles. Each call to [`Renderer::render`]:
//!
//! 1. clears the surface to the background color
//! 2. starts a new depth frame
//! 3. sets the running transform to `Projection * Camera`
//! 4. zeroes the light direction
//! 5. walks the scene depth-first, composing translations and rotations
//!    into the running transform and drawing every mesh it reaches
//!
//! Each mesh triangle is transformed, rejected if any vertex falls outside
//! the near/far planes, divided by w, backface-culled against the fixed view
//! direction `(0, 0, -1)`, lit, mapped to pixels and rasterized.

use std::time::Instant;

use crate::camera::Camera;
use crate::colors::Color;
use crate::config::{RenderSettings, Viewport};
use crate::error::RenderError;
use crate::geometry::Mesh;
use crate::light;
use crate::math::{Angles3D, Frustum, Mat4, Vec4};
use crate::render::{RasterSettings, Rasterizer, RenderContext, ScreenVertex, Surface};
use crate::scene::{traverse, MatrixStack, NodeId, NodeVisitor, Scene};

/// Camera-space view direction used for backface culling.
const VIEW_DIRECTION: Vec4 = Vec4::direction(0.0, 0.0, -1.0);

/// Triangle counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: usize,
    pub frustum_culled: usize,
    pub backface_culled: usize,
    pub rasterized: usize,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    settings: RenderSettings,
    viewport: Option<Viewport>,
    viewport_matrix: Mat4,
    camera: Option<CameraSetup>,
}

#[derive(Debug, Clone, Copy)]
struct CameraSetup {
    view: Mat4,
    projection: Mat4,
    frustum: Frustum,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            viewport: None,
            viewport_matrix: Mat4::identity(),
            camera: None,
        }
    }

    /// Sets the pixel grid the scene is projected onto. Call before
    /// [`setup_camera`](Self::setup_camera).
    pub fn setup_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.viewport_matrix = Mat4::viewport(viewport.width, viewport.height);
    }

    /// Captures the camera's current view and projection. Call again after
    /// the camera moves.
    pub fn setup_camera(&mut self, camera: &Camera) {
        self.camera = Some(CameraSetup {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            frustum: *camera.frustum(),
        });
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    // ============ Toggles ============

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.settings.backface_culling = enabled;
        log::info!("Backface culling enabled: {enabled}");
    }

    pub fn is_backface_culling_enabled(&self) -> bool {
        self.settings.backface_culling
    }

    pub fn set_wireframe(&mut self, enabled: bool) {
        self.settings.wireframe = enabled;
        log::info!("Wireframe mode enabled: {enabled}");
    }

    pub fn is_wireframe_enabled(&self) -> bool {
        self.settings.wireframe
    }

    pub fn set_z_buffer(&mut self, enabled: bool) {
        self.settings.z_buffer = enabled;
        log::info!("Z-buffer enabled: {enabled}");
    }

    pub fn is_z_buffer_enabled(&self) -> bool {
        self.settings.z_buffer
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.settings.background = color;
    }

    pub fn background_color(&self) -> Color {
        self.settings.background
    }

    // ============ Frame ============

    /// Draws one frame. A failure is logged and the frame abandoned; the
    /// surface may be left partly drawn.
    pub fn render<S: Surface + ?Sized>(
        &self,
        ctx: &mut RenderContext,
        scene: &Scene,
        root: NodeId,
        surface: &mut S,
    ) -> Option<FrameStats> {
        match self.try_render(ctx, scene, root, surface) {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::error!("Error rendering frame: {e}");
                None
            }
        }
    }

    pub fn try_render<S: Surface + ?Sized>(
        &self,
        ctx: &mut RenderContext,
        scene: &Scene,
        root: NodeId,
        surface: &mut S,
    ) -> Result<FrameStats, RenderError> {
        let viewport = self.viewport.ok_or(RenderError::ViewportNotConfigured)?;
        let camera = self.camera.ok_or(RenderError::CameraNotConfigured)?;
        let start = Instant::now();

        surface.clear(self.settings.background);
        ctx.reset_for_frame(viewport, self.settings.z_buffer);

        let raster_settings = RasterSettings {
            viewport,
            z_buffer: self.settings.z_buffer,
            wireframe: self.settings.wireframe,
        };
        let mut pass = FramePass {
            transform: camera.projection * camera.view,
            light: Vec4::ZERO,
            frustum: camera.frustum,
            viewport_matrix: self.viewport_matrix,
            backface_culling: self.settings.backface_culling,
            stack: &mut ctx.matrix_stack,
            rasterizer: Rasterizer::new(raster_settings, &mut ctx.depth, surface),
            stats: FrameStats::default(),
        };

        traverse(scene, root, &mut pass)?;

        if !pass.stack.is_empty() {
            return Err(RenderError::UnbalancedMatrixStack(pass.stack.depth()));
        }

        let stats = pass.stats;
        log::debug!("Frame rendered in {:?}: {:?}", start.elapsed(), stats);
        Ok(stats)
    }
}

/// Traversal state for one frame.
struct FramePass<'a, S: Surface + ?Sized> {
    transform: Mat4,
    light: Vec4,
    frustum: Frustum,
    viewport_matrix: Mat4,
    backface_culling: bool,
    stack: &'a mut MatrixStack,
    rasterizer: Rasterizer<'a, S>,
    stats: FrameStats,
}

impl<S: Surface + ?Sized> FramePass<'_, S> {
    /// Transforms a triangle and divides x/y by w, keeping camera-space z.
    /// None if any vertex is outside the near/far planes or projects to a
    /// non-finite position.
    fn project(&self, positions: [Vec4; 3]) -> Option<[Vec4; 3]> {
        let mut projected = [Vec4::ZERO; 3];
        for (out, p) in projected.iter_mut().zip(positions) {
            let t = self.transform * p;
            if !self.frustum.contains_depth(t.z) || t.w == 0.0 {
                return None;
            }
            let (x, y) = (t.x / t.w, t.y / t.w);
            // A zero FOV puts the view plane at infinity.
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            *out = Vec4::point(x, y, t.z);
        }
        Some(projected)
    }
}

impl<S: Surface + ?Sized> NodeVisitor for FramePass<'_, S> {
    type Error = RenderError;

    fn mesh(&mut self, id: NodeId, mesh: &Mesh) -> Result<(), RenderError> {
        log::trace!("Processing mesh {:?} ({} triangles)", id, mesh.triangle_count());

        for triangle in mesh.triangles() {
            self.stats.submitted += 1;

            let Some(projected) = self.project(mesh.triangle_positions(triangle)) else {
                self.stats.frustum_culled += 1;
                continue;
            };

            let normal = Vec4::surface_normal(projected[0], projected[1], projected[2]);
            if self.backface_culling && normal.dot(VIEW_DIRECTION) > 0.0 {
                self.stats.backface_culled += 1;
                continue;
            }

            let color = mesh
                .base_color(triangle)
                .scaled(light::intensity(normal, self.light));
            let [a, b, c] = projected.map(|p| ScreenVertex {
                position: self.viewport_matrix * p,
                color,
            });
            self.rasterizer.draw_triangle(a, b, c);
            self.stats.rasterized += 1;
        }
        Ok(())
    }

    fn translation(&mut self, _id: NodeId, offset: Vec4) -> Result<(), RenderError> {
        self.transform = self.transform * Mat4::translation(offset.x, offset.y, offset.z);
        Ok(())
    }

    fn rotation(&mut self, _id: NodeId, angles: Angles3D) -> Result<(), RenderError> {
        self.transform = self.transform * Mat4::rotation_xyz(angles.x, angles.y, angles.z);
        Ok(())
    }

    fn light(&mut self, _id: NodeId, direction: Vec4) -> Result<(), RenderError> {
        self.light = direction.with_w(0.0);
        Ok(())
    }

    fn save(&mut self) -> Result<(), RenderError> {
        self.stack.push(self.transform);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        self.transform = self.stack.pop()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cube;
    use crate::light::DirectionalLight;
    use crate::render::PixelBuffer;
    use crate::scene::Translation;

    fn setup(settings: RenderSettings) -> (Renderer, RenderContext, PixelBuffer) {
        let mut renderer = Renderer::new(settings);
        renderer.setup_viewport(Viewport::new(64, 64));
        renderer.setup_camera(&Camera::default());
        (renderer, RenderContext::new(), PixelBuffer::new(64, 64))
    }

    #[test]
    fn render_requires_viewport_and_camera() {
        let mut scene = Scene::new();
        let root = scene.insert_group();
        let mut ctx = RenderContext::new();
        let mut surface = PixelBuffer::new(8, 8);

        let mut renderer = Renderer::default();
        assert_eq!(
            renderer.try_render(&mut ctx, &scene, root, &mut surface),
            Err(RenderError::ViewportNotConfigured)
        );
        renderer.setup_viewport(Viewport::new(8, 8));
        assert_eq!(
            renderer.try_render(&mut ctx, &scene, root, &mut surface),
            Err(RenderError::CameraNotConfigured)
        );
        assert!(renderer.render(&mut ctx, &scene, root, &mut surface).is_none());
    }

    #[test]
    fn clears_to_background() {
        let (mut renderer, mut ctx, mut surface) = setup(RenderSettings::default());
        renderer.set_background_color(Color::GRAY);
        let mut scene = Scene::new();
        let root = scene.insert_group();

        let stats = renderer.render(&mut ctx, &scene, root, &mut surface).unwrap();
        assert_eq!(stats, FrameStats::default());
        assert_eq!(surface.count(Color::GRAY), 64 * 64);
    }

    #[test]
    fn geometry_behind_near_plane_is_frustum_culled() {
        let (renderer, mut ctx, mut surface) = setup(RenderSettings::default());
        let mut scene = Scene::new();
        let root = scene.insert_group();
        // Eye sits at z = 2; a cube around it straddles the near plane.
        scene
            .insert_child(root, cube(Vec4::point(0.0, 0.0, 2.0), 1.0).unwrap())
            .unwrap();

        let stats = renderer.render(&mut ctx, &scene, root, &mut surface).unwrap();
        assert_eq!(stats.frustum_culled, 12);
        assert_eq!(stats.rasterized, 0);
    }

    #[test]
    fn unlit_scene_renders_black_triangles() {
        let (mut renderer, mut ctx, mut surface) = setup(RenderSettings::default());
        renderer.set_background_color(Color::GRAY);
        let mut scene = Scene::new();
        let root = scene.insert_group();
        scene.insert_child(root, cube(Vec4::ORIGIN, 1.0).unwrap()).unwrap();

        let stats = renderer.render(&mut ctx, &scene, root, &mut surface).unwrap();
        assert_eq!(stats.rasterized, 2);
        assert_eq!(surface.pixel(32, 32), Some(Color::BLACK));
    }

    #[test]
    fn siblings_do_not_inherit_each_others_translation() {
        let (renderer, mut ctx, mut surface) = setup(RenderSettings::default());
        let mut scene = Scene::new();
        let root = scene.insert_group();
        scene
            .insert_child(root, DirectionalLight::new(Vec4::direction(0.0, 0.0, -1.0)))
            .unwrap();
        // Pushes its child far behind the far plane.
        let away = scene
            .insert_child(root, Translation::new(Vec4::direction(0.0, 0.0, -500.0)))
            .unwrap();
        scene.insert_child(away, cube(Vec4::ORIGIN, 1.0).unwrap()).unwrap();
        // Sibling cube stays at the origin.
        let mut near = cube(Vec4::ORIGIN, 1.0).unwrap();
        near.set_color(Color::WHITE);
        scene.insert_child(root, near).unwrap();

        let stats = renderer.render(&mut ctx, &scene, root, &mut surface).unwrap();
        assert_eq!(stats.submitted, 24);
        assert_eq!(stats.frustum_culled, 12);
        assert_eq!(stats.rasterized, 2);
        assert_eq!(surface.pixel(32, 32), Some(Color::WHITE));
        assert!(ctx.matrix_stack.is_empty());
    }

    #[test]
    fn toggles_update_settings() {
        let mut renderer = Renderer::default();
        renderer.set_backface_culling(false);
        renderer.set_wireframe(true);
        renderer.set_z_buffer(false);
        assert!(!renderer.is_backface_culling_enabled());
        assert!(renderer.is_wireframe_enabled());
        assert!(!renderer.is_z_buffer_enabled());
    }
}
