use std::time::{Duration, Instant};

use uvnraster::colors::PALETTE;
use uvnraster::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use uvnraster::interaction::Response;
use uvnraster::math::{DEG_TO_RAD, MAX_RADIANS};
use uvnraster::prelude::*;

const PIECE_WIDTH: f32 = 0.3;
const SPIN_INTERVAL: Duration = Duration::from_millis(10);

/// Rotation node and its per-tick increment.
struct Spinner {
    rotation: NodeId,
    step: Angles3D,
}

/// Builds a light over a row of four cubes, each under its own translation
/// and rotation.
fn build_scene(scene: &mut Scene) -> Result<(NodeId, Vec<NodeId>, Vec<Spinner>), String> {
    let root = scene.insert(DirectionalLight::new(Vec4::direction(0.0, 0.0, 1.0)));
    let group = scene.insert_child(root, NodeKind::Group).map_err(|e| e.to_string())?;

    let steps = [
        Angles3D::new(DEG_TO_RAD, 0.0, 0.0),
        Angles3D::new(0.0, DEG_TO_RAD, 0.0),
        Angles3D::new(0.0, 0.0, DEG_TO_RAD),
        Angles3D::new(DEG_TO_RAD, DEG_TO_RAD, DEG_TO_RAD),
    ];

    let mut translations = Vec::with_capacity(steps.len());
    let mut spinners = Vec::with_capacity(steps.len());
    for (i, step) in steps.into_iter().enumerate() {
        let offset = (i as f32 - 1.5) * PIECE_WIDTH * 2.0;
        let translation = scene
            .insert_child(group, Translation::new(Vec4::direction(offset, 0.0, 0.0)))
            .map_err(|e| e.to_string())?;
        let rotation = scene
            .insert_child(translation, Rotation::default())
            .map_err(|e| e.to_string())?;

        let mut mesh = cube(Vec4::ORIGIN, PIECE_WIDTH).map_err(|e| e.to_string())?;
        mesh.set_color(PALETTE[i % PALETTE.len()]);
        scene.insert_child(rotation, mesh).map_err(|e| e.to_string())?;

        translations.push(translation);
        spinners.push(Spinner { rotation, step });
    }

    Ok((root, translations, spinners))
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut window = Window::new("uvnraster", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut limiter = FrameLimiter::new(&window);

    let mut scene = Scene::new();
    let (root, translations, spinners) = build_scene(&mut scene)?;

    let mut scheduler = Scheduler::new();
    scheduler
        .add("Animated scene", SPIN_INTERVAL, move |scene: &mut Scene| {
            for spinner in &spinners {
                if let Some(rotation) = scene.rotation_mut(spinner.rotation) {
                    rotation.angles.inc_x(spinner.step.x, MAX_RADIANS);
                    rotation.angles.inc_y(spinner.step.y, MAX_RADIANS);
                    rotation.angles.inc_z(spinner.step.z, MAX_RADIANS);
                }
            }
        })
        .map_err(|e| e.to_string())?;

    let mut camera = Camera::default();
    let mut renderer = Renderer::default();
    renderer.setup_viewport(window.viewport());
    renderer.setup_camera(&camera);

    let mut controller = OrbitController::new();
    let mut ctx = RenderContext::new();
    let mut pixels = PixelBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut scale_factor = 1.0_f32;

    log::info!("Drag to orbit. R reset, W wireframe, B culling, Z z-buffer, P projection, Up/Down FOV, wheel spreads cubes");

    'running: loop {
        let mut redraw = false;

        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(width, height) => {
                    window.resize(width, height)?;
                    pixels.resize(width, height);
                    renderer.setup_viewport(window.viewport());
                    renderer.setup_camera(&camera);
                    redraw = true;
                }
                WindowEvent::Scroll(steps) => {
                    scale_factor = (scale_factor + steps as f32 / 10.0).clamp(1.0, 2.0);
                    for &id in &translations {
                        if let Some(translation) = scene.translation_mut(id) {
                            translation.scale_factor = scale_factor;
                        }
                    }
                    redraw = true;
                }
                WindowEvent::Input(input) => {
                    let response = controller.handle(input, &mut camera, &mut renderer);
                    redraw |= response == Response::Redraw;
                }
            }
        }

        if scheduler.poll(Instant::now(), &mut scene) > 0 {
            redraw = true;
        }

        if redraw {
            renderer.render(&mut ctx, &scene, root, &mut pixels);
            window.present(pixels.as_bytes())?;
        }

        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
