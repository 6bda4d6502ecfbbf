use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uvnraster::colors::Color;
use uvnraster::config::Viewport;
use uvnraster::geometry::cube;
use uvnraster::math::{Angles3D, Vec4};
use uvnraster::render::{DepthBuffer, PixelBuffer, RasterSettings, Rasterizer, ScreenVertex};
use uvnraster::scene::{Rotation, Scene, Translation};
use uvnraster::{Camera, Renderer};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

type Tri = [ScreenVertex; 3];

fn small_triangle() -> Tri {
    [
        ScreenVertex::new(100.0, 100.0, -2.0, Color::RED),
        ScreenVertex::new(120.0, 100.0, -2.0, Color::RED),
        ScreenVertex::new(110.0, 120.0, -2.0, Color::RED),
    ]
}

fn medium_triangle() -> Tri {
    [
        ScreenVertex::new(100.0, 100.0, -2.0, Color::RED),
        ScreenVertex::new(300.0, 100.0, -3.0, Color::RED),
        ScreenVertex::new(200.0, 300.0, -4.0, Color::RED),
    ]
}

fn large_triangle() -> Tri {
    [
        ScreenVertex::new(50.0, 50.0, -2.0, Color::RED),
        ScreenVertex::new(750.0, 100.0, -5.0, Color::RED),
        ScreenVertex::new(400.0, 550.0, -8.0, Color::RED),
    ]
}

fn settings(z_buffer: bool) -> RasterSettings {
    RasterSettings {
        viewport: Viewport::new(BUFFER_WIDTH, BUFFER_HEIGHT),
        z_buffer,
        wireframe: false,
    }
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        for (mode, z_buffer) in [("z_buffer", true), ("painter", false)] {
            group.bench_with_input(BenchmarkId::new(mode, name), &triangle, |b, tri| {
                let mut pixels = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                let mut depth = DepthBuffer::new();
                b.iter(|| {
                    depth.reset_for_frame(Viewport::new(BUFFER_WIDTH, BUFFER_HEIGHT));
                    let mut rasterizer = Rasterizer::new(settings(z_buffer), &mut depth, &mut pixels);
                    let [a, b, c] = *black_box(tri);
                    rasterizer.draw_triangle(a, b, c);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // Grid of small triangles
    let triangles: Vec<Tri> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                [
                    ScreenVertex::new(x, y, -2.0, Color::GREEN),
                    ScreenVertex::new(x + 35.0, y, -2.0, Color::GREEN),
                    ScreenVertex::new(x + 17.5, y + 25.0, -2.0, Color::GREEN),
                ]
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut pixels = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        let mut depth = DepthBuffer::new();
        b.iter(|| {
            depth.reset_for_frame(Viewport::new(BUFFER_WIDTH, BUFFER_HEIGHT));
            let mut rasterizer = Rasterizer::new(settings(true), &mut depth, &mut pixels);
            for &[a, b, c] in &triangles {
                rasterizer.draw_triangle(black_box(a), b, c);
            }
        });
    });

    group.finish();
}

fn benchmark_scene_frame(c: &mut Criterion) {
    let mut scene = Scene::new();
    let root = scene.insert_group();
    for i in 0..4 {
        let offset = (i as f32 - 1.5) * 0.6;
        let translation = scene
            .insert_child(root, Translation::new(Vec4::direction(offset, 0.0, 0.0)))
            .unwrap();
        let rotation = scene
            .insert_child(translation, Rotation::new(Angles3D::new(0.4, 0.7, 0.1)))
            .unwrap();
        scene
            .insert_child(rotation, cube(Vec4::ORIGIN, 0.3).unwrap())
            .unwrap();
    }

    let mut renderer = Renderer::default();
    renderer.setup_viewport(Viewport::new(BUFFER_WIDTH, BUFFER_HEIGHT));
    renderer.setup_camera(&Camera::default());
    let mut ctx = uvnraster::render::RenderContext::new();
    let mut pixels = PixelBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);

    c.bench_function("four_cube_frame", |b| {
        b.iter(|| renderer.render(&mut ctx, black_box(&scene), root, &mut pixels));
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_scene_frame
);
criterion_main!(benches);
