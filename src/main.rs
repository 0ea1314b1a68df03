//! Prism Engine: scanline software 3D rasterizer
//!
//! Renders a scene of posed triangle meshes entirely on the CPU:
//! - Half-open scanline interpolation
//! - Wireframe, flat and per-vertex shaded triangle fills
//! - Full model -> view -> projection -> viewport vertex pipeline
//! - Painter-order output (no z-buffer, no clipping)

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod scene;

use macroquad::prelude::*;
use rasterizer::{Camera, FillMode, Framebuffer, RenderSettings, Vec3, HEIGHT, WIDTH};
use scene::{load_scene, render_scene, save_scene, Instance, Model, Scene, Transform};

const SCENE_PATH: &str = "scene.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Prism Engine v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Two cubes orbited by the camera
fn demo_scene() -> Scene {
    let cube = Model::cube("cube");
    let mut scene = Scene::new();
    scene.add_instance(Instance::new(
        cube.clone(),
        Transform::at(Vec3::new(-1.6, 0.0, 0.0)).with_rotation(Vec3::UP, 25.0),
    ));
    scene.add_instance(Instance::new(
        cube,
        Transform::at(Vec3::new(1.4, 0.6, -2.5))
            .with_rotation(Vec3::new(1.0, 1.0, 0.0), -40.0)
            .with_scale(Vec3::new(0.75, 0.75, 0.75)),
    ));
    scene
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let mut scene = demo_scene();
    let mut settings = RenderSettings {
        fill_mode: FillMode::Shaded,
        ..Default::default()
    };

    println!("=== Prism Engine v{} ===", VERSION);
    println!("1: wireframe  2: flat  3: shaded");
    println!("P: save frame.png  F5: save {}  F9: load {}", SCENE_PATH, SCENE_PATH);

    loop {
        if is_key_pressed(KeyCode::Key1) {
            settings.fill_mode = FillMode::Wireframe;
        }
        if is_key_pressed(KeyCode::Key2) {
            settings.fill_mode = FillMode::Flat;
        }
        if is_key_pressed(KeyCode::Key3) {
            settings.fill_mode = FillMode::Shaded;
        }
        if is_key_pressed(KeyCode::P) {
            match fb.save_png("frame.png") {
                Ok(()) => println!("Saved frame.png"),
                Err(e) => eprintln!("{}", e),
            }
        }
        if is_key_pressed(KeyCode::F5) {
            match save_scene(&scene, SCENE_PATH) {
                Ok(()) => println!("Saved {}", SCENE_PATH),
                Err(e) => eprintln!("Save failed: {}", e),
            }
        }
        if is_key_pressed(KeyCode::F9) {
            match load_scene(SCENE_PATH) {
                Ok(loaded) => {
                    println!("Loaded {} ({} instances)", SCENE_PATH, loaded.instances.len());
                    scene = loaded;
                }
                Err(e) => eprintln!("Load failed: {}", e),
            }
        }

        // Orbit the camera around the scene
        let t = get_time() as f32 * 0.5;
        let camera = Camera::new(Vec3::new(6.0 * t.sin(), 2.0, 6.0 * t.cos()), Vec3::ZERO);

        fb.clear(settings.background);
        if let Err(e) = render_scene(&mut fb, &scene, &camera, &settings) {
            eprintln!("Render failed: {}", e);
        }

        // Blit the framebuffer to the window
        clear_background(BLACK);
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
