//! Render one of the built-in scenes to a plain-text PPM.
//!
//! Usage: `cargo run -p ember_renderer --example simple_render -- [scene]`

use ember_renderer::{build_scene, render, RenderConfig, SceneOptions};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene_index: u32 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(2);

    let width = 400;
    let aspect_ratio = 1.5;
    let height = ((width as f32 / aspect_ratio) as u32).max(1);

    let scene = build_scene(scene_index, &SceneOptions::default())?;
    let camera = scene.view.camera(aspect_ratio);
    let config = RenderConfig {
        samples_per_pixel: 20,
        max_depth: 10,
        background: scene.background,
        gather_emission: scene.gather_emission,
        ..RenderConfig::default()
    };

    let image = render(&camera, scene.world.as_ref(), width, height, &config);

    let filename = "output.ppm";
    save_ppm(&image.to_rgb8(), width, height, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn save_ppm(bytes: &[u8], width: u32, height: u32, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for rgb in bytes.chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}
