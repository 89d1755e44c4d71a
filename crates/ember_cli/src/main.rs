mod cli;
mod output;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{build_scene, render, RenderConfig, SceneOptions};
use log::LevelFilter;

use crate::cli::Args;
use crate::settings::Settings;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    let settings = Settings::resolve(&args)?;

    if let Some(threads) = settings.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the render thread pool")?;
    }

    run(&settings)
}

fn run(settings: &Settings) -> Result<()> {
    let width = settings.image_width;
    let height = settings.image_height();

    let options = SceneOptions {
        mesh_path: settings.mesh_path.clone(),
        texture_path: settings.texture_path.clone(),
        seed: settings.seed,
    };
    let scene = build_scene(settings.scene_index, &options)
        .with_context(|| format!("failed to build scene {}", settings.scene_index))?;

    let view = settings.camera.apply(scene.view);
    let camera = view.camera(settings.aspect_ratio);

    let config = RenderConfig {
        samples_per_pixel: settings.samples_per_pixel,
        max_depth: settings.max_depth,
        background: scene.background,
        gather_emission: scene.gather_emission || settings.gather_emission,
        seed: settings.seed,
        ..RenderConfig::default()
    };

    let image = render(&camera, scene.world.as_ref(), width, height, &config);
    output::save_image(&settings.output, &image.to_rgb8(), width, height)
}
