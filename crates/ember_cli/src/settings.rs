//! Render settings.
//!
//! Built-in defaults are overlaid by an optional JSON file, which is in turn
//! overlaid by explicit command line flags.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ember_math::Vec3;
use ember_renderer::View;
use serde::Deserialize;

use crate::cli::Args;

/// Largest RGB8 output accepted, in bytes.
pub const MAX_IMAGE_BYTES: u64 = u32::MAX as u64;

/// Partial camera override; unset fields keep the scene's framing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub lookfrom: Option<[f32; 3]>,
    pub lookat: Option<[f32; 3]>,
    pub vup: Option<[f32; 3]>,
    pub vfov: Option<f32>,
    pub aperture: Option<f32>,
    pub focus_distance: Option<f32>,
}

impl CameraSettings {
    pub fn apply(&self, view: View) -> View {
        View {
            look_from: self.lookfrom.map_or(view.look_from, Vec3::from_array),
            look_at: self.lookat.map_or(view.look_at, Vec3::from_array),
            vup: self.vup.map_or(view.vup, Vec3::from_array),
            vfov: self.vfov.unwrap_or(view.vfov),
            aperture: self.aperture.unwrap_or(view.aperture),
            focus_dist: self.focus_distance.unwrap_or(view.focus_dist),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub image_width: u32,
    pub aspect_ratio: f32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub scene_index: u32,
    pub seed: u64,
    pub camera: CameraSettings,
    pub mesh_path: Option<PathBuf>,
    pub texture_path: Option<PathBuf>,
    pub output: PathBuf,
    /// Force emission gathering on; scenes with lights enable it themselves
    pub gather_emission: bool,
    pub threads: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_width: 640,
            aspect_ratio: 1.5,
            samples_per_pixel: 30,
            max_depth: 30,
            scene_index: 1,
            seed: 0,
            camera: CameraSettings::default(),
            mesh_path: None,
            texture_path: None,
            output: PathBuf::from("output.png"),
            gather_emission: false,
            threads: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open settings file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    /// Defaults, then the `--config` file if given, then explicit flags.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.image_width = width;
        }
        if let Some(aspect_ratio) = args.aspect_ratio {
            self.aspect_ratio = aspect_ratio;
        }
        if let Some(spp) = args.samples_per_pixel {
            self.samples_per_pixel = spp;
        }
        if let Some(depth) = args.max_depth {
            self.max_depth = depth;
        }
        if let Some(scene) = args.scene {
            self.scene_index = scene;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(threads) = args.threads {
            self.threads = Some(threads);
        }
        if let Some(mesh) = &args.mesh {
            self.mesh_path = Some(mesh.clone());
        }
        if let Some(texture) = &args.texture {
            self.texture_path = Some(texture.clone());
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        self.gather_emission |= args.emission;
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.image_width > 0, "image width must be positive");
        anyhow::ensure!(
            self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0,
            "aspect ratio must be positive, got {}",
            self.aspect_ratio
        );
        anyhow::ensure!(self.samples_per_pixel > 0, "samples per pixel must be positive");

        let height = self.image_height();
        let bytes = (self.image_width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(3));
        anyhow::ensure!(
            bytes.is_some_and(|bytes| bytes <= MAX_IMAGE_BYTES),
            "{}x{} image is too large (aspect ratio {})",
            self.image_width,
            height,
            self.aspect_ratio
        );
        Ok(())
    }

    /// Image height derived from width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.image_width, 640);
        assert_eq!(settings.image_height(), 426);
        assert_eq!(settings.samples_per_pixel, 30);
        assert_eq!(settings.max_depth, 30);
        assert_eq!(settings.scene_index, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "image_width": 200,
            "scene_index": 2,
            "camera": { "vfov": 35.0, "lookfrom": [1.0, 2.0, 3.0] }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.image_width, 200);
        assert_eq!(settings.scene_index, 2);
        assert_eq!(settings.aspect_ratio, 1.5);
        assert_eq!(settings.camera.vfov, Some(35.0));
        assert!(settings.camera.aperture.is_none());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Settings, _> = serde_json::from_str(r#"{ "widht": 10 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let path = std::env::temp_dir().join("ember_settings_override_test.json");
        std::fs::write(&path, r#"{ "image_width": 300, "max_depth": 4, "seed": 9 }"#).unwrap();

        let args = Args::parse_from([
            "ember",
            "--config",
            path.to_str().unwrap(),
            "--width",
            "120",
        ]);
        let settings = Settings::resolve(&args).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.image_width, 120);
        assert_eq!(settings.max_depth, 4);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.samples_per_pixel, 30);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args = Args::parse_from(["ember", "--config", "no/such/settings.json"]);
        assert!(Settings::resolve(&args).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let args = Args::parse_from(["ember", "--width", "0"]);
        assert!(Settings::resolve(&args).is_err());

        let settings = Settings {
            aspect_ratio: 0.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_image_rejected() {
        // 640 wide at aspect 0.0001 is 6.4 million rows
        let args = Args::parse_from(["ember", "--width", "640", "--aspect-ratio", "0.0001"]);
        assert!(Settings::resolve(&args).is_err());

        let settings = Settings {
            image_width: u32::MAX,
            aspect_ratio: 1e-30,
            ..Settings::default()
        };
        assert_eq!(settings.image_height(), u32::MAX);
        assert!(settings.validate().is_err());

        // 3 billion bytes still fits
        let settings = Settings {
            image_width: 100_000,
            aspect_ratio: 10.0,
            ..Settings::default()
        };
        assert_eq!(settings.image_height(), 10_000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_height_never_zero() {
        let settings = Settings {
            image_width: 1,
            aspect_ratio: 4.0,
            ..Settings::default()
        };
        assert_eq!(settings.image_height(), 1);
    }

    #[test]
    fn test_camera_override() {
        let view = View {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            aperture: 0.1,
            focus_dist: 10.0,
        };
        let camera = CameraSettings {
            lookat: Some([0.0, 1.0, 0.0]),
            aperture: Some(0.0),
            ..CameraSettings::default()
        };

        let result = camera.apply(view);
        assert_eq!(result.look_from, view.look_from);
        assert_eq!(result.look_at, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(result.aperture, 0.0);
        assert_eq!(result.vfov, 20.0);
    }
}
