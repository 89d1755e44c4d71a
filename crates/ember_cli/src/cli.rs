use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
///
/// Every render option is optional here so that anything left unset falls
/// back to the settings file, then to the built-in defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "ember")]
#[command(about = "Offline Monte Carlo path tracer")]
pub struct Args {
    /// JSON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Width over height
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    #[arg(long, short = 's', help = "Number of samples per pixel")]
    pub samples_per_pixel: Option<u32>,

    #[arg(long, short = 'd', help = "Maximum bounces per path")]
    pub max_depth: Option<u32>,

    /// Scene preset: 1 random spheres, 2 checker spheres, 3 mesh,
    /// 4 perlin spheres, 5 earth, 6 simple light
    #[arg(long)]
    pub scene: Option<u32>,

    /// Seed for sampling and random scene content
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads, defaults to one per core
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// OBJ file for the mesh scene
    #[arg(long)]
    pub mesh: Option<PathBuf>,

    /// Image for the earth scene
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Output file path (.png or .ppm)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Let emissive materials add light regardless of the scene's choice
    #[arg(long)]
    pub emission: bool,
}
