use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
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

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Two spheres resting on a large ground sphere under one area light
    Default,
    /// One red sphere in front of the camera
    SingleSphere,
    /// A row of spheres showing each material preset
    Materials,
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A Whitted-style ray tracer for spheres")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "default")]
    pub scene: SceneChoice,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// JSON file with render settings; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels (height follows the scene's aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Camera samples per pixel, overrides the config file
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Base RNG seed, overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lumen"]);
        assert_eq!(args.scene, SceneChoice::Default);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert!(args.config.is_none());
        assert!(args.width.is_none());
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "lumen",
            "--scene",
            "single-sphere",
            "-o",
            "sphere.png",
            "--width",
            "320",
            "--samples",
            "16",
            "--seed",
            "9",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.scene, SceneChoice::SingleSphere);
        assert_eq!(args.output, PathBuf::from("sphere.png"));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.seed, Some(9));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["lumen", "--scene", "teapot"]).is_err());
    }
}
