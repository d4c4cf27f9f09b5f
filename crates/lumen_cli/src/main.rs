//! Lumen command-line renderer.
//!
//! Builds one of the built-in scenes, renders it and writes a PNG.

mod cli;
mod logger;
mod scenes;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lumen_renderer::{render, RenderConfig};

use crate::cli::Args;
use crate::logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let scene = scenes::build(args.scene, args.width);
    info!("Scene {:?} ready", args.scene);

    let image = render(&scene, &config).context("Render failed")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    info!("Wrote {}", args.output.display());
    Ok(())
}

/// Read render settings from a JSON file.
fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let config =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))?;
    info!("Loaded render settings from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let path = std::env::temp_dir().join(format!("lumen-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "light_samples": 3, "gloss": 0.0 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.light_samples, 3);
        assert_eq!(config.gloss, 0.0);
        assert_eq!(config.samples_per_pixel, RenderConfig::default().samples_per_pixel);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_config_errors() {
        let missing = std::env::temp_dir().join("lumen-no-such-config.json");
        let err = load_config(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));

        let path = std::env::temp_dir().join(format!("lumen-bad-config-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        fs::remove_file(&path).ok();
    }
}
