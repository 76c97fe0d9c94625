//! Recolor one image file: `recolor <input> <output> [settings.json]`
//!
//! Settings JSON (every field optional):
//! `{ "replace": [{ "from": "FF0000", "to": "#0000FF" }], "grayscale": false, "width": 0, "height": 0 }`

use anyhow::{bail, Context};
use pixel_recolor::processor::{process_image, RecolorSettings};
use std::path::PathBuf;

const USAGE: &str = "usage: recolor <input> <output> [settings.json]
  settings.json: { \"replace\": [{ \"from\": \"FF0000\", \"to\": \"0000FF\" }], \"grayscale\": false, \"width\": 0, \"height\": 0 }";

fn load_settings(path: Option<&String>) -> anyhow::Result<RecolorSettings> {
    let Some(path) = path else {
        return Ok(RecolorSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings {}", path))?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("{}", USAGE);
    }

    let input_path = PathBuf::from(&args[0]);
    let output_path = PathBuf::from(&args[1]);
    let settings = load_settings(args.get(2))?;

    tracing::info!(input = %input_path.display(), "Recoloring");

    let result = process_image(input_path, output_path.clone(), settings)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    tracing::info!(output = %output_path.display(), "Output saved");

    Ok(())
}
