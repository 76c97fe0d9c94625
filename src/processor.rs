//! Recolor pipeline
//!
//! Composes the individual operations into one job described by
//! [`RecolorSettings`]:
//! 1. Color replacement - ordered exact-match substitutions
//! 2. Grayscale - optional luma conversion
//! 3. Resize - optional nearest-neighbor resize
//!
//! [`recolor`] works purely in memory; [`process_image`] wraps it with
//! loading and saving through the `image` codecs.

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use crate::color::parse_hex_color;
use crate::error::{Result, RecolorError};
use crate::model::{count_matches, par_apply_color_model, Grayscale, Substitution};
use crate::resize::resize;

// ============================================================================
// SETTINGS
// ============================================================================

/// One `from -> to` replacement, both as hex codes (`RRGGBB` or `#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReplacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecolorSettings {
    /// Replacements applied in order; a later rule sees the output of earlier ones
    pub replace: Vec<ColorReplacement>,
    /// Convert to grayscale after replacements (default: false)
    pub grayscale: bool,
    /// Target width, 0 = derive from height (default: 0)
    pub width: u32,
    /// Target height, 0 = derive from width (default: 0)
    pub height: u32,
}

impl Default for RecolorSettings {
    fn default() -> Self {
        Self {
            replace: Vec::new(),
            grayscale: false,
            width: 0,
            height: 0,
        }
    }
}

impl RecolorSettings {
    /// Parse every replacement color, failing before any pixel work is done
    pub fn validate(&self) -> Result<Vec<Substitution>> {
        self.replace
            .iter()
            .map(|r| Ok(Substitution::new(parse_hex_color(&r.from)?, parse_hex_color(&r.to)?)))
            .collect()
    }

    /// Whether a resize step will run
    pub fn resizes(&self) -> bool {
        self.width > 0 || self.height > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecolorResult {
    pub original_size: (u32, u32),
    pub final_size: (u32, u32),
    /// Pixels changed by the replacement rules, summed over all rules
    pub pixels_replaced: u64,
}

// ============================================================================
// IN-MEMORY PIPELINE
// ============================================================================

/// Run the whole job on an in-memory image
pub fn recolor(img: &DynamicImage, settings: &RecolorSettings) -> Result<(RgbaImage, RecolorResult)> {
    let rules = settings.validate()?;
    Ok(run_pipeline(img, &rules, settings))
}

#[instrument(skip_all, fields(width = img.width(), height = img.height(), rules = rules.len()))]
fn run_pipeline(
    img: &DynamicImage,
    rules: &[Substitution],
    settings: &RecolorSettings,
) -> (RgbaImage, RecolorResult) {
    let mut rgba = img.to_rgba8();
    let original_size = rgba.dimensions();

    // Step 1: Replacements
    let mut pixels_replaced = 0;
    for rule in rules.iter().filter(|r| !r.is_identity()) {
        let matched = count_matches(&rgba, rule.from);
        debug!(from = ?rule.from, to = ?rule.to, matched, "Replacing color");
        if matched > 0 {
            rgba = par_apply_color_model(&rgba, rule);
            pixels_replaced += matched;
        }
    }

    // Step 2: Grayscale
    if settings.grayscale {
        debug!("Converting to grayscale");
        rgba = par_apply_color_model(&rgba, &Grayscale);
    }

    // Step 3: Resize
    if settings.resizes() {
        rgba = resize(settings.width, settings.height, &rgba);
    }

    let result = RecolorResult {
        original_size,
        final_size: rgba.dimensions(),
        pixels_replaced,
    };
    info!(
        final_w = result.final_size.0,
        final_h = result.final_size.1,
        pixels_replaced,
        "Recolor complete"
    );

    (rgba, result)
}

// ============================================================================
// FILE ENTRY POINT
// ============================================================================

/// Load `input_path`, run the job and save to `output_path`.
/// The output format is inferred from the file extension.
#[instrument(skip(settings), fields(input = %input_path.display(), output = %output_path.display()))]
pub fn process_image(
    input_path: PathBuf,
    output_path: PathBuf,
    settings: RecolorSettings,
) -> Result<RecolorResult> {
    // Fail on bad colors before decoding anything
    let rules = settings.validate()?;

    let img = image::open(&input_path)
        .map_err(|e| RecolorError::Processing(format!("Failed to load {}: {}", input_path.display(), e)))?;

    let (rgba, result) = run_pipeline(&img, &rules, &settings);
    write_output(&rgba, &output_path)?;

    Ok(result)
}

/// Save the recolored buffer, creating missing parent directories
fn write_output(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    debug!(path = %path.display(), "Output written");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
