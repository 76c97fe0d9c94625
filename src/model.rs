//! Color models
//!
//! A color model is anything implementing [`PixelTransform`]: a pure
//! per-pixel mapping. Models are applied with [`apply_color_model`], which
//! never touches its input and always returns a freshly allocated RGBA image
//! of the same size.
//!
//! Built-in models:
//! - [`Substitution`]: exact-match replacement of one color with another
//! - [`Grayscale`]: BT.601 luma, opaque output
//!
//! Any `Fn(Color) -> Color` closure is also a model.

use image::{GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage};
use rayon::prelude::*;
use crate::color::{Color, OPAQUE};

/// A deterministic, side-effect-free mapping from one pixel to another
pub trait PixelTransform {
    fn convert(&self, pixel: Color) -> Color;
}

impl<F> PixelTransform for F
where
    F: Fn(Color) -> Color,
{
    fn convert(&self, pixel: Color) -> Color {
        self(pixel)
    }
}

// ============================================================================
// SUBSTITUTION
// ============================================================================

/// Replace every pixel exactly equal to `from` (all four channels) with `to`.
/// Everything else passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub from: Color,
    pub to: Color,
}

impl Substitution {
    pub fn new(from: Color, to: Color) -> Self {
        Self { from, to }
    }

    /// True when applying this rule can never change a pixel
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

impl PixelTransform for Substitution {
    fn convert(&self, pixel: Color) -> Color {
        if pixel == self.from {
            self.to
        } else {
            pixel
        }
    }
}

/// Build an exact-match substitution rule
pub fn make_substitution(from: Color, to: Color) -> Substitution {
    Substitution::new(from, to)
}

// ============================================================================
// GRAYSCALE
// ============================================================================

/// Luma conversion using the 16.16 fixed-point BT.601 weights
/// (0.299, 0.587, 0.114).
///
/// Channels are weighted by alpha before conversion and the result is always
/// opaque, so a transparent pixel becomes black.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grayscale;

impl PixelTransform for Grayscale {
    fn convert(&self, pixel: Color) -> Color {
        let Rgba([r, g, b, a]) = pixel;
        // 16 bits per channel so the weights sum to exactly 1 << 16
        let alpha = a as u32 * 0x101;
        let weigh = |c: u8| c as u32 * 0x101 * alpha / 0xffff;
        let y = (19595 * weigh(r) + 38470 * weigh(g) + 7471 * weigh(b) + (1 << 15)) >> 24;
        let y = y as u8;
        Rgba([y, y, y, OPAQUE])
    }
}

// ============================================================================
// APPLIER
// ============================================================================

/// Apply a color model to every pixel of `img`, writing into a new buffer.
///
/// Source pixels are converted to RGBA8 before the model sees them, so rules
/// always compare against one channel representation regardless of the
/// source layout (RGB, luma, RGBA...).
pub fn apply_color_model<I, T>(img: &I, model: &T) -> RgbaImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
    T: PixelTransform + ?Sized,
{
    let (width, height) = img.dimensions();
    let mut result: RgbaImage = ImageBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let pixel = img.get_pixel(x, y).to_rgba();
            result.put_pixel(x, y, model.convert(pixel));
        }
    }

    result
}

/// Parallel [`apply_color_model`] for RGBA8 buffers.
///
/// Pixels are split across the rayon pool one 4-byte pixel at a time. They
/// have no cross-dependencies, so the output is identical to the sequential
/// version.
pub fn par_apply_color_model<T>(img: &RgbaImage, model: &T) -> RgbaImage
where
    T: PixelTransform + Sync + ?Sized,
{
    let mut result = img.clone();

    result.par_chunks_exact_mut(4).for_each(|px| {
        let mapped = model.convert(Rgba([px[0], px[1], px[2], px[3]]));
        px.copy_from_slice(&mapped.0);
    });

    result
}

/// Count pixels exactly equal to `color`
pub fn count_matches<I>(img: &I, color: Color) -> u64
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    img.pixels()
        .filter(|(_, _, pixel)| pixel.to_rgba() == color)
        .count() as u64
}

// ============================================================================
// TESTS
// ============================================================================
