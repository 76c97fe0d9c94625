//! Color values and hex color parsing
//!
//! A color is a plain `Rgba<u8>`. Hex codes follow the web color notation:
//! an optional `#` followed by exactly six hex digits (`RRGGBB`), any case.
//! Parsed colors are always fully opaque.

use image::Rgba;
use crate::error::{Result, RecolorError};

/// Pixel value shared by every operation in this crate
pub type Color = Rgba<u8>;

/// Fully opaque alpha
pub const OPAQUE: u8 = u8::MAX;

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Parse a `RRGGBB` or `#RRGGBB` hex code into an opaque color.
///
/// Only a single leading `#` is stripped; the remaining body must be exactly
/// six hex digits. Seven-digit runs, trailing `#`, whitespace and any other
/// shape fail with [`RecolorError::InvalidHexFormat`].
pub fn parse_hex_color(text: &str) -> Result<Color> {
    let invalid = || RecolorError::InvalidHexFormat(text.to_string());

    let body = text.strip_prefix('#').unwrap_or(text).as_bytes();
    if body.len() != 6 {
        return Err(invalid());
    }

    let pair = |hi: u8, lo: u8| -> Result<u8> {
        let h = nibble(hi).ok_or_else(invalid)?;
        let l = nibble(lo).ok_or_else(invalid)?;
        Ok(h * 16 + l)
    };

    Ok(Rgba([
        pair(body[0], body[1])?,
        pair(body[2], body[3])?,
        pair(body[4], body[5])?,
        OPAQUE,
    ]))
}
