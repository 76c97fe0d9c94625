//! Pixel-level recoloring for RGBA images
//!
//! - [`color`]: hex color parsing
//! - [`model`]: color models (exact-match substitution, grayscale) and the
//!   applier that runs them over an image
//! - [`resize`]: nearest-neighbor resizing with aspect-ratio preservation
//! - [`processor`]: settings-driven pipeline composing the above

pub mod error;
pub mod color;
pub mod model;
pub mod resize;
pub mod processor;

pub use color::{parse_hex_color, Color};
pub use error::{Result, RecolorError};
pub use model::{apply_color_model, make_substitution, par_apply_color_model, Grayscale, PixelTransform, Substitution};
pub use processor::{process_image, recolor, RecolorResult, RecolorSettings};
pub use resize::resize;
