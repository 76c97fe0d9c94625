//! Nearest-neighbor resizing
//!
//! Passing 0 for one target dimension keeps the source aspect ratio; the
//! missing side is derived from the given one.

use image::{GenericImageView, ImageBuffer, Pixel, RgbaImage};
use tracing::{debug, instrument};

/// Resolve the output size for a resize request.
///
/// - both targets set: used as-is
/// - one target 0: derived as `trunc(0.7 + given * other_src / given_src)`,
///   never less than 1
/// - both 0: the source size
pub fn target_dimensions(
    target_width: u32,
    target_height: u32,
    src_width: u32,
    src_height: u32,
) -> (u32, u32) {
    let derive = |given: u32, other_src: u32, given_src: u32| -> u32 {
        let derived = 0.7 + given as f64 * other_src as f64 / given_src as f64;
        (derived as u32).max(1)
    };

    match (target_width, target_height) {
        (0, 0) => (src_width, src_height),
        (0, h) => (derive(h, src_width, src_height), h),
        (w, 0) => (w, derive(w, src_height, src_width)),
        (w, h) => (w, h),
    }
}

/// Map a destination coordinate to its nearest source coordinate:
/// `round(dst * src_len / dst_len)`, clamped to the last source index
fn nearest_index(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let (dst, src_len, dst_len) = (dst as u64, src_len as u64, dst_len as u64);
    let rounded = (2 * dst * src_len + dst_len) / (2 * dst_len);
    rounded.min(src_len - 1) as u32
}

/// Resize `img` with nearest-neighbor sampling into a new RGBA buffer.
///
/// See [`target_dimensions`] for how zero targets are resolved. An empty
/// source (zero width or height) yields an empty 0x0 buffer.
#[instrument(skip(img), fields(src_w = img.width(), src_h = img.height()))]
pub fn resize<I>(target_width: u32, target_height: u32, img: &I) -> RgbaImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (src_width, src_height) = img.dimensions();
    if src_width == 0 || src_height == 0 {
        debug!("Empty source, nothing to sample");
        return ImageBuffer::new(0, 0);
    }

    let (out_width, out_height) =
        target_dimensions(target_width, target_height, src_width, src_height);

    let x_map: Vec<u32> = (0..out_width)
        .map(|x| nearest_index(x, src_width, out_width))
        .collect();

    let mut result: RgbaImage = ImageBuffer::new(out_width, out_height);
    for out_y in 0..out_height {
        let src_y = nearest_index(out_y, src_height, out_height);
        for (out_x, &src_x) in x_map.iter().enumerate() {
            result.put_pixel(out_x as u32, out_y, img.get_pixel(src_x, src_y).to_rgba());
        }
    }

    debug!(out_width, out_height, "Resize complete");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn numbered(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn test_keep_ratio_from_width() {
        let img: RgbaImage = ImageBuffer::from_pixel(1920, 1200, Rgba([255, 0, 0, 255]));
        let out = resize(2560, 0, &img);
        assert_eq!(out.dimensions(), (2560, 1600));
        assert!(out.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_keep_ratio_dimensions() {
        assert_eq!(target_dimensions(2560, 0, 1920, 1200), (2560, 1600));
        assert_eq!(target_dimensions(0, 600, 1920, 1200), (960, 600));
        assert_eq!(target_dimensions(0, 1600, 1920, 1200), (2560, 1600));
        // 100 * 3 / 7 = 42.86 -> trunc(43.56) = 43
        assert_eq!(target_dimensions(100, 0, 7, 3), (100, 43));
        // Never collapses to zero
        assert_eq!(target_dimensions(1, 0, 1000, 1), (1, 1));
    }

    #[test]
    fn test_keep_ratio_from_height() {
        let out = resize(0, 60, &numbered(192, 120));
        assert_eq!(out.dimensions(), (96, 60));
    }

    #[test]
    fn test_exact_dimensions() {
        let img = numbered(37, 11);
        for (w, h) in [(1, 1), (37, 11), (100, 3), (5, 200)] {
            assert_eq!(resize(w, h, &img).dimensions(), (w, h));
        }
    }

    #[test]
    fn test_both_zero_is_copy() {
        let img = numbered(13, 7);
        assert_eq!(resize(0, 0, &img), img);
    }

    #[test]
    fn test_same_size_is_copy() {
        let img = numbered(13, 7);
        assert_eq!(resize(13, 7, &img), img);
    }

    #[test]
    fn test_downscale_samples_nearest() {
        let out = resize(2, 2, &numbered(4, 4));
        assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([2, 0, 0, 255]));
        assert_eq!(*out.get_pixel(0, 1), Rgba([0, 2, 0, 255]));
        assert_eq!(*out.get_pixel(1, 1), Rgba([2, 2, 0, 255]));
    }

    #[test]
    fn test_upscale_copies_source_values() {
        let src = numbered(3, 2);
        let out = resize(9, 6, &src);
        for (_, _, p) in out.enumerate_pixels() {
            assert!(src.pixels().any(|s| s == p), "{:?} not in source", p);
        }
        assert_eq!(*out.get_pixel(0, 0), *src.get_pixel(0, 0));
        assert_eq!(*out.get_pixel(8, 5), *src.get_pixel(2, 1));
    }

    #[test]
    fn test_nearest_index_clamped() {
        assert_eq!(nearest_index(3, 2, 4), 1);
        assert_eq!(nearest_index(0, 2, 4), 0);
        assert_eq!(nearest_index(1, 4, 2), 2);
    }

    #[test]
    fn test_empty_source() {
        let img: RgbaImage = ImageBuffer::new(0, 5);
        assert_eq!(resize(10, 10, &img).dimensions(), (0, 0));
    }
}
