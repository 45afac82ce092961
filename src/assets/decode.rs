use std::path::Path;

use image::{DynamicImage, RgbaImage, imageops};

use crate::foundation::error::{SlotweaveError, SlotweaveResult};

/// Decode an image file and normalize it to straight RGBA8.
///
/// Decode failures (missing file, corrupt data, unsupported format) map to
/// [`SlotweaveError::InvalidImage`] carrying the offending path.
pub fn load_rgba(path: &Path) -> SlotweaveResult<RgbaImage> {
    let img = image::open(path).map_err(|e| SlotweaveError::invalid_image(path, e.to_string()))?;
    Ok(normalize_to_rgba(img))
}

/// Normalize any decoded image to four channels.
///
/// This is the single channel-normalization contract for the whole engine:
/// grayscale expands through RGB, RGB gains a fully opaque alpha channel, and
/// RGBA passes through with its alpha bytes untouched.
pub fn normalize_to_rgba(img: DynamicImage) -> RgbaImage {
    match img {
        // Passthrough keeps the original alpha bytes exactly.
        DynamicImage::ImageRgba8(rgba) => rgba,
        // Grayscale, grayscale+alpha, RGB and 16-bit inputs expand to four
        // channels; an opaque alpha is synthesized where the source has none.
        other => other.to_rgba8(),
    }
}

/// Crop an RGBA image to the tight bounding box of its non-transparent
/// pixels. A fully transparent image has no such box and is returned
/// unchanged.
pub fn crop_to_opaque_bounds(img: &RgbaImage) -> RgbaImage {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] > 0 {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !any {
        return img.clone();
    }

    let (w, h) = (max_x - min_x + 1, max_y - min_y + 1);
    if (min_x, min_y) == (0, 0) && (w, h) == img.dimensions() {
        return img.clone();
    }
    imageops::crop_imm(img, min_x, min_y, w, h).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
