use std::path::Path;

use image::{RgbaImage, imageops};

use crate::assets::decode::load_rgba;
use crate::foundation::error::SlotweaveResult;
use crate::layout::slots::CanvasSize;

/// Load a background template as the accumulation canvas for one variant.
///
/// The image is normalized to RGBA8 and, when its dimensions differ from the
/// layout's mask, resampled to exactly `size` with cubic interpolation. An
/// already-matching background passes through byte-identical, avoiding
/// needless resampling artifacts.
pub fn load_canvas(path: &Path, size: CanvasSize) -> SlotweaveResult<RgbaImage> {
    let img = load_rgba(path)?;
    Ok(fit_canvas(img, size))
}

/// Resize an RGBA canvas to `size` with Catmull-Rom (cubic) interpolation,
/// or return it unchanged when it already matches.
pub fn fit_canvas(img: RgbaImage, size: CanvasSize) -> RgbaImage {
    if img.dimensions() == (size.width, size.height) {
        return img;
    }
    imageops::resize(&img, size.width, size.height, imageops::FilterType::CatmullRom)
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
