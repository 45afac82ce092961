use std::path::Path;

use image::{RgbaImage, imageops};

use crate::assets::decode::{crop_to_opaque_bounds, load_rgba};
use crate::foundation::error::SlotweaveResult;
use crate::layout::slots::{Slot, SlotBounds};

/// Outcome of placing one asset into one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Asset pixels were merged into the canvas.
    Merged,
    /// The clamped placement rectangle had no area; the canvas is untouched.
    Clipped,
}

/// Load a foreground asset and shape it for a slot: normalize to RGBA, crop
/// to the tight bounding box of non-transparent pixels (a fully transparent
/// asset is used uncropped), then resize to the slot's exact dimensions.
pub fn prepare_asset(path: &Path, bounds: SlotBounds) -> SlotweaveResult<RgbaImage> {
    let img = load_rgba(path)?;
    let cropped = crop_to_opaque_bounds(&img);
    Ok(imageops::resize(
        &cropped,
        bounds.width,
        bounds.height,
        imageops::FilterType::Triangle,
    ))
}

/// Merge a prepared asset into the canvas, centered on the slot centroid.
///
/// The placement origin is `round(centroid - size/2)` clamped to the canvas;
/// a placement whose clamped rectangle has no area is skipped silently and
/// reported as [`Placement::Clipped`] so callers can count it.
///
/// When the destination region is entirely transparent the asset's bytes are
/// copied in directly. Otherwise the RGB channels are alpha-blended with the
/// asset's alpha as weight; the destination alpha channel is left untouched
/// either way, matching the original compositor's observed behavior.
pub fn place_into_slot(canvas: &mut RgbaImage, asset: &RgbaImage, slot: &Slot) -> Placement {
    let (canvas_w, canvas_h) = canvas.dimensions();
    let (asset_w, asset_h) = asset.dimensions();
    let (cx, cy) = slot.centroid;

    let x_min = (cx - f64::from(asset_w) / 2.0).round().max(0.0) as u32;
    let y_min = (cy - f64::from(asset_h) / 2.0).round().max(0.0) as u32;
    let x_max = (x_min.saturating_add(asset_w)).min(canvas_w);
    let y_max = (y_min.saturating_add(asset_h)).min(canvas_h);

    if x_max <= x_min || y_max <= y_min {
        return Placement::Clipped;
    }

    if region_fully_transparent(canvas, x_min, y_min, x_max, y_max) {
        // Direct copy: asset pixels land byte-for-byte, clipped at the
        // canvas edge.
        for y in 0..(y_max - y_min) {
            for x in 0..(x_max - x_min) {
                canvas.put_pixel(x_min + x, y_min + y, *asset.get_pixel(x, y));
            }
        }
        return Placement::Merged;
    }

    for y in 0..(y_max - y_min) {
        for x in 0..(x_max - x_min) {
            let fg = asset.get_pixel(x, y).0;
            let bg = canvas.get_pixel_mut(x_min + x, y_min + y);
            let alpha = f32::from(fg[3]) / 255.0;
            let inv = 1.0 - alpha;
            for c in 0..3 {
                bg.0[c] =
                    (alpha * f32::from(fg[c]) + inv * f32::from(bg.0[c])).round() as u8;
            }
            // bg.0[3] deliberately untouched.
        }
    }
    Placement::Merged
}

fn region_fully_transparent(
    canvas: &RgbaImage,
    x_min: u32,
    y_min: u32,
    x_max: u32,
    y_max: u32,
) -> bool {
    for y in y_min..y_max {
        for x in x_min..x_max {
            if canvas.get_pixel(x, y).0[3] != 0 {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
