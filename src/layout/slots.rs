use std::collections::VecDeque;
use std::path::Path;

use image::{DynamicImage, GrayImage, imageops};

use crate::foundation::error::{SlotweaveError, SlotweaveResult};

/// Luminance cut separating layout background from slot regions.
pub const BINARY_THRESHOLD: u8 = 127;

/// Size of the slot canvas in pixels, fixed once derived from the layout
/// mask and never changed for that pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Bounding box of one slot in mask-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotBounds {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Box width, always >= 1.
    pub width: u32,
    /// Box height, always >= 1.
    pub height: u32,
}

/// One connected foreground region of a layout mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    /// Component label, 1-based; label 0 is the background and is excluded.
    pub label: u32,
    /// Tight bounding box of the region.
    pub bounds: SlotBounds,
    /// Mean pixel coordinate (cx, cy) of the region.
    pub centroid: (f64, f64),
}

/// Extracted layout: canvas dimensions plus the ordered slot list.
#[derive(Clone, Debug)]
pub struct LayoutSlots {
    /// Dimensions of the scaled binary mask.
    pub size: CanvasSize,
    /// Slots in label order (raster-scan order of first encounter).
    pub slots: Vec<Slot>,
}

/// Load a layout template and extract its slots.
///
/// The image is converted to single-channel luminance, thresholded at
/// [`BINARY_THRESHOLD`], scaled by `scaling_factor` with nearest-neighbor
/// interpolation (hard edges survive resampling), and labeled with
/// 8-connectivity. A mask with zero foreground components is valid and
/// yields zero slots.
#[tracing::instrument]
pub fn extract_slots(path: &Path, scaling_factor: f64) -> SlotweaveResult<LayoutSlots> {
    let img = image::open(path).map_err(|e| SlotweaveError::invalid_image(path, e.to_string()))?;
    slots_from_image(&img, scaling_factor)
}

/// Extract slots from an already decoded layout image.
pub fn slots_from_image(img: &DynamicImage, scaling_factor: f64) -> SlotweaveResult<LayoutSlots> {
    if !(scaling_factor.is_finite() && scaling_factor > 0.0) {
        return Err(SlotweaveError::validation(format!(
            "scaling_factor must be a positive finite number, got {scaling_factor}"
        )));
    }

    let mask = binarize(&img.to_luma8());
    let scaled = scale_mask(&mask, scaling_factor);
    let slots = label_components(&scaled);
    let (width, height) = scaled.dimensions();
    Ok(LayoutSlots {
        size: CanvasSize { width, height },
        slots,
    })
}

fn binarize(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    GrayImage::from_fn(w, h, |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        image::Luma([if v > BINARY_THRESHOLD { 255 } else { 0 }])
    })
}

fn scale_mask(mask: &GrayImage, factor: f64) -> GrayImage {
    if factor == 1.0 {
        return mask.clone();
    }
    let (w, h) = mask.dimensions();
    let new_w = ((f64::from(w) * factor).round() as u32).max(1);
    let new_h = ((f64::from(h) * factor).round() as u32).max(1);
    imageops::resize(mask, new_w, new_h, imageops::FilterType::Nearest)
}

/// Label 8-connected foreground components with a breadth-first flood fill,
/// accumulating bounds and centroid per component in one pass.
fn label_components(mask: &GrayImage) -> Vec<Slot> {
    let (w, h) = mask.dimensions();
    let (wi, hi) = (w as usize, h as usize);
    let raw = mask.as_raw();
    let mut labels = vec![0u32; wi * hi];
    let mut slots = Vec::new();
    let mut next_label = 1u32;
    let mut queue = VecDeque::new();

    for start_y in 0..hi {
        for start_x in 0..wi {
            let start = start_y * wi + start_x;
            if raw[start] == 0 || labels[start] != 0 {
                continue;
            }

            let label = next_label;
            next_label += 1;
            labels[start] = label;
            queue.push_back((start_x, start_y));

            let (mut min_x, mut min_y) = (start_x, start_y);
            let (mut max_x, mut max_y) = (start_x, start_y);
            let (mut sum_x, mut sum_y) = (0u64, 0u64);
            let mut count = 0u64;

            while let Some((x, y)) = queue.pop_front() {
                sum_x += x as u64;
                sum_y += y as u64;
                count += 1;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx < 0 || ny < 0 || nx >= wi as i64 || ny >= hi as i64 {
                            continue;
                        }
                        let n = ny as usize * wi + nx as usize;
                        if raw[n] != 0 && labels[n] == 0 {
                            labels[n] = label;
                            queue.push_back((nx as usize, ny as usize));
                        }
                    }
                }
            }

            slots.push(Slot {
                label,
                bounds: SlotBounds {
                    x: min_x as u32,
                    y: min_y as u32,
                    width: (max_x - min_x + 1) as u32,
                    height: (max_y - min_y + 1) as u32,
                },
                centroid: (
                    sum_x as f64 / count as f64,
                    sum_y as f64 / count as f64,
                ),
            });
        }
    }

    slots
}

#[cfg(test)]
#[path = "../../tests/unit/layout/slots.rs"]
mod tests;
