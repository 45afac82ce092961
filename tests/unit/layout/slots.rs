use image::{DynamicImage, GrayImage};

use super::*;

fn mask_with_rects(w: u32, h: u32, rects: &[(u32, u32, u32, u32)]) -> DynamicImage {
    let mut gray = GrayImage::new(w, h);
    for &(x0, y0, rw, rh) in rects {
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                gray.put_pixel(x, y, image::Luma([255]));
            }
        }
    }
    DynamicImage::ImageLuma8(gray)
}

#[test]
fn component_count_excludes_background() {
    let img = mask_with_rects(40, 40, &[(2, 2, 5, 5), (20, 2, 5, 5), (2, 20, 5, 5)]);
    let layout = slots_from_image(&img, 1.0).unwrap();
    assert_eq!(layout.slots.len(), 3);
    assert_eq!(layout.size, CanvasSize { width: 40, height: 40 });
    for (i, slot) in layout.slots.iter().enumerate() {
        assert_eq!(slot.label, i as u32 + 1);
    }
}

#[test]
fn empty_mask_is_valid_with_zero_slots() {
    let img = mask_with_rects(16, 16, &[]);
    let layout = slots_from_image(&img, 1.0).unwrap();
    assert!(layout.slots.is_empty());
}

#[test]
fn diagonally_touching_regions_merge_under_8_connectivity() {
    // Two squares meeting only at a corner: (4,4)..(8,8) and (8,8)..(12,12).
    let img = mask_with_rects(16, 16, &[(4, 4, 4, 4), (8, 8, 4, 4)]);
    let layout = slots_from_image(&img, 1.0).unwrap();
    assert_eq!(layout.slots.len(), 1);
    let slot = &layout.slots[0];
    assert_eq!(
        slot.bounds,
        SlotBounds { x: 4, y: 4, width: 8, height: 8 }
    );
}

#[test]
fn bounds_and_centroid_of_a_square() {
    let img = mask_with_rects(32, 32, &[(10, 6, 8, 4)]);
    let layout = slots_from_image(&img, 1.0).unwrap();
    let slot = &layout.slots[0];
    assert_eq!(
        slot.bounds,
        SlotBounds { x: 10, y: 6, width: 8, height: 4 }
    );
    // Mean pixel coordinate of x in 10..=17 is 13.5, of y in 6..=9 is 7.5.
    assert_eq!(slot.centroid, (13.5, 7.5));
}

#[test]
fn threshold_splits_at_127() {
    let mut gray = GrayImage::new(4, 1);
    gray.put_pixel(0, 0, image::Luma([127])); // background
    gray.put_pixel(1, 0, image::Luma([128])); // foreground
    let layout = slots_from_image(&DynamicImage::ImageLuma8(gray), 1.0).unwrap();
    assert_eq!(layout.slots.len(), 1);
    assert_eq!(layout.slots[0].bounds, SlotBounds { x: 1, y: 0, width: 1, height: 1 });
}

#[test]
fn scaling_resizes_canvas_and_slots() {
    let img = mask_with_rects(20, 10, &[(4, 2, 6, 4)]);
    let layout = slots_from_image(&img, 2.0).unwrap();
    assert_eq!(layout.size, CanvasSize { width: 40, height: 20 });
    let slot = &layout.slots[0];
    // Nearest-neighbor doubling keeps the rectangle solid at 2x size.
    assert_eq!(
        slot.bounds,
        SlotBounds { x: 8, y: 4, width: 12, height: 8 }
    );
}

#[test]
fn non_positive_scaling_factor_is_rejected() {
    let img = mask_with_rects(8, 8, &[]);
    assert!(slots_from_image(&img, 0.0).is_err());
    assert!(slots_from_image(&img, -1.0).is_err());
    assert!(slots_from_image(&img, f64::NAN).is_err());
}

#[test]
fn missing_layout_file_is_invalid_image() {
    let err = extract_slots(std::path::Path::new("nope/layout_01.png"), 1.0).unwrap_err();
    assert!(matches!(err, SlotweaveError::InvalidImage { .. }));
}
