use image::{Rgba, RgbaImage};

use super::*;
use crate::foundation::error::SlotweaveError;

#[test]
fn matching_dimensions_pass_through_byte_identical() {
    let mut img = RgbaImage::new(8, 6);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgba([x as u8 * 10, y as u8 * 20, 7, 255]);
    }
    let fitted = fit_canvas(
        img.clone(),
        CanvasSize {
            width: 8,
            height: 6,
        },
    );
    assert_eq!(fitted, img);
}

#[test]
fn mismatched_dimensions_are_resampled_to_target() {
    let img = RgbaImage::from_pixel(10, 10, Rgba([40, 80, 120, 255]));
    let fitted = fit_canvas(
        img,
        CanvasSize {
            width: 5,
            height: 7,
        },
    );
    assert_eq!(fitted.dimensions(), (5, 7));
}

#[test]
fn missing_background_is_invalid_image() {
    let err = load_canvas(
        std::path::Path::new("nope/background_01_1.png"),
        CanvasSize {
            width: 4,
            height: 4,
        },
    )
    .unwrap_err();
    assert!(matches!(err, SlotweaveError::InvalidImage { .. }));
}
