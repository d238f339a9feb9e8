//! Normalizes decoded images into comparable grayscale frames.
//!
//! Frames are grayscaled, optionally blurred, and get a black mask painted
//! over their border regions so camera timestamps and edge artifacts never
//! count as pixel change.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::filter::gaussian_blur_f32;
use imageproc::rect::Rect;

/// Percentage-based border regions to blank out, per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderMask {
    pub left_pct: u32,
    pub top_pct: u32,
    pub right_pct: u32,
    pub bottom_pct: u32,
}

impl Default for BorderMask {
    fn default() -> Self {
        Self {
            left_pct: 5,
            top_pct: 10,
            right_pct: 5,
            bottom_pct: 0,
        }
    }
}

/// Configuration for frame normalization.
#[derive(Debug, Clone, Default)]
pub struct PreprocessConfig {
    /// Gaussian blur passes applied in order; empty by default
    pub blur_sigmas: Vec<f32>,
    pub mask: BorderMask,
}

/// Convert a decoded image into a normalized grayscale frame.
pub fn normalize(image: &DynamicImage, config: &PreprocessConfig) -> GrayImage {
    let mut gray = image.to_luma8();
    for &sigma in &config.blur_sigmas {
        gray = gaussian_blur_f32(&gray, sigma);
    }
    mask_borders(&mut gray, &config.mask);
    gray
}

/// Paint the configured border strips black.
fn mask_borders(gray: &mut GrayImage, mask: &BorderMask) {
    let (width, height) = gray.dimensions();
    let left = width * mask.left_pct / 100;
    let top = height * mask.top_pct / 100;
    let right = width * mask.right_pct / 100;
    let bottom = height * mask.bottom_pct / 100;
    let black = Luma([0u8]);

    if left > 0 {
        draw_filled_rect_mut(gray, Rect::at(0, 0).of_size(left, height), black);
    }
    if top > 0 {
        draw_filled_rect_mut(gray, Rect::at(0, 0).of_size(width, top), black);
    }
    if right > 0 {
        let x = (width - right) as i32;
        draw_filled_rect_mut(gray, Rect::at(x, 0).of_size(right, height), black);
    }
    if bottom > 0 {
        let y = (height - bottom) as i32;
        draw_filled_rect_mut(gray, Rect::at(0, y).of_size(width, bottom), black);
    }
}
