//! Contour-based scoring of the pixel difference between two frames.
//!
//! The absolute per-pixel difference is binarized, dilated to close small
//! gaps, and traced into contours. Contours below the caller's noise
//! threshold are discarded; the score is the summed area of the rest, so
//! lower means more similar and zero means visually identical.

use image::{GrayImage, Luma};
use imageproc::contours::find_contours;
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::map::map_colors2;
use imageproc::morphology::dilate;
use imageproc::point::Point;

/// Per-pixel delta below which two pixels count as unchanged.
pub const PIXEL_DELTA_THRESHOLD: u8 = 45;

/// Outcome of comparing two equally-sized frames.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDelta {
    /// Total area of the changed regions; lower = more similar
    pub score: f64,
    /// Areas of the changed regions that survived the noise filter
    pub contour_areas: Vec<f64>,
    /// The noise threshold this comparison ran with
    pub min_contour_area: f64,
}

/// Score the pixel-level difference between two equally-sized grayscale
/// frames.
///
/// # Panics
/// Panics if the frames have different dimensions.
pub fn frame_delta(prev: &GrayImage, next: &GrayImage, min_contour_area: f64) -> FrameDelta {
    assert_eq!(
        prev.dimensions(),
        next.dimensions(),
        "frames must have equal dimensions"
    );

    let delta = map_colors2(prev, next, |p, n| Luma([p[0].abs_diff(n[0])]));
    let binary = threshold(&delta, PIXEL_DELTA_THRESHOLD, ThresholdType::Binary);
    // two 3x3 passes folded into one L-inf pass of radius 2
    let dilated = dilate(&binary, Norm::LInf, 2);

    let mut score = 0.0;
    let mut contour_areas = Vec::new();
    for contour in find_contours::<i32>(&dilated) {
        // top-level boundaries only; holes and nested regions are already
        // covered by their outer contour's area
        if contour.parent.is_some() {
            continue;
        }
        let area = polygon_area(&contour.points);
        if area < min_contour_area {
            continue;
        }
        score += area;
        contour_areas.push(area);
    }

    FrameDelta {
        score,
        contour_areas,
        min_contour_area,
    }
}

/// Shoelace area of a traced boundary.
fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        doubled += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }
    doubled.abs() as f64 / 2.0
}
