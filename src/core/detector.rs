//! The all-pairs similarity scan.
//!
//! ## How It Works
//! 1. Visit every unordered image pair exactly once (`compare > search`)
//! 2. Shrink both frames to the smaller one's dimensions (cubic resample)
//! 3. Score the pixel difference with the contour-based frame delta
//! 4. Below the cutoff, record the pair and flag the lower-quality file
//!
//! An image already flagged for removal is never re-evaluated as a fresh
//! compare candidate. O(n²) comparisons with no indexing; fine for a
//! single folder, not for a photo library.

use crate::core::delta::frame_delta;
use crate::core::loader::ImageRecord;
use crate::core::quality;
use crate::core::report::DuplicateReport;
use image::imageops::{self, FilterType};
use image::GrayImage;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Default noise filter: contours below this area do not count as change.
pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 1000.0;

/// Default duplicate cutoff: pairs scoring below this are duplicates.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 1000.0;

/// Tuning for the pairwise scan.
///
/// The two thresholds share a default value but are independent knobs: one
/// feeds the contour noise filter inside the frame comparison, the other
/// decides when a pair counts as a duplicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    pub min_contour_area: f64,
    pub score_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

/// A duplicate pair found by the scan.
///
/// `compare_index > search_index` always; the symmetric relation is
/// materialized in one direction only.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMatch {
    pub search_index: usize,
    pub compare_index: usize,
    pub score: f64,
}

/// Everything one scan pass produced.
#[derive(Debug)]
pub struct ScanOutcome {
    pub matches: Vec<DuplicateMatch>,
    pub report: DuplicateReport,
    /// Paths flagged for deletion, deduplicated
    pub flagged: BTreeSet<PathBuf>,
    pub elapsed: Duration,
}

/// Compare every image pair and flag the lower-quality member of each
/// duplicate pair.
pub fn scan(records: &[ImageRecord], config: &DetectorConfig) -> ScanOutcome {
    let start = Instant::now();
    let mut matches = Vec::new();
    let mut report = DuplicateReport::new();
    let mut flagged: BTreeSet<PathBuf> = BTreeSet::new();

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let search = &records[i];
            let compare = &records[j];

            // an image flagged for removal is not evaluated again
            if flagged.contains(&compare.path) {
                continue;
            }

            let target = comparison_dimensions(&search.pixels, &compare.pixels);
            let search_frame = resize_to(&search.pixels, target);
            let compare_frame = resize_to(&compare.pixels, target);

            let delta = frame_delta(&search_frame, &compare_frame, config.min_contour_area);
            if delta.score < config.score_threshold {
                report.record(search, compare, delta.score);
                let loser = quality::resolve_loser(search, compare);
                flagged.insert(loser.path.clone());
                matches.push(DuplicateMatch {
                    search_index: i,
                    compare_index: j,
                    score: delta.score,
                });
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        grouped = report.len(),
        flagged = flagged.len(),
        elapsed_s = elapsed.as_secs_f64(),
        "pairwise scan finished"
    );

    ScanOutcome {
        matches,
        report,
        flagged,
        elapsed,
    }
}

/// Dimensions both frames are resampled to: those of the image holding
/// fewer pixels. The larger image is always shrunk, never the reverse.
fn comparison_dimensions(a: &GrayImage, b: &GrayImage) -> (u32, u32) {
    let (aw, ah) = a.dimensions();
    let (bw, bh) = b.dimensions();
    if u64::from(aw) * u64::from(ah) > u64::from(bw) * u64::from(bh) {
        (bw, bh)
    } else {
        (aw, ah)
    }
}

/// Cubic resample to the target dimensions, skipped when already there.
fn resize_to(image: &GrayImage, (width, height): (u32, u32)) -> Cow<'_, GrayImage> {
    if image.dimensions() == (width, height) {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, width, height, FilterType::CatmullRom))
    }
}
