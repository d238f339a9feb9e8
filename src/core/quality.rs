//! Picks which image of a duplicate pair should be deleted.
//!
//! Quality here means on-disk byte size, not a visual metric: of two
//! images judged duplicates, the smaller file loses. This does not look at
//! resolution or compression artifacts, so a heavily-compressed original
//! can lose to a bloated copy; changing the heuristic changes which image
//! survives.

use crate::core::loader::ImageRecord;

/// Resolve the lower-quality member of a duplicate pair.
///
/// When the search image is at least as large as the compare image, the
/// compare image loses; ties always keep the search image.
pub fn resolve_loser<'a>(search: &'a ImageRecord, compare: &'a ImageRecord) -> &'a ImageRecord {
    if search.byte_size >= compare.byte_size {
        compare
    } else {
        search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use std::path::PathBuf;

    fn record(name: &str, byte_size: u64) -> ImageRecord {
        ImageRecord {
            filename: name.to_string(),
            path: PathBuf::from(format!("/data/{name}")),
            pixels: GrayImage::new(1, 1),
            byte_size,
        }
    }

    #[test]
    fn smaller_compare_image_loses() {
        let search = record("a.png", 500);
        let compare = record("b.png", 300);
        assert_eq!(resolve_loser(&search, &compare).filename, "b.png");
    }

    #[test]
    fn smaller_search_image_loses() {
        let search = record("a.png", 300);
        let compare = record("b.png", 500);
        assert_eq!(resolve_loser(&search, &compare).filename, "a.png");
    }

    #[test]
    fn equal_sizes_keep_the_search_image() {
        let search = record("a.png", 400);
        let compare = record("b.png", 400);
        assert_eq!(resolve_loser(&search, &compare).filename, "b.png");
    }

    #[test]
    fn resolution_is_deterministic() {
        let search = record("a.png", 400);
        let compare = record("b.png", 400);
        let first = resolve_loser(&search, &compare).filename.clone();
        let second = resolve_loser(&search, &compare).filename.clone();
        assert_eq!(first, second);
    }
}
