//! The full run: build the image matrix, scan for duplicates, export the
//! report, delete the flagged files. A single synchronous pass with no
//! retries and no persisted intermediate state.

use crate::core::deleter;
use crate::core::detector::{self, DetectorConfig};
use crate::core::loader;
use crate::core::preprocess::PreprocessConfig;
use crate::core::report::{DuplicateReport, REPORT_FILENAME};
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Configuration for a full run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The dataset directory to clean
    pub directory: PathBuf,
    pub detector: DetectorConfig,
    pub preprocess: PreprocessConfig,
    /// Where the JSON report lands; relative paths resolve against the
    /// working directory, not the dataset directory
    pub report_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            detector: DetectorConfig::default(),
            preprocess: PreprocessConfig::default(),
            report_path: PathBuf::from(REPORT_FILENAME),
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the dataset directory
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = directory.into();
        self
    }

    /// Set the contour noise filter
    pub fn min_contour_area(mut self, area: f64) -> Self {
        self.config.detector.min_contour_area = area;
        self
    }

    /// Set the duplicate decision cutoff
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.config.detector.score_threshold = threshold;
        self
    }

    /// Override where the JSON report is written
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.report_path = path.into();
        self
    }

    /// Override frame normalization
    pub fn preprocess(mut self, config: PreprocessConfig) -> Self {
        self.config.preprocess = config;
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The duplicate removal pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineResult {
    pub report: DuplicateReport,
    /// Paths that were flagged and deleted
    pub flagged: BTreeSet<PathBuf>,
    /// Files actually removed
    pub deleted: usize,
    /// Images loaded into the matrix
    pub total_images: usize,
    pub load_ms: u64,
    pub scan_ms: u64,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the full pass.
    ///
    /// The report is written before deletion, so an aborted deletion pass
    /// still leaves the mapping on disk for inspection.
    pub fn run(&self) -> Result<PipelineResult> {
        let loaded = loader::load_directory(&self.config.directory, &self.config.preprocess)?;
        let total_images = loaded.records.len();

        let outcome = detector::scan(&loaded.records, &self.config.detector);

        outcome.report.write_json(&self.config.report_path)?;

        let summary = deleter::delete_all(&outcome.flagged)?;

        Ok(PipelineResult {
            report: outcome.report,
            flagged: outcome.flagged,
            deleted: summary.deleted,
            total_images,
            load_ms: loaded.elapsed.as_millis() as u64,
            scan_ms: outcome.elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::detector::{DEFAULT_MIN_CONTOUR_AREA, DEFAULT_SCORE_THRESHOLD};
    use crate::error::{ImageRemoverError, LoadError};
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    #[test]
    fn builder_defaults_preserve_the_shared_thresholds() {
        let pipeline = Pipeline::builder().directory("/data").build();

        assert_eq!(
            pipeline.config.detector.min_contour_area,
            DEFAULT_MIN_CONTOUR_AREA
        );
        assert_eq!(
            pipeline.config.detector.score_threshold,
            DEFAULT_SCORE_THRESHOLD
        );
        assert_eq!(pipeline.config.report_path, PathBuf::from(REPORT_FILENAME));
    }

    #[test]
    fn builder_overrides_both_thresholds_independently() {
        let pipeline = Pipeline::builder()
            .directory("/data")
            .min_contour_area(500.0)
            .score_threshold(2000.0)
            .build();

        assert_eq!(pipeline.config.detector.min_contour_area, 500.0);
        assert_eq!(pipeline.config.detector.score_threshold, 2000.0);
    }

    #[test]
    fn missing_directory_fails_the_run() {
        let report_dir = TempDir::new().unwrap();
        let pipeline = Pipeline::builder()
            .directory("/nonexistent/dataset/12345")
            .report_path(report_dir.path().join(REPORT_FILENAME))
            .build();

        let error = pipeline.run().unwrap_err();

        assert!(matches!(
            error,
            ImageRemoverError::Load(LoadError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn empty_dataset_writes_an_empty_report() {
        let dataset = TempDir::new().unwrap();
        let report_dir = TempDir::new().unwrap();
        let report_path = report_dir.path().join(REPORT_FILENAME);

        let pipeline = Pipeline::builder()
            .directory(dataset.path())
            .report_path(&report_path)
            .build();

        let result = pipeline.run().unwrap();

        assert_eq!(result.total_images, 0);
        assert_eq!(result.deleted, 0);
        assert_eq!(std::fs::read_to_string(&report_path).unwrap(), "{}");
    }

    #[test]
    fn distinct_images_survive_the_run() {
        let dataset = TempDir::new().unwrap();
        let report_dir = TempDir::new().unwrap();

        let black: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(64, 64, Rgb([0, 0, 0]));
        let white: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(64, 64, Rgb([255, 255, 255]));
        black.save(dataset.path().join("black.png")).unwrap();
        white.save(dataset.path().join("white.png")).unwrap();

        let pipeline = Pipeline::builder()
            .directory(dataset.path())
            .report_path(report_dir.path().join(REPORT_FILENAME))
            .build();

        let result = pipeline.run().unwrap();

        assert_eq!(result.total_images, 2);
        assert_eq!(result.deleted, 0);
        assert!(dataset.path().join("black.png").exists());
        assert!(dataset.path().join("white.png").exists());
    }
}
