//! # CLI Module
//!
//! Command-line interface for the duplicate image remover.
//!
//! ## Usage
//! ```bash
//! # Clean a dataset directory
//! image-dedup --input ~/dataset
//!
//! # Looser duplicate cutoff, stricter noise filter
//! image-dedup -i ~/dataset --score-threshold 2000 --min-contour-area 500
//! ```

use clap::Parser;
use console::{style, Term};
use duplicate_image_remover::core::detector::{
    DEFAULT_MIN_CONTOUR_AREA, DEFAULT_SCORE_THRESHOLD,
};
use duplicate_image_remover::core::pipeline::Pipeline;
use duplicate_image_remover::error::Result;
use std::path::PathBuf;
use tracing::error;

/// Duplicate Image Remover - keep the best copy, delete the rest
#[derive(Parser, Debug)]
#[command(name = "image-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset directory with the images to clean
    #[arg(short, long, value_name = "DIR")]
    input: PathBuf,

    /// Contours below this area are ignored as noise
    #[arg(long, default_value_t = DEFAULT_MIN_CONTOUR_AREA)]
    min_contour_area: f64,

    /// Pairs scoring below this are treated as duplicates
    #[arg(long, default_value_t = DEFAULT_SCORE_THRESHOLD)]
    score_threshold: f64,
}

/// Run the CLI
pub fn run() -> Result<()> {
    duplicate_image_remover::init_tracing();
    let cli = Cli::parse();
    let term = Term::stdout();

    let pipeline = Pipeline::builder()
        .directory(cli.input)
        .min_contour_area(cli.min_contour_area)
        .score_threshold(cli.score_threshold)
        .build();

    let result = match pipeline.run() {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "run aborted");
            return Err(e);
        }
    };

    term.write_line(&format!(
        "Built image matrix of {} images in {:.4}s",
        style(result.total_images).cyan(),
        result.load_ms as f64 / 1000.0,
    ))
    .ok();
    term.write_line(&format!(
        "Found {} image/images with one or more duplicate/similar images in {:.4}s",
        style(result.report.len()).cyan(),
        result.scan_ms as f64 / 1000.0,
    ))
    .ok();
    term.write_line(&format!("Deleted {} images", style(result.deleted).yellow()))
        .ok();

    Ok(())
}
