//! # image-dedup CLI
//!
//! Command-line interface for the duplicate image remover.
//!
//! ## Usage
//! ```bash
//! image-dedup --input ~/dataset
//! image-dedup -i ~/dataset --score-threshold 500
//! ```

mod cli;

use duplicate_image_remover::Result;

fn main() -> Result<()> {
    cli::run()
}
