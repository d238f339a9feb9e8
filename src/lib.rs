//! # Duplicate Image Remover
//!
//! An offline dataset-cleaning tool that finds near-duplicate images in a
//! flat directory with a pixel-difference metric and removes the
//! lower-quality copy of each duplicate pair.
//!
//! ## Architecture
//! The library is split into a core engine and a thin CLI binary:
//! - `core` - loading, pairwise scanning, quality resolution, deletion
//! - `error` - error types with path context
//! - `cli` (binary only) - argument parsing and console output

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{ImageRemoverError, Result};

/// Initialize tracing for the library
///
/// This should be called once by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
