//! Removes flagged duplicate files.

use crate::error::DeleteError;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Outcome of the deletion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionSummary {
    pub deleted: usize,
}

/// Delete every flagged file, counting successes.
///
/// The first OS failure aborts the run with the offending path; there is
/// no partial-failure tolerance. Set semantics upstream guarantee each
/// path is removed at most once.
pub fn delete_all(flagged: &BTreeSet<PathBuf>) -> Result<DeletionSummary, DeleteError> {
    let mut deleted = 0;
    for path in flagged {
        fs::remove_file(path).map_err(|source| DeleteError::Remove {
            path: path.clone(),
            source,
        })?;
        deleted += 1;
    }

    info!(deleted, "deletion pass finished");
    Ok(DeletionSummary { deleted })
}
