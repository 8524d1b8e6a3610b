// src/export/fs_utils.rs

use crate::cli::prompt::ask_confirmation;
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Whether the export may create or replace `path`.
///
/// A missing file, or `force`, is fine; otherwise the operator is asked.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if ask_confirmation(&format!(
        "The file '{}' already exists. Overwrite it?",
        path.display()
    )) {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "'{}' exists and was not overwritten",
            path.display()
        )))
    }
}
