// src/export/logic.rs

use crate::db::pool::DbPool;
use crate::db::queries::{load_all_worklogs, load_worklogs_between};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::WorklogExport;
use crate::ui::messages::warning;
use crate::utils::period::parse_period;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export worklogs to `file` (absolute path).
    ///
    /// `range` accepts the usual period syntax (`YYYY`, `YYYY-MM`,
    /// `YYYY-MM-DD`, same-shape `A:B` ranges, or `all`). Returns the number
    /// of exported rows.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = parse_period(range)?;

        let worklogs = match bounds {
            None => load_all_worklogs(pool)?,
            Some((from, to)) => load_worklogs_between(pool, from, to)?,
        };

        if worklogs.is_empty() {
            warning("No worklogs found for the selected range. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<WorklogExport> = worklogs.iter().map(WorklogExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
