//! Input file discovery.
//!
//! Finds per-quarter filing files (`bhcf*.csv` / `BHCF*.csv`) in a flat
//! input directory, optionally restricted to a year range.

use crate::error::{FilingError, Result};
use crate::period::resolve_period;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Discover filing files, sorted for a consistent processing order.
///
/// When a year filter is set, files whose names resolve outside the
/// range (or not at all) are dropped here; without a filter every
/// candidate is kept so naming errors surface in the run report.
pub fn discover_filings(
    input_dir: &Path,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in ["bhcf*.csv", "BHCF*.csv"] {
        let full_pattern = input_dir.join(pattern);
        let entries =
            glob::glob(&full_pattern.to_string_lossy()).map_err(|e| FilingError::Configuration {
                message: format!("invalid discovery pattern: {}", e),
            })?;
        files.extend(entries.flatten());
    }

    let mut files: Vec<PathBuf> = files.into_iter().collect();

    if start_year.is_some() || end_year.is_some() {
        files.retain(|path| {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            let Ok(period) = resolve_period(name) else {
                return false;
            };
            start_year.is_none_or(|start| period.year() >= start)
                && end_year.is_none_or(|end| period.year() <= end)
        });
    }

    debug!(
        "Discovered {} filing files in {}",
        files.len(),
        input_dir.display()
    );

    Ok(files)
}
