//! Archive normalization for FFIEC ZIP drops.
//!
//! Recent reporting periods arrive as `BHCF<YYYYMMDD>.zip` archives
//! containing a single `BHCF*.TXT` delimited file. Normalization
//! extracts that member next to the archive under the legacy CSV name
//! (`bhcf<YYMM>.csv`) so the rest of the pipeline sees one flat set of
//! per-quarter text files. Extraction is skipped when the target file
//! already exists, so reruns do not repeat work.

use crate::error::{FilingError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};
use zip::ZipArchive;

static ARCHIVE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bhcf(\d{4})(\d{2})(\d{2})").expect("valid regex"));

/// Outcome of scanning one input directory for archives.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub extracted: Vec<PathBuf>,
    pub skipped_existing: usize,
    pub failed: Vec<(PathBuf, String)>,
}

/// Extract every `BHCF*.zip` in `input_dir` that has not already been
/// normalized. A corrupt or misnamed archive is reported and skipped;
/// it never aborts the run.
pub fn normalize_archives(input_dir: &Path) -> Result<ExtractionReport> {
    let mut report = ExtractionReport::default();

    for zip_path in find_archives(input_dir)? {
        match extract_archive(&zip_path, input_dir) {
            Ok(Some(csv_path)) => {
                info!(
                    "Extracted {} -> {}",
                    zip_path.display(),
                    csv_path.display()
                );
                report.extracted.push(csv_path);
            }
            Ok(None) => {
                report.skipped_existing += 1;
            }
            Err(e) => {
                warn!("Skipping archive {}: {}", zip_path.display(), e);
                report.failed.push((zip_path, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Archives in the input directory, sorted and de-duplicated.
fn find_archives(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = BTreeSet::new();
    for pattern in ["BHCF*.zip", "bhcf*.zip"] {
        let full_pattern = input_dir.join(pattern);
        let entries =
            glob::glob(&full_pattern.to_string_lossy()).map_err(|e| FilingError::Configuration {
                message: format!("invalid archive pattern: {}", e),
            })?;
        archives.extend(entries.flatten());
    }
    Ok(archives.into_iter().collect())
}

/// Target CSV name for an archive: `bhcf<YY><MM>.csv`, derived from the
/// 8-digit date in the archive name. The month must be a quarter-end
/// month so the extracted file resolves to the same period.
fn target_csv_name(archive_name: &str) -> Result<String> {
    let name = archive_name.to_lowercase();
    let caps = ARCHIVE_DATE
        .captures(&name)
        .ok_or_else(|| FilingError::ArchiveExtraction {
            path: PathBuf::from(archive_name),
            reason: "filename does not carry an 8-digit date".to_string(),
        })?;

    let year: i32 = caps[1].parse().expect("digits");
    let month: u32 = caps[2].parse().expect("digits");

    if !matches!(month, 3 | 6 | 9 | 12) {
        return Err(FilingError::ArchiveExtraction {
            path: PathBuf::from(archive_name),
            reason: format!("month {:02} is not a quarter-end month", month),
        });
    }

    Ok(format!("bhcf{:02}{:02}.csv", year % 100, month))
}

/// Extract one archive. Returns `Ok(None)` when the target CSV already
/// exists (idempotent rerun).
fn extract_archive(zip_path: &Path, input_dir: &Path) -> Result<Option<PathBuf>> {
    let archive_name = zip_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilingError::ArchiveExtraction {
            path: zip_path.to_path_buf(),
            reason: "archive name is not valid UTF-8".to_string(),
        })?;

    let csv_path = input_dir.join(target_csv_name(archive_name)?);
    if csv_path.exists() {
        return Ok(None);
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| FilingError::ArchiveExtraction {
        path: zip_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let member = archive
        .file_names()
        .find(|name| {
            let upper = name.to_uppercase();
            upper.starts_with("BHCF") && upper.ends_with(".TXT")
        })
        .map(str::to_string)
        .ok_or_else(|| FilingError::ArchiveExtraction {
            path: zip_path.to_path_buf(),
            reason: "no BHCF*.TXT member found".to_string(),
        })?;

    let mut source = archive
        .by_name(&member)
        .map_err(|e| FilingError::ArchiveExtraction {
            path: zip_path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let mut target = File::create(&csv_path)?;
    std::io::copy(&mut source, &mut target)?;

    Ok(Some(csv_path))
}
