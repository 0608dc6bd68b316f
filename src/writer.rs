//! Parquet partition writing.
//!
//! One file per (filer category, reporting period), grouped in a
//! subdirectory per category and named by quarter label. Existing
//! partitions are overwritten; a crash mid-write can leave a partial
//! file, which the next run replaces.

use crate::error::{FilingError, Result};
use crate::models::{FilerType, ReportingPeriod};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path a partition lands at: `<output>/<category>/<YYYYQ#>.parquet`.
pub fn partition_path(output_dir: &Path, filer: FilerType, period: &ReportingPeriod) -> PathBuf {
    output_dir
        .join(filer.dir_name())
        .join(format!("{}.parquet", period.label()))
}

/// Write one partition with Snappy compression and column statistics.
pub fn write_partition(
    df: &mut DataFrame,
    output_dir: &Path,
    filer: FilerType,
    period: &ReportingPeriod,
) -> Result<PathBuf> {
    let path = partition_path(output_dir, filer, period);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FilingError::PartitionWrite {
            path: path.clone(),
            reason: format!("failed to create partition directory: {}", e),
        })?;
    }

    let file = File::create(&path).map_err(|e| FilingError::PartitionWrite {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .with_statistics(StatisticsOptions::full())
        .finish(df)
        .map_err(|e| FilingError::PartitionWrite {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    debug!(
        "Wrote partition {} ({} records)",
        path.display(),
        df.height()
    );

    Ok(path)
}
