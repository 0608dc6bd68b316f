//! Parallel fan-out over independent filing files.
//!
//! Each file is one task; tasks share nothing and write disjoint
//! partition paths, so the pool needs no coordination beyond a
//! concurrency bound. A failed task is logged and reported without
//! cancelling its siblings. A bound of 0 or 1 processes files strictly
//! sequentially.

use crate::error::{FilingError, Result};
use crate::models::FileOutcome;
use crate::processor::convert::convert_filing;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{error, info};

/// Per-file results in completion order; each entry pairs the input
/// path with its conversion result.
pub type DispatchResults = Vec<(PathBuf, Result<FileOutcome>)>;

/// Run the conversion pipeline over `files` with at most `workers`
/// tasks in flight.
pub async fn dispatch_filings(
    files: Vec<PathBuf>,
    output_dir: &Path,
    workers: usize,
    show_progress: bool,
) -> DispatchResults {
    let progress_bar = if show_progress && !files.is_empty() {
        Some(create_progress_bar(files.len() as u64))
    } else {
        None
    };

    let concurrency = workers.max(1).min(files.len().max(1));
    info!(
        "Dispatching {} files with {} worker(s)",
        files.len(),
        concurrency
    );

    let results: DispatchResults = stream::iter(files)
        .map(|path| {
            let output_dir = output_dir.to_path_buf();
            let progress_bar = progress_bar.clone();
            async move {
                if let Some(pb) = &progress_bar {
                    if let Some(name) = path.file_name() {
                        pb.set_message(format!("Converting {}", name.to_string_lossy()));
                    }
                }

                let task_path = path.clone();
                let result = task::spawn_blocking(move || convert_filing(&task_path, &output_dir))
                    .await
                    .unwrap_or_else(|e| {
                        Err(FilingError::ProcessingFailed {
                            path: path.clone(),
                            reason: format!("worker task failed: {}", e),
                        })
                    });

                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }

                match &result {
                    Ok(outcome) => info!("[{}] {}", outcome.period, outcome.summary()),
                    Err(e) => error!("Failed to process {}: {}", path.display(), e),
                }

                (path, result)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("All filing files processed");
    }

    results
}

/// Progress bar used while the pool drains.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Converting filings");
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_filing(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_dispatch_empty_list() {
        let out = TempDir::new().unwrap();
        let results = dispatch_filings(vec![], out.path(), 4, false).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_failure_does_not_cancel_siblings() {
        let dir = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let good = write_filing(
            dir.path(),
            "bhcf8603.csv",
            "RSSD9001,BHCK1234\n12345,100\n",
        );
        // Resolvable name, but no identifier column.
        let bad = write_filing(dir.path(), "bhcf8606.csv", "NAME,BHCK1234\nacme,1\n");

        let results = dispatch_filings(vec![good.clone(), bad.clone()], out.path(), 2, false).await;
        assert_eq!(results.len(), 2);

        let good_result = results.iter().find(|(p, _)| *p == good).unwrap();
        assert!(good_result.1.is_ok());

        let bad_result = results.iter().find(|(p, _)| *p == bad).unwrap();
        assert!(bad_result.1.is_err());

        assert!(out.path().join("y_9c").join("1986Q1.parquet").exists());
    }

    #[tokio::test]
    async fn test_sequential_and_parallel_produce_same_partitions() {
        let dir = TempDir::new().unwrap();
        let content = "RSSD9001,BHCK1234,BHSP0001\n1,10,\n2,,20\n3,30,\n";
        let files: Vec<PathBuf> = ["bhcf8603.csv", "bhcf8606.csv", "bhcf8609.csv", "bhcf8612.csv"]
            .iter()
            .map(|name| write_filing(dir.path(), name, content))
            .collect();

        let out_seq = TempDir::new().unwrap();
        let out_par = TempDir::new().unwrap();

        let seq = dispatch_filings(files.clone(), out_seq.path(), 1, false).await;
        let par = dispatch_filings(files, out_par.path(), 4, false).await;

        assert!(seq.iter().all(|(_, r)| r.is_ok()));
        assert!(par.iter().all(|(_, r)| r.is_ok()));

        for filer_dir in ["y_9c", "y_9sp"] {
            for quarter in ["1986Q1", "1986Q2", "1986Q3", "1986Q4"] {
                let seq_file = out_seq
                    .path()
                    .join(filer_dir)
                    .join(format!("{quarter}.parquet"));
                let par_file = out_par
                    .path()
                    .join(filer_dir)
                    .join(format!("{quarter}.parquet"));
                assert!(seq_file.exists());
                assert!(par_file.exists());
                assert_eq!(
                    fs::read(&seq_file).unwrap(),
                    fs::read(&par_file).unwrap(),
                    "partition contents differ for {filer_dir}/{quarter}"
                );
            }
        }
    }
}
