//! Main processing engine.
//!
//! Orchestrates the complete conversion workflow: archive
//! normalization, file discovery, parallel per-file conversion, and
//! run-level aggregation into a [`RunReport`].

pub mod convert;
pub mod discovery;
pub mod dispatcher;

use crate::archive::normalize_archives;
use crate::config::Config;
use crate::error::{FilingError, Result};
use crate::models::RunReport;
use crate::processor::discovery::discover_filings;
use crate::processor::dispatcher::dispatch_filings;

use colored::*;
use std::time::Instant;
use tracing::{info, warn};

/// Converts a directory of raw filing drops into the partitioned store.
#[derive(Debug)]
pub struct FilingProcessor {
    config: Config,
    show_progress: bool,
}

impl FilingProcessor {
    /// Create a processor for the given run configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    /// Enable or suppress the interactive progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Main processing entry point.
    ///
    /// Setup failures (bad configuration, missing input directory, zero
    /// discoverable inputs) abort before any task starts; per-file and
    /// per-record failures are aggregated into the returned report.
    pub async fn process(&self) -> Result<RunReport> {
        let start_time = Instant::now();

        self.config.validate()?;
        self.config.ensure_output_directory()?;

        println!("{}", "Starting FR Y-9 filing conversion".bright_green().bold());
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.config.input_dir.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.output_dir.display()
        );

        let mut report = RunReport::default();

        // Step 1: normalize archive drops into flat CSV files.
        println!("\n{}", "Normalizing archives...".bright_yellow());
        let extraction = normalize_archives(&self.config.input_dir)?;
        report.archives_extracted = extraction.extracted.len();
        report.archives_skipped = extraction.skipped_existing;
        report.archives_failed = extraction.failed;
        println!(
            "  {} {} extracted, {} already present, {} failed",
            "Archives:".bright_cyan(),
            report.archives_extracted,
            report.archives_skipped,
            report.archives_failed.len()
        );

        // Step 2: discover per-quarter filing files.
        println!("\n{}", "Discovering filing files...".bright_yellow());
        let files = discover_filings(
            &self.config.input_dir,
            self.config.start_year,
            self.config.end_year,
        )?;
        println!(
            "  {} {} filing files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        if files.is_empty() {
            return Err(FilingError::NoInputs {
                path: self.config.input_dir.clone(),
            });
        }

        // Step 3: fan out one conversion task per file.
        println!("\n{}", "Converting filings...".bright_yellow());
        let workers = if self.config.sequential() {
            info!("Parallel processing disabled, converting sequentially");
            1
        } else {
            self.config.workers
        };

        let results =
            dispatch_filings(files, &self.config.output_dir, workers, self.show_progress).await;

        // Step 4: aggregate per-file outcomes.
        for (path, result) in results {
            match result {
                Ok(outcome) => report.absorb(outcome),
                Err(e) => {
                    warn!("Skipped {}: {}", path.display(), e);
                    report.record_skip(path, e.to_string());
                }
            }
        }

        report.processing_time = start_time.elapsed();

        info!(
            "Run complete: {} files, {} partitions, {} records in {:.2}s",
            report.files_processed,
            report.partitions_written,
            report.records_written,
            report.processing_time.as_secs_f64()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(input: &TempDir, output: &TempDir) -> Config {
        let mut config = Config::new(input.path().to_path_buf(), output.path().to_path_buf());
        config.workers = 2;
        config
    }

    #[tokio::test]
    async fn test_missing_input_dir_is_fatal() {
        let output = TempDir::new().unwrap();
        let config = Config::new(
            PathBuf::from("/nonexistent/raw"),
            output.path().to_path_buf(),
        );
        let result = FilingProcessor::new(config).process().await;
        assert!(matches!(result, Err(FilingError::InputDirNotFound { .. })));
    }

    #[tokio::test]
    async fn test_empty_input_dir_is_fatal() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let result = FilingProcessor::new(test_config(&input, &output))
            .process()
            .await;
        assert!(matches!(result, Err(FilingError::NoInputs { .. })));
    }

    #[tokio::test]
    async fn test_bad_file_does_not_abort_run() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        fs::write(
            input.path().join("bhcf8603.csv"),
            "RSSD9001,BHCK1234\n12345,100\n",
        )
        .unwrap();
        // Unrecognized naming convention.
        fs::write(
            input.path().join("bhcfQQQQ.csv"),
            "RSSD9001,BHCK1234\n1,2\n",
        )
        .unwrap();

        let report = FilingProcessor::new(test_config(&input, &output))
            .process()
            .await
            .unwrap();

        assert_eq!(report.files_processed, 1);
        assert_eq!(report.files_skipped.len(), 1);
        assert!(report.wrote_any());
    }
}
