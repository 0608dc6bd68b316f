//! Command-line argument definitions.
//!
//! Defines the CLI interface using the clap derive API. The surface the
//! conversion core honors is small: input directory, output directory,
//! and the worker bound (with a sequential switch); year filters narrow
//! a run to a historical window.

use crate::config::Config;
use crate::constants::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, MAX_PARALLEL_WORKERS};
use crate::error::{FilingError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the FR Y-9 filing processor.
///
/// Converts quarterly FR Y-9 filing drops (CSV files and ZIP archives)
/// into a Parquet store partitioned by filer category and quarter.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fry9c-processor",
    version,
    about = "Convert FR Y-9 filing data from CSV/ZIP drops to partitioned Parquet",
    long_about = "Processes quarterly FR Y-9 regulatory filing files into a partitioned \
                  Apache Parquet store. ZIP archive drops are extracted automatically, \
                  each record is classified into its filer category (Y-9C, Y-9LP, Y-9SP) \
                  by prefix-group value density, and one partition is written per \
                  category and quarter."
)]
pub struct Args {
    /// Directory containing raw CSV files and ZIP archives
    #[arg(
        short = 'i',
        long = "input-dir",
        value_name = "PATH",
        default_value = DEFAULT_INPUT_DIR,
        help = "Directory containing raw bhcf* CSV files and BHCF*.zip archives"
    )]
    pub input_dir: PathBuf,

    /// Directory the partitioned Parquet store is written under
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory to write y_9c/, y_9lp/ and y_9sp/ partitions under"
    )]
    pub output_dir: PathBuf,

    /// Number of parallel workers
    ///
    /// Controls how many files are converted concurrently. Defaults to
    /// the number of available CPUs; 0 disables parallelism.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers (default: all CPUs, 0 = sequential)"
    )]
    pub workers: Option<usize>,

    /// Disable parallel processing
    #[arg(
        long = "no-parallel",
        help = "Process files sequentially",
        conflicts_with = "workers"
    )]
    pub no_parallel: bool,

    /// Only process filings from this year onwards
    #[arg(long = "start-year", value_name = "YEAR")]
    pub start_year: Option<i32>,

    /// Only process filings up to this year
    #[arg(long = "end-year", value_name = "YEAR")]
    pub end_year: Option<i32>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress progress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run report"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run report.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON for scripting
    Json,
}

impl Args {
    /// Validate argument consistency before the run starts.
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers > MAX_PARALLEL_WORKERS {
                return Err(FilingError::Configuration {
                    message: format!("Number of workers cannot exceed {}", MAX_PARALLEL_WORKERS),
                });
            }
        }

        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if start > end {
                return Err(FilingError::Configuration {
                    message: format!("start year {} is after end year {}", start, end),
                });
            }
        }

        Ok(())
    }

    /// Effective worker bound after the sequential switch.
    pub fn effective_workers(&self) -> usize {
        if self.no_parallel {
            0
        } else {
            self.workers.unwrap_or_else(num_cpus::get)
        }
    }

    /// Determine the log level from the verbosity flags.
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars are shown unless quiet mode is on.
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the run configuration the core honors.
    pub fn to_config(&self) -> Config {
        Config {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            workers: self.effective_workers(),
            start_year: self.start_year,
            end_year: self.end_year,
        }
    }
}
