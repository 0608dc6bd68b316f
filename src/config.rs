//! Configuration for a conversion run.
//!
//! The configuration surface is deliberately small: input directory,
//! output directory, worker bound, and optional year filters. CLI
//! arguments are the only source; there is no config file layer.

use crate::constants::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR, MAX_PARALLEL_WORKERS};
use crate::error::{FilingError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration honored by the conversion core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding raw `bhcf*` CSV files and `BHCF*.zip` archives.
    pub input_dir: PathBuf,
    /// Directory the partitioned Parquet store is written under.
    pub output_dir: PathBuf,
    /// Worker bound for the dispatcher; 0 or 1 forces sequential mode.
    pub workers: usize,
    /// Only process filings from this year onwards.
    pub start_year: Option<i32>,
    /// Only process filings up to this year.
    pub end_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: num_cpus::get(),
            start_year: None,
            end_year: None,
        }
    }
}

impl Config {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Default::default()
        }
    }

    /// True when the dispatcher must process files one at a time.
    pub fn sequential(&self) -> bool {
        self.workers <= 1
    }

    /// Validate the configuration before any task starts.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(FilingError::InputDirNotFound {
                path: self.input_dir.clone(),
            });
        }

        if !self.input_dir.is_dir() {
            return Err(FilingError::Configuration {
                message: format!(
                    "Input path is not a directory: {}",
                    self.input_dir.display()
                ),
            });
        }

        if self.workers > MAX_PARALLEL_WORKERS {
            return Err(FilingError::Configuration {
                message: format!("Number of workers cannot exceed {}", MAX_PARALLEL_WORKERS),
            });
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

    /// Create the output directory if it does not exist.
    pub fn ensure_output_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| FilingError::Configuration {
            message: format!(
                "Failed to create output directory '{}': {}",
                self.output_dir.display(),
                e
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_validate_missing_input_dir() {
        let config = Config::new(
            PathBuf::from("/nonexistent/raw"),
            PathBuf::from("/tmp/out"),
        );
        assert!(matches!(
            config.validate(),
            Err(FilingError::InputDirNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_worker_bound() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new(
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("output"),
        );
        config.workers = MAX_PARALLEL_WORKERS + 1;
        assert!(config.validate().is_err());

        config.workers = 0;
        assert!(config.validate().is_ok());
        assert!(config.sequential());
    }

    #[test]
    fn test_validate_year_range() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new(
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("output"),
        );
        config.start_year = Some(2020);
        config.end_year = Some(2010);
        assert!(config.validate().is_err());

        config.end_year = Some(2022);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ensure_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("nested").join("output"),
        );
        config.ensure_output_directory().unwrap();
        assert!(config.output_dir.is_dir());
    }
}
