//! Error handling for FR Y-9 filing conversion.
//!
//! Provides error types with context for archive normalization, format
//! detection, period resolution, classification, and partition writing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Input directory not found: {}", .path.display())]
    InputDirNotFound { path: PathBuf },

    #[error("No filing files found in input directory: {}", .path.display())]
    NoInputs { path: PathBuf },

    #[error("Filename does not match a known filing convention: {name}")]
    UnrecognizedFilename { name: String },

    #[error("Unparseable filing format in {}: {}", .path.display(), .reason)]
    UnparseableFormat { path: PathBuf, reason: String },

    #[error("Institution identifier column not found in {}", .path.display())]
    MissingIdentifier { path: PathBuf },

    #[error("Archive {} could not be normalized: {}", .path.display(), .reason)]
    ArchiveExtraction { path: PathBuf, reason: String },

    #[error("Processing failed for file {}: {}", .path.display(), .reason)]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Partition write failed for {}: {}", .path.display(), .reason)]
    PartitionWrite { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, FilingError>;
