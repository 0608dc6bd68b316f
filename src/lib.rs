//! FR Y-9 Filing Processor Library
//!
//! A Rust library for converting quarterly FR Y-9 regulatory filing data
//! from delimited text (loose CSV files or ZIP archive drops) into a
//! partitioned Apache Parquet store.
//!
//! This library provides tools for:
//! - Normalizing ZIP archive drops into flat per-quarter CSV files
//! - Sniffing the field delimiter of legacy and current file formats
//! - Resolving reporting periods from filenames alone
//! - Classifying each filing record into its filer category (Y-9C,
//!   Y-9LP, Y-9SP) by prefix-group value density
//! - Projecting per-category column sets with a canonical identifier
//! - Writing per-(category, quarter) Parquet partitions in parallel

pub mod archive;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod period;
pub mod processor;
pub mod projector;
pub mod sniffer;
pub mod writer;

pub use config::Config;
pub use error::{FilingError, Result};
pub use models::{Delimiter, FilerType, RawFiling, ReportingPeriod, RunReport};
pub use processor::FilingProcessor;
