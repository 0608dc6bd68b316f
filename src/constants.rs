//! Shared constants for FR Y-9 filing conversion.

/// Raw institution identifier column as shipped in the source files.
pub const RAW_ID_COLUMN: &str = "RSSD9001";

/// Canonical institution identifier column in every partition.
pub const CANONICAL_ID_COLUMN: &str = "RSSD_ID";

/// Reporting period column added to every partition (quarter-end date).
pub const PERIOD_COLUMN: &str = "REPORTING_PERIOD";

/// Filename stem shared by all FR Y-9 filing files and archives.
pub const FILING_PREFIX: &str = "bhcf";

/// Default directory the downloader drops raw files into.
pub const DEFAULT_INPUT_DIR: &str = "data/raw";

/// Default directory for the partitioned Parquet store.
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";

/// Upper bound on the worker count accepted from the CLI.
pub const MAX_PARALLEL_WORKERS: usize = 128;
