//! Core data structures and types for FR Y-9 filing conversion.
//!
//! Defines filer categories, reporting periods, detected file formats,
//! and the per-file / per-run outcome structures used throughout the
//! library.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Filer categories an FR Y-9 record can belong to.
///
/// The declaration order is the tie-break priority: when two or more
/// prefix groups tie at a positive value count, the earlier category
/// wins (quarterly Y-9C ranks above Y-9LP, which ranks above the
/// semi-annual Y-9SP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilerType {
    Y9c,
    Y9lp,
    Y9sp,
}

impl FilerType {
    /// All categories, in tie-break priority order.
    pub const ALL: [FilerType; 3] = [FilerType::Y9c, FilerType::Y9lp, FilerType::Y9sp];

    /// Column-name prefix identifying this category's variable group.
    pub fn prefix(&self) -> &'static str {
        match self {
            FilerType::Y9c => "BHCK",
            FilerType::Y9lp => "BHCP",
            FilerType::Y9sp => "BHSP",
        }
    }

    /// Output subdirectory holding this category's partitions.
    pub fn dir_name(&self) -> &'static str {
        match self {
            FilerType::Y9c => "y_9c",
            FilerType::Y9lp => "y_9lp",
            FilerType::Y9sp => "y_9sp",
        }
    }

    /// Regulatory form name.
    pub fn label(&self) -> &'static str {
        match self {
            FilerType::Y9c => "FR Y-9C",
            FilerType::Y9lp => "FR Y-9LP",
            FilerType::Y9sp => "FR Y-9SP",
        }
    }

    /// Position in [`FilerType::ALL`], used for indexing count arrays.
    pub fn index(&self) -> usize {
        match self {
            FilerType::Y9c => 0,
            FilerType::Y9lp => 1,
            FilerType::Y9sp => 2,
        }
    }
}

impl fmt::Display for FilerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A calendar quarter a filing reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    year: i32,
    quarter: u8,
}

impl ReportingPeriod {
    /// Create a period; `quarter` must be 1..=4 and `year` a plausible
    /// filing year.
    pub fn new(year: i32, quarter: u8) -> Option<Self> {
        if (1..=4).contains(&quarter) && (1900..=2100).contains(&year) {
            Some(Self { year, quarter })
        } else {
            None
        }
    }

    /// Period for the calendar quarter containing the given month.
    pub fn from_month(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Self::new(year, ((month - 1) / 3 + 1) as u8)
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Partition label, e.g. `1986Q1`.
    pub fn label(&self) -> String {
        format!("{}Q{}", self.year, self.quarter)
    }

    /// Last day of the quarter, the value of the period column.
    pub fn quarter_end(&self) -> NaiveDate {
        let (month, day) = match self.quarter {
            1 => (3, 31),
            2 => (6, 30),
            3 => (9, 30),
            _ => (12, 31),
        };
        NaiveDate::from_ymd_opt(self.year, month, day).expect("quarter end within chrono range")
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Field delimiters used across the two source eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    /// Legacy comma-separated files (Chicago Fed era).
    Comma,
    /// Caret-separated files (FFIEC era, 2021 Q2 onwards).
    Caret,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Caret => b'^',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }
}

/// A discovered input file, ready for conversion.
///
/// Owned exclusively by the worker task converting it; never shared.
#[derive(Debug, Clone)]
pub struct RawFiling {
    pub path: PathBuf,
    pub delimiter: Delimiter,
    pub period: ReportingPeriod,
}

/// One parsed filing record: the institution identifier plus the full
/// header-aligned field vector (missing fields are `None`).
#[derive(Debug, Clone)]
pub struct FilingRow {
    pub rssd_id: i64,
    pub fields: Vec<Option<String>>,
}

/// A partition written for one (filer category, period) pair.
#[derive(Debug, Clone)]
pub struct PartitionSummary {
    pub filer_type: FilerType,
    pub records: usize,
    pub variables: usize,
    pub path: PathBuf,
}

/// Conversion outcome for one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub period: ReportingPeriod,
    pub partitions: Vec<PartitionSummary>,
    /// Partitions that failed to write (category, reason); siblings
    /// already written are kept.
    pub write_failures: Vec<(FilerType, String)>,
    /// Records with zero non-missing values across all prefix groups.
    pub records_unclassified: usize,
    /// Records dropped for a missing or non-integer identifier.
    pub records_missing_id: usize,
    /// Raw rows the CSV reader could not decode.
    pub rows_skipped: usize,
}

impl FileOutcome {
    pub fn records_written(&self) -> usize {
        self.partitions.iter().map(|p| p.records).sum()
    }

    /// One-line summary in the per-file log format.
    pub fn summary(&self) -> String {
        if self.partitions.is_empty() {
            return "no classifiable records".to_string();
        }
        self.partitions
            .iter()
            .map(|p| {
                format!(
                    "{}: {} filers, {} vars",
                    p.filer_type.dir_name(),
                    p.records,
                    p.variables
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Aggregated result of one conversion run, collected after the worker
/// pool drains. This is the only run-level state; workers never share it.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files_processed: usize,
    pub files_skipped: Vec<(PathBuf, String)>,
    pub archives_extracted: usize,
    pub archives_skipped: usize,
    pub archives_failed: Vec<(PathBuf, String)>,
    pub partitions_written: usize,
    pub partitions_failed: usize,
    pub records_written: usize,
    pub records_unclassified: usize,
    pub records_missing_id: usize,
    pub rows_skipped: usize,
    pub processing_time: Duration,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    /// Fold one successful file outcome into the run totals.
    pub fn absorb(&mut self, outcome: FileOutcome) {
        self.files_processed += 1;
        self.partitions_written += outcome.partitions.len();
        self.partitions_failed += outcome.write_failures.len();
        self.records_written += outcome.records_written();
        self.records_unclassified += outcome.records_unclassified;
        self.records_missing_id += outcome.records_missing_id;
        self.rows_skipped += outcome.rows_skipped;
        self.outcomes.push(outcome);
    }

    pub fn record_skip(&mut self, path: PathBuf, reason: String) {
        self.files_skipped.push((path, reason));
    }

    /// Earliest and latest quarter successfully converted.
    pub fn period_range(&self) -> Option<(ReportingPeriod, ReportingPeriod)> {
        let min = self.outcomes.iter().map(|o| o.period).min()?;
        let max = self.outcomes.iter().map(|o| o.period).max()?;
        Some((min, max))
    }

    /// True when at least one partition landed on disk; the process
    /// exits successfully iff this holds.
    pub fn wrote_any(&self) -> bool {
        self.partitions_written > 0
    }
}
