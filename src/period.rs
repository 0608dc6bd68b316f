//! Reporting period resolution from filenames.
//!
//! The period a file covers is encoded in its name, never its content,
//! so resolution succeeds even for files whose payload is malformed.
//! Two conventions exist:
//!
//! - legacy `bhcfYYMM`: two-digit year plus quarter-end month code
//!   (03, 06, 09, 12), e.g. `bhcf8603.csv` = 1986 Q1
//! - recent `bhcfYYYYMMDD`: a full date mapped to the calendar quarter
//!   containing it, e.g. `BHCF20210630.zip` = 2021 Q2

use crate::error::{FilingError, Result};
use crate::models::ReportingPeriod;
use regex::Regex;
use std::sync::LazyLock;

static RECENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bhcf(\d{4})(\d{2})(\d{2})").expect("valid regex"));

static LEGACY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bhcf(\d{2})(\d{2})").expect("valid regex"));

/// Resolve the reporting period from a filing or archive filename.
///
/// The recent (full-date) convention is tried first; `bhcf20210630`
/// would otherwise be misread by the legacy pattern as year 20,
/// month 21.
pub fn resolve_period(filename: &str) -> Result<ReportingPeriod> {
    let name = filename.to_lowercase();

    if let Some(caps) = RECENT_PATTERN.captures(&name) {
        let year: i32 = caps[1].parse().expect("digits");
        let month: u32 = caps[2].parse().expect("digits");
        return ReportingPeriod::from_month(year, month).ok_or_else(|| {
            FilingError::UnrecognizedFilename {
                name: filename.to_string(),
            }
        });
    }

    if let Some(caps) = LEGACY_PATTERN.captures(&name) {
        let year_code: i32 = caps[1].parse().expect("digits");
        let year = if year_code < 50 {
            2000 + year_code
        } else {
            1900 + year_code
        };
        let quarter = match &caps[2] {
            "03" => 1,
            "06" => 2,
            "09" => 3,
            "12" => 4,
            _ => {
                return Err(FilingError::UnrecognizedFilename {
                    name: filename.to_string(),
                });
            }
        };
        return ReportingPeriod::new(year, quarter).ok_or_else(|| {
            FilingError::UnrecognizedFilename {
                name: filename.to_string(),
            }
        });
    }

    Err(FilingError::UnrecognizedFilename {
        name: filename.to_string(),
    })
}
