//! Column projection for classified records.
//!
//! Restricts each record to the identifier, the reporting period, and
//! the variable columns of its assigned filer category, producing one
//! DataFrame per (category, period) with a shared schema. Populated
//! columns from other prefix groups never reach the output.

use crate::constants::{CANONICAL_ID_COLUMN, PERIOD_COLUMN};
use crate::error::Result;
use crate::models::{FilingRow, ReportingPeriod};
use chrono::NaiveDate;
use polars::prelude::*;

/// Days since the Unix epoch, the physical representation of a Date
/// column.
fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

/// Assemble the partition DataFrame for one filer category.
///
/// Column order is fixed: `RSSD_ID`, `REPORTING_PERIOD`, then the
/// category's variable columns in header order. Missing values stay
/// null.
pub fn build_partition_frame(
    header: &[String],
    variable_indices: &[usize],
    rows: &[FilingRow],
    period: &ReportingPeriod,
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(variable_indices.len() + 2);

    let ids: Vec<i64> = rows.iter().map(|row| row.rssd_id).collect();
    columns.push(Column::new(CANONICAL_ID_COLUMN.into(), ids));

    let days = days_since_epoch(period.quarter_end());
    let period_column =
        Column::new(PERIOD_COLUMN.into(), vec![days; rows.len()]).cast(&DataType::Date)?;
    columns.push(period_column);

    for &idx in variable_indices {
        let values: Vec<Option<String>> = rows
            .iter()
            .map(|row| row.fields.get(idx).cloned().flatten())
            .collect();
        columns.push(Column::new(header[idx].as_str().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}
