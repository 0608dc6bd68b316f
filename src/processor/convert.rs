//! Per-file conversion pipeline.
//!
//! Runs one filing file through the full chain: delimiter sniffing,
//! period resolution, record parsing, per-record classification,
//! per-category projection, and partition writing. Each invocation owns
//! its file exclusively and writes to partition paths no other file can
//! produce (period x category), so conversions compose in parallel
//! without coordination.

use crate::classifier::{PrefixColumns, classify_record};
use crate::constants::{CANONICAL_ID_COLUMN, RAW_ID_COLUMN};
use crate::error::{FilingError, Result};
use crate::models::{FileOutcome, FilerType, FilingRow, PartitionSummary, RawFiling};
use crate::period::resolve_period;
use crate::projector::build_partition_frame;
use crate::sniffer::detect_delimiter;
use crate::writer::write_partition;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Resolve a path into a [`RawFiling`]: period from the filename,
/// delimiter from the header. Fails without touching record content.
pub fn resolve_filing(path: &Path) -> Result<RawFiling> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilingError::UnrecognizedFilename {
            name: path.display().to_string(),
        })?;

    let period = resolve_period(filename)?;
    let delimiter = detect_delimiter(path)?;

    Ok(RawFiling {
        path: path.to_path_buf(),
        delimiter,
        period,
    })
}

/// Convert one filing file into its per-category Parquet partitions.
pub fn convert_filing(path: &Path, output_dir: &Path) -> Result<FileOutcome> {
    let filing = resolve_filing(path)?;
    debug!(
        "Converting {} ({}, delimiter {:?})",
        path.display(),
        filing.period,
        filing.delimiter
    );

    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(filing.delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    // Uppercase and trim the header; column membership below is driven
    // entirely by these names.
    let header: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().to_uppercase())
        .collect();

    let id_index = header
        .iter()
        .position(|name| name == RAW_ID_COLUMN || name == CANONICAL_ID_COLUMN)
        .ok_or_else(|| FilingError::MissingIdentifier {
            path: path.to_path_buf(),
        })?;

    let prefix_columns = PrefixColumns::from_header(&header);

    let mut buckets: BTreeMap<FilerType, Vec<FilingRow>> = BTreeMap::new();
    let mut records_unclassified = 0usize;
    let mut records_missing_id = 0usize;
    let mut rows_skipped = 0usize;

    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping undecodable row in {}: {}", path.display(), e);
                rows_skipped += 1;
                continue;
            }
        };

        let fields = normalize_fields(&record, header.len());

        if is_separator_row(&fields) {
            continue;
        }

        let Some(rssd_id) = fields
            .get(id_index)
            .and_then(|f| f.as_deref())
            .and_then(parse_identifier)
        else {
            records_missing_id += 1;
            continue;
        };

        match classify_record(&fields, &prefix_columns) {
            Some(filer) => buckets
                .entry(filer)
                .or_default()
                .push(FilingRow { rssd_id, fields }),
            None => records_unclassified += 1,
        }
    }

    let mut partitions = Vec::new();
    let mut write_failures = Vec::new();

    for (filer, rows) in &buckets {
        let variable_indices = prefix_columns.indices(*filer);
        let mut df = build_partition_frame(&header, variable_indices, rows, &filing.period)?;

        match write_partition(&mut df, output_dir, *filer, &filing.period) {
            Ok(partition_path) => partitions.push(PartitionSummary {
                filer_type: *filer,
                records: rows.len(),
                variables: variable_indices.len(),
                path: partition_path,
            }),
            Err(e) => {
                // One failed partition does not roll back siblings.
                warn!("{}", e);
                write_failures.push((*filer, e.to_string()));
            }
        }
    }

    if partitions.is_empty() && write_failures.is_empty() {
        warn!(
            "No classifiable records in {} ({} unclassified, {} missing identifier)",
            path.display(),
            records_unclassified,
            records_missing_id
        );
    }

    Ok(FileOutcome {
        file: path.to_path_buf(),
        period: filing.period,
        partitions,
        write_failures,
        records_unclassified,
        records_missing_id,
        rows_skipped,
    })
}

/// Decode a raw record into a header-aligned field vector. Fields are
/// decoded lossily (older files carry latin-1 bytes), trimmed, and
/// mapped to `None` when empty; rows shorter than the header are padded
/// with `None`.
fn normalize_fields(record: &csv::ByteRecord, width: usize) -> Vec<Option<String>> {
    (0..width)
        .map(|idx| {
            record.get(idx).and_then(|raw| {
                let value = String::from_utf8_lossy(raw);
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        })
        .collect()
}

/// FFIEC files carry a dashed separator row below the header.
fn is_separator_row(fields: &[Option<String>]) -> bool {
    fields
        .first()
        .and_then(|f| f.as_deref())
        .is_some_and(|value| value.chars().all(|c| c == '-'))
}

/// Parse the institution identifier, tolerating a decimal rendering of
/// an integral value (e.g. `12345.0`).
fn parse_identifier(raw: &str) -> Option<i64> {
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    let float: f64 = raw.parse().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}
