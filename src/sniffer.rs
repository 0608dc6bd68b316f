//! Field delimiter detection for filing files.
//!
//! Legacy Chicago Fed drops are comma-separated; FFIEC drops from
//! 2021 Q2 onwards use a caret. The delimiter is decided from the
//! header line alone: a caret anywhere in it selects the caret format,
//! anything else falls back to the legacy comma.

use crate::error::{FilingError, Result};
use crate::models::Delimiter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Detect the field delimiter from the first line of `path`.
///
/// Returns an error when the header is missing or empty, or when
/// neither delimiter splits it into more than one column.
pub fn detect_delimiter(path: &Path) -> Result<Delimiter> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line)?;

    // Older files can carry latin-1 bytes; decode lossily.
    let header = String::from_utf8_lossy(&first_line);
    let header = header.trim_end_matches(['\r', '\n']);

    if header.trim().is_empty() {
        return Err(FilingError::UnparseableFormat {
            path: path.to_path_buf(),
            reason: "header line is empty".to_string(),
        });
    }

    let delimiter = if header.contains(Delimiter::Caret.as_char()) {
        Delimiter::Caret
    } else {
        Delimiter::Comma
    };

    let columns = header.split(delimiter.as_char()).count();
    if columns < 2 {
        return Err(FilingError::UnparseableFormat {
            path: path.to_path_buf(),
            reason: "neither delimiter yields more than one column".to_string(),
        });
    }

    Ok(delimiter)
}
