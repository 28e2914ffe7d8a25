//! Post-write dimension check.
//!
//! Re-reads the file the writer just produced and cross-checks its shape
//! against the counters collected while parsing. This is a coarse sanity
//! check on dimensions, not a round-trip verification of cell content.

use std::path::Path;

use crate::error::{ValidationError, ValidationResult};
use crate::parser::read_lines;

/// Validate the written CSV against the parse-time counters.
///
/// Two assertions:
///
/// - `row_count` equals the number of lines minus the header;
/// - `declared_count` equals the comma-separated field count of the first
///   line plus one, the one being the row-identifier column that was
///   dropped from the output.
///
/// The field count is a naive comma split of the header line, exactly as
/// coarse as it sounds: a quoted header containing a comma would miscount.
pub fn validate_output<P: AsRef<Path>>(
    path: P,
    row_count: usize,
    declared_count: usize,
) -> ValidationResult<()> {
    let lines = read_lines(path, "utf-8")?;

    let actual_rows = lines.len().saturating_sub(1);
    if lines.is_empty() || row_count != actual_rows {
        return Err(ValidationError::RowCountMismatch {
            expected: row_count,
            actual: actual_rows,
        });
    }

    let actual_columns = lines[0].split(',').count() + 1;
    if declared_count != actual_columns {
        return Err(ValidationError::ColumnCountMismatch {
            expected: declared_count,
            actual: actual_columns,
        });
    }

    Ok(())
}
