//! Join column definitions against data columns into output records.
//!
//! ```text
//! ColumnLayout (1→id, 2→name, 3→age)      Records
//! DataColumns  (1: [A1, A2],          →   [{name: Alice, age: 30},
//!               2: [Alice, Bob],           {name: Bob,   age: 25}]
//!               3: [30, 25])
//! ```
//!
//! Column 1 is the row identifier and never appears in a record. Field
//! order inside every record is ascending declared index.

use crate::error::{JoinError, JoinResult};
use crate::models::{ColumnLayout, DataColumns, Record, ROW_ID_INDEX};

/// Join the two mappings into one record per data row.
///
/// The row count is taken from the row-identifier column (zero when it is
/// absent, so an empty data file joins to an empty result). Every declared
/// index except the row identifier must resolve to a data column long
/// enough for the current row; ragged input surfaces here.
pub fn join(layout: &ColumnLayout, data: &DataColumns) -> JoinResult<Vec<Record>> {
    let data_length = data.data_length();
    let mut records = Vec::with_capacity(data_length);

    for row in 0..data_length {
        let mut record = Record::with_capacity(layout.output_width());

        for (&index, name) in &layout.names {
            if index == ROW_ID_INDEX {
                continue;
            }

            let column = data.values.get(&index).ok_or_else(|| JoinError::MissingColumn {
                index,
                name: name.clone(),
            })?;
            let cell = column.get(row).ok_or_else(|| JoinError::ShortColumn {
                index,
                name: name.clone(),
                row,
                len: column.len(),
            })?;

            record.insert(name.clone(), cell.clone());
        }

        records.push(record);
    }

    Ok(records)
}
