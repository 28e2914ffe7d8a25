//! Domain models for the stageload pipeline.
//!
//! - [`ColumnLayout`] - column index to name mapping from the definition file
//! - [`DataColumns`] - column index to cell values from the data file
//! - [`Record`] - one output row, column name to cell value in output order

use indexmap::IndexMap;
use std::collections::BTreeMap;

/// The reserved row-identifier column. Always present as the first data
/// column, never part of the output.
pub const ROW_ID_INDEX: usize = 1;

// =============================================================================
// Column Layout
// =============================================================================

/// Column layout parsed from the column-definition file.
///
/// Keys are the 1-based indices declared in the file. They need not be
/// contiguous; `BTreeMap` keeps them in ascending order, which is the
/// output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column index to column name. Duplicate indices overwrite, last wins.
    pub names: BTreeMap<usize, String>,

    /// Number of definition lines read, duplicates included. This is the
    /// count the post-write validation checks against, not the unique key
    /// count.
    pub declared_count: usize,
}

impl ColumnLayout {
    /// Column names in output order: ascending index, row identifier excluded.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|(&index, _)| index != ROW_ID_INDEX)
            .map(|(_, name)| name.as_str())
    }

    /// Number of columns in the output.
    pub fn output_width(&self) -> usize {
        self.output_names().count()
    }
}

// =============================================================================
// Data Columns
// =============================================================================

/// Cell values from the data file, grouped by 1-based column position.
///
/// Every vector holds one value per input line in file order. Ragged input
/// lines produce vectors of unequal length; that is preserved here and
/// surfaces as a join error when a short column is referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataColumns {
    /// Column index to cell values.
    pub values: BTreeMap<usize, Vec<String>>,

    /// Number of data lines read.
    pub row_count: usize,
}

impl DataColumns {
    /// Number of rows the join iterates over: the length of the
    /// row-identifier column, zero when it is absent.
    pub fn data_length(&self) -> usize {
        self.values.get(&ROW_ID_INDEX).map_or(0, Vec::len)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One output row: column name to cell value, in output column order.
pub type Record = IndexMap<String, String>;
