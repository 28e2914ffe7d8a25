//! CSV serialization of joined records.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::Writer;

use crate::error::{WriteError, WriteResult};
use crate::models::Record;

/// Write records as comma-separated CSV with a header row.
///
/// The header is the field set of the first record, in that record's own
/// order. Every record is then written in its own field order. All records
/// of a join share one field set by construction; nothing here re-checks
/// that, so a hand-built ragged record set would misalign silently.
///
/// Quoting and escaping are the `csv` crate defaults.
pub fn write_csv<P: AsRef<Path>>(records: &[Record], path: P) -> WriteResult<()> {
    let first = records.first().ok_or(WriteError::EmptyResult)?;

    let file = File::create(path.as_ref())?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    writer.write_record(first.keys())?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer.flush()?;

    Ok(())
}
