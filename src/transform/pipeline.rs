//! The six-stage ETL pipeline.
//!
//! Parse columns → parse data → join → write CSV → validate → relocate.
//! Directories are provisioned up front; the first failing stage aborts
//! the run and previously created directories stay in place.
//!
//! # Example
//!
//! ```rust,ignore
//! use stageload::{run, EtlOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(&EtlOptions::default())?;
//!     println!("Delivered {} rows to {}", report.row_count, report.output_path.display());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::joiner::join;
use crate::error::EtlResult;
use crate::parser::{parse_columns, parse_data};
use crate::storage::StorageRelocator;
use crate::validation::validate_output;
use crate::writer::write_csv;

/// Configuration for one pipeline run.
///
/// Everything the run touches is named here; nothing is derived from the
/// working directory behind the caller's back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlOptions {
    /// Column-definition file, `<index><sep><name>` per line.
    pub columns_path: PathBuf,

    /// Data file, one record per line, column 1 is the row identifier.
    pub data_path: PathBuf,

    /// Encoding label for both input files (`auto` to detect).
    pub encoding: String,

    /// Field separator of both input files.
    pub separator: char,

    /// Where the CSV is written before relocation.
    pub stage_path: PathBuf,

    /// Directory the CSV is delivered to.
    pub destination_dir: PathBuf,
}

impl Default for EtlOptions {
    fn default() -> Self {
        Self {
            columns_path: PathBuf::from("data/source/SOURCECOLUMNS.txt"),
            data_path: PathBuf::from("data/source/SOURCEDATA.txt"),
            encoding: "utf-8".to_string(),
            separator: '|',
            stage_path: PathBuf::from("data/stage/joined_output.csv"),
            destination_dir: PathBuf::from("data/destination"),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct EtlReport {
    /// Data rows read and written.
    pub row_count: usize,

    /// Definition lines read, duplicates included.
    pub declared_column_count: usize,

    /// Columns in the output, row identifier excluded.
    pub output_column_count: usize,

    /// Encoding the inputs were decoded with.
    pub encoding: String,

    /// Separator the inputs were split on.
    pub separator: char,

    /// Final path of the delivered CSV.
    pub output_path: PathBuf,
}

/// Run the full pipeline.
///
/// Progress goes to standard output, one line per stage. Any stage failure
/// is returned as the matching [`crate::error::EtlError`] variant; nothing
/// is retried or rolled back.
pub fn run(options: &EtlOptions) -> EtlResult<EtlReport> {
    let stage_dir = options
        .stage_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let relocator = StorageRelocator::new(stage_dir, &options.destination_dir);
    relocator.ensure_directories()?;

    println!(
        "📖 Parsing column definitions: {}",
        options.columns_path.display()
    );
    let layout = parse_columns(&options.columns_path, &options.encoding, options.separator)?;
    println!(
        "   {} definition lines, {} output columns",
        layout.declared_count,
        layout.output_width()
    );

    println!("📄 Parsing data: {}", options.data_path.display());
    let data = parse_data(&options.data_path, &options.encoding, options.separator)?;
    println!("   {} rows", data.row_count);

    println!("🔗 Joining columns and data...");
    let records = join(&layout, &data)?;

    println!("💾 Writing CSV to stage: {}", options.stage_path.display());
    write_csv(&records, &options.stage_path)?;

    println!("✔️  Validating output dimensions...");
    validate_output(&options.stage_path, data.row_count, layout.declared_count)?;

    println!(
        "📦 Loading file to storage medium: {}",
        options.destination_dir.display()
    );
    let output_path = relocator.relocate(&options.stage_path)?;
    println!("✨ Load completed: {}", output_path.display());

    Ok(EtlReport {
        row_count: data.row_count,
        declared_column_count: layout.declared_count,
        output_column_count: layout.output_width(),
        encoding: options.encoding.clone(),
        separator: options.separator,
        output_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use std::fs;
    use tempfile::tempdir;

    fn options_in(root: &Path) -> EtlOptions {
        EtlOptions {
            columns_path: root.join("source/SOURCECOLUMNS.txt"),
            data_path: root.join("source/SOURCEDATA.txt"),
            encoding: "utf-8".to_string(),
            separator: '|',
            stage_path: root.join("stage/joined_output.csv"),
            destination_dir: root.join("destination"),
        }
    }

    fn write_sources(root: &Path, columns: &str, data: &str) {
        fs::create_dir_all(root.join("source")).unwrap();
        fs::write(root.join("source/SOURCECOLUMNS.txt"), columns).unwrap();
        fs::write(root.join("source/SOURCEDATA.txt"), data).unwrap();
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempdir().unwrap();
        write_sources(
            dir.path(),
            "1|id\n2|name\n3|age\n",
            "A1|Alice|30\nA2|Bob|25\n",
        );

        let report = run(&options_in(dir.path())).unwrap();

        assert_eq!(report.row_count, 2);
        assert_eq!(report.declared_column_count, 3);
        assert_eq!(report.output_column_count, 2);

        let delivered = dir.path().join("destination/joined_output.csv");
        assert_eq!(report.output_path, delivered);
        assert_eq!(
            fs::read_to_string(delivered).unwrap(),
            "name,age\nAlice,30\nBob,25\n"
        );
        // The staged copy is gone after relocation.
        assert!(!dir.path().join("stage/joined_output.csv").exists());
    }

    #[test]
    fn test_run_unsorted_definitions_sorted_in_output() {
        let dir = tempdir().unwrap();
        write_sources(
            dir.path(),
            "3|age\n1|id\n2|name\n",
            "A1|Alice|30\n",
        );

        let report = run(&options_in(dir.path())).unwrap();

        assert_eq!(
            fs::read_to_string(report.output_path).unwrap(),
            "name,age\nAlice,30\n"
        );
    }

    #[test]
    fn test_run_ragged_data_fails_join() {
        let dir = tempdir().unwrap();
        write_sources(
            dir.path(),
            "1|id\n2|name\n3|age\n",
            "A1|Alice|30\nA2|Bob\n",
        );

        let err = run(&options_in(dir.path())).unwrap_err();
        assert!(matches!(err, EtlError::Join(_)));
        // Directories stay in place, no rollback.
        assert!(dir.path().join("stage").is_dir());
        assert!(dir.path().join("destination").is_dir());
    }

    #[test]
    fn test_run_empty_data_fails_write() {
        let dir = tempdir().unwrap();
        write_sources(dir.path(), "1|id\n2|name\n", "");

        let err = run(&options_in(dir.path())).unwrap_err();
        assert!(matches!(err, EtlError::Write(_)));
    }

    #[test]
    fn test_run_duplicate_index_fails_validation() {
        // A duplicated index shrinks the unique key set but still counts as
        // a definition line, so the post-write dimension check trips.
        let dir = tempdir().unwrap();
        write_sources(
            dir.path(),
            "1|id\n2|name\n2|nickname\n",
            "A1|Alice\nA2|Bob\n",
        );

        let err = run(&options_in(dir.path())).unwrap_err();
        assert!(matches!(err, EtlError::Validation(_)));
    }
}
