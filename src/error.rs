//! Error types for the stageload pipeline.
//!
//! This module defines one error type per pipeline stage:
//!
//! - [`ReadError`] - file open/decode failures
//! - [`ParseError`] - malformed column-definition lines
//! - [`JoinError`] - missing or ragged column data
//! - [`WriteError`] - CSV serialization failures
//! - [`ValidationError`] - post-write dimension mismatches
//! - [`StorageError`] - directory creation or relocation failures
//! - [`EtlError`] - top-level wrapper over all of the above
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries while callers
//! can still match on the failing stage.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while reading and decoding an input file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to open or read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The configured encoding label is not recognized.
    #[error("Unknown encoding label: {0}")]
    UnknownEncoding(String),

    /// The file contents are not valid in the configured encoding.
    #[error("Input is not valid {0}")]
    Decode(String),
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while parsing the column-definition file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The first field of a definition line is absent or not an integer.
    #[error("Line {line}: missing index (first field must be an integer)")]
    MissingIndex { line: usize },

    /// A definition line has an index but no column name.
    #[error("Line {line}: missing column name")]
    MissingName { line: usize },

    /// Underlying read failure.
    #[error(transparent)]
    Read(#[from] ReadError),
}

// =============================================================================
// Join Errors
// =============================================================================

/// Errors while joining column definitions against the data columns.
#[derive(Debug, Error)]
pub enum JoinError {
    /// A declared column index has no data column at all.
    #[error("Column {index} ('{name}') is declared but absent from the data file")]
    MissingColumn { index: usize, name: String },

    /// A data column is too short for the requested row (ragged input).
    #[error("Column {index} ('{name}') has {len} values, row {row} is out of range")]
    ShortColumn {
        index: usize,
        name: String,
        row: usize,
        len: usize,
    },
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while serializing joined records to CSV.
#[derive(Debug, Error)]
pub enum WriteError {
    /// No records to write, so no header can be derived.
    #[error("No records to write")]
    EmptyResult,

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors from the post-write dimension check.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The written file does not contain one line per data row plus a header.
    #[error("Row count mismatch: expected {expected} data rows, output has {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// The header field count does not match the declared column count.
    #[error("Column count mismatch: expected {expected} declared columns, output implies {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// The written file could not be read back.
    #[error("Cannot re-read output: {0}")]
    Unreadable(#[from] ReadError),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from directory provisioning and file relocation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file to relocate does not exist.
    #[error("Source file does not exist: {0}")]
    MissingSource(PathBuf),

    /// The move could not complete.
    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::run`].
/// Each variant tags the stage that failed.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Input read error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// Column-definition parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Join error.
    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    /// CSV write error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Post-write validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for read operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for join operations.
pub type JoinResult<T> = Result<T, JoinError>;

/// Result type for write operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;
