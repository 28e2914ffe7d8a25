//! Storage collaborator: directory provisioning and final relocation.
//!
//! Both directories are explicit constructor arguments so nothing depends
//! on the working directory implicitly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StorageError, StorageResult};

/// Moves the staged output into its destination.
#[derive(Debug, Clone)]
pub struct StorageRelocator {
    stage_dir: PathBuf,
    destination_dir: PathBuf,
}

impl StorageRelocator {
    /// Create a relocator over an explicit stage and destination directory.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(stage_dir: P, destination_dir: Q) -> Self {
        Self {
            stage_dir: stage_dir.into(),
            destination_dir: destination_dir.into(),
        }
    }

    /// Create the stage and destination directories if absent. Idempotent.
    pub fn ensure_directories(&self) -> StorageResult<()> {
        for dir in [&self.stage_dir, &self.destination_dir] {
            fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Move `file_path` into the destination directory under its own file
    /// name, overwriting any existing file of the same name. Returns the
    /// final path.
    pub fn relocate<P: AsRef<Path>>(&self, file_path: P) -> StorageResult<PathBuf> {
        let source = file_path.as_ref();
        let file_name = source
            .file_name()
            .filter(|_| source.is_file())
            .ok_or_else(|| StorageError::MissingSource(source.to_path_buf()))?;

        let target = self.destination_dir.join(file_name);

        // Rename when possible; fall back to copy + remove for cross-device
        // moves.
        if fs::rename(source, &target).is_err() {
            fs::copy(source, &target)
                .and_then(|_| fs::remove_file(source))
                .map_err(|source_err| StorageError::Move {
                    from: source.to_path_buf(),
                    to: target.clone(),
                    source: source_err,
                })?;
        }

        Ok(target)
    }
}
