use crate::ports::outbound::{LockfileReader, TreeSourceReader};
use crate::shared::error::LockTreeError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

/// FileSystemReader adapter for reading files from the file system
///
/// This adapter implements both LockfileReader and TreeSourceReader ports.
/// Every read goes through the symlink, regular-file and size checks of
/// `shared::security`.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn read_checked(&self, path: &Path, file_description: &str) -> Result<String> {
        read_regular_file(path, file_description).map_err(|e| {
            LockTreeError::invalid_input_at(e.to_string(), path.display().to_string()).into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, lockfile_path: &Path) -> Result<String> {
        if !lockfile_path.exists() {
            return Err(LockTreeError::invalid_input_at(
                "lockfile does not exist; pass the path of a package-lock.json or yarn.lock file",
                lockfile_path.display().to_string(),
            )
            .into());
        }

        self.read_checked(lockfile_path, "lockfile")
    }
}

impl TreeSourceReader for FileSystemReader {
    fn read_source(&self, path: &Path) -> Result<String> {
        self.read_checked(path, "tree source")
    }

    fn source_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
