use crate::shared::Result;
use std::path::Path;

/// LockfileReader port for reading lockfile contents
///
/// This port abstracts the file system operations needed to read a
/// package-lock.json or yarn.lock before alias preprocessing.
pub trait LockfileReader {
    /// Reads the lockfile at the given path
    ///
    /// # Arguments
    /// * `lockfile_path` - Path to the lockfile itself (not its directory)
    ///
    /// # Returns
    /// The raw content of the lockfile as a string
    ///
    /// # Errors
    /// Returns an error if:
    /// - The lockfile does not exist
    /// - The file cannot be read due to permissions or I/O errors
    fn read_lockfile(&self, lockfile_path: &Path) -> Result<String>;
}
