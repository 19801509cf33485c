use crate::shared::Result;
use std::path::Path;

/// TreeSourceReader port for reading tree inputs
///
/// Dependency graph JSON, `npm ls` listings and fixture trees are all read
/// through this port so use cases can be exercised without a file system.
pub trait TreeSourceReader {
    /// Reads the whole source as text
    ///
    /// # Errors
    /// Returns `InvalidUserInputError` when the source cannot be read.
    fn read_source(&self, path: &Path) -> Result<String>;

    /// Whether a source exists at `path`
    fn source_exists(&self, path: &Path) -> bool;
}
