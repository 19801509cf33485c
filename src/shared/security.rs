use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum input file size (100 MB)
/// Lockfiles of large monorepos reach tens of megabytes; anything beyond
/// this is rejected before it is read into memory.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a file after checking that it is a regular file within the size limit
///
/// # Security
/// Uses `symlink_metadata()` so a symbolic link is rejected instead of
/// followed.
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Description used in error messages (e.g. "lockfile")
///
/// # Errors
/// Returns an error if:
/// - The metadata cannot be read (missing file, permissions)
/// - The path is a symbolic link or not a regular file
/// - The file exceeds `MAX_FILE_SIZE`
/// - The content is not valid UTF-8
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
