use lockfile_tree::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock TreeSourceReader serving in-memory files keyed by path
#[derive(Default)]
pub struct MockTreeSourceReader {
    files: HashMap<PathBuf, String>,
}

impl MockTreeSourceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl TreeSourceReader for MockTreeSourceReader {
    fn read_source(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            LockTreeError::invalid_input_at("mock file not found", path.display().to_string())
                .into()
        })
    }

    fn source_exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
