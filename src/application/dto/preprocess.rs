use crate::dependency_tree::domain::{AliasMap, LockfileFormat};
use std::path::PathBuf;

/// Request to resolve the aliases of one lockfile
#[derive(Debug, Clone)]
pub struct PreprocessRequest {
    pub lockfile_path: PathBuf,
}

impl PreprocessRequest {
    pub fn new(lockfile_path: PathBuf) -> Self {
        Self { lockfile_path }
    }
}

/// Alias-free lockfile text together with what was rewritten
#[derive(Debug, Clone)]
pub struct PreprocessResponse {
    pub format: LockfileFormat,
    pub content: String,
    pub aliases: AliasMap,
}
