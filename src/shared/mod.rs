/// Shared utilities: the error taxonomy, the crate-wide `Result` alias,
/// and file-access guards used by the filesystem adapters.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
