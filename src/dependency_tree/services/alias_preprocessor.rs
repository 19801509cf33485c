use super::{NpmAliasPreprocessor, YarnAliasPreprocessor};
use crate::dependency_tree::domain::{AliasMap, LockfileFormat};
use crate::shared::error::LockTreeError;
use crate::shared::Result;

/// Prefix marking an aliased specifier, as in `npm:real@1.2.3`
pub const NPM_ALIAS_PREFIX: &str = "npm:";

/// Lockfile text with aliases resolved, plus the aliases that were found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRewrite {
    pub content: String,
    pub aliases: AliasMap,
}

/// Result of preprocessing a lockfile of any supported format
#[derive(Debug, Clone)]
pub struct PreprocessedLockfile {
    pub format: LockfileFormat,
    pub content: String,
    pub aliases: AliasMap,
}

/// Detects the lockfile format and applies the matching alias rewrite
pub struct AliasPreprocessor;

impl AliasPreprocessor {
    /// # Errors
    /// - `InvalidUserInputError` for unrecognizable or malformed content
    /// - `UnsupportedError` for npm v3 lockfiles (no `dependencies` section)
    ///   and yarn berry lockfiles
    pub fn preprocess(content: &str) -> Result<PreprocessedLockfile> {
        let format = LockfileFormat::detect(content)?;

        let rewrite = match format {
            LockfileFormat::NpmV1 | LockfileFormat::NpmV2 => NpmAliasPreprocessor::rewrite(content)?,
            LockfileFormat::YarnV1 => YarnAliasPreprocessor::rewrite(content)?,
            LockfileFormat::NpmV3 | LockfileFormat::YarnV2 => {
                return Err(LockTreeError::unsupported(format!(
                    "alias preprocessing is not implemented for {}",
                    format
                ))
                .into());
            }
        };

        Ok(PreprocessedLockfile {
            format,
            content: rewrite.content,
            aliases: rewrite.aliases,
        })
    }
}
