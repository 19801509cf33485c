use crate::shared::error::LockTreeError;
use crate::shared::Result;

/// Lockfile formats recognized by content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockfileFormat {
    /// package-lock.json with `lockfileVersion: 1`
    NpmV1,
    /// package-lock.json with `lockfileVersion: 2` (carries both `packages` and `dependencies`)
    NpmV2,
    /// package-lock.json with `lockfileVersion: 3` (`packages` only)
    NpmV3,
    /// Classic yarn.lock
    YarnV1,
    /// Yarn berry lockfile (YAML with `__metadata`)
    YarnV2,
}

impl LockfileFormat {
    /// Detects the format from the lockfile content
    ///
    /// # Errors
    /// Returns `InvalidUserInputError` when the content is neither an npm
    /// JSON lockfile nor a yarn lockfile, and `UnsupportedError` for an npm
    /// `lockfileVersion` this tool does not know.
    pub fn detect(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') {
            let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
                LockTreeError::invalid_input_at(
                    format!("package-lock.json is not valid JSON: {}", e),
                    format!("line {}", e.line()),
                )
            })?;
            return match value.get("lockfileVersion").and_then(|v| v.as_u64()) {
                None | Some(1) => Ok(LockfileFormat::NpmV1),
                Some(2) => Ok(LockfileFormat::NpmV2),
                Some(3) => Ok(LockfileFormat::NpmV3),
                Some(other) => Err(LockTreeError::unsupported(format!(
                    "npm lockfileVersion {} is not supported",
                    other
                ))
                .into()),
            };
        }

        let is_berry = content
            .lines()
            .any(|line| line.trim_end() == "__metadata:");
        if is_berry {
            return Ok(LockfileFormat::YarnV2);
        }

        let looks_like_yarn = content.lines().any(|line| {
            line.starts_with("# yarn lockfile v1")
                || (!line.starts_with([' ', '#']) && line.trim_end().ends_with(':'))
        });
        if looks_like_yarn {
            return Ok(LockfileFormat::YarnV1);
        }

        Err(LockTreeError::invalid_input("content is neither an npm nor a yarn lockfile").into())
    }
}

impl std::fmt::Display for LockfileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockfileFormat::NpmV1 => write!(f, "npm lockfile v1"),
            LockfileFormat::NpmV2 => write!(f, "npm lockfile v2"),
            LockfileFormat::NpmV3 => write!(f, "npm lockfile v3"),
            LockfileFormat::YarnV1 => write!(f, "yarn lockfile v1"),
            LockfileFormat::YarnV2 => write!(f, "yarn lockfile v2"),
        }
    }
}
