use super::alias_preprocessor::{AliasRewrite, NPM_ALIAS_PREFIX};
use crate::dependency_tree::domain::{split_name_version, AliasMap, AliasTarget};
use crate::shared::error::LockTreeError;
use crate::shared::Result;
use serde_json::Value;

/// Rewrites `"alias": { "version": "npm:real@1.2.3" }` entries of an npm
/// lockfile's `dependencies` object into `"real": { "version": "1.2.3" }`
///
/// Pure text-to-text transformation; the structural lockfile parser never
/// sees alias syntax.
pub struct NpmAliasPreprocessor;

impl NpmAliasPreprocessor {
    /// Resolves every aliased top-level dependency
    ///
    /// The aliased entry is deep-copied under the real package name with the
    /// real version, then the alias key is removed. When the real name is
    /// already present it is overwritten in place (last alias processed
    /// wins); new keys are appended, so the document's own key order is
    /// otherwise kept.
    ///
    /// # Errors
    /// Returns `InvalidUserInputError` when the content is not valid JSON or
    /// an alias has no `@` between the real name and version.
    pub fn rewrite(content: &str) -> Result<AliasRewrite> {
        let mut lockfile: Value = serde_json::from_str(content).map_err(|e| {
            LockTreeError::invalid_input_at(
                format!("package-lock.json is not valid JSON: {}", e),
                format!("line {}", e.line()),
            )
        })?;

        let mut aliases = AliasMap::new();

        if let Some(dependencies) = lockfile
            .get_mut("dependencies")
            .and_then(Value::as_object_mut)
        {
            let alias_keys: Vec<String> = dependencies
                .iter()
                .filter(|(_, entry)| alias_version(entry).is_some())
                .map(|(key, _)| key.clone())
                .collect();

            for key in alias_keys {
                // An earlier alias may already have replaced this entry.
                let Some(entry) = dependencies.get(&key) else {
                    continue;
                };
                let Some(aliased_version) = alias_version(entry) else {
                    continue;
                };

                let original_alias_target = aliased_version.to_string();
                let target = &original_alias_target[NPM_ALIAS_PREFIX.len()..];
                let (real_name, real_version) = split_name_version(target).ok_or_else(|| {
                    LockTreeError::invalid_input_at(
                        format!(
                            "alias '{}' must have the form npm:<name>@<version>, got '{}'",
                            key, original_alias_target
                        ),
                        format!("dependencies.{}", key),
                    )
                })?;
                let (real_name, real_version) = (real_name.to_string(), real_version.to_string());

                let mut resolved = entry.clone();
                if let Some(fields) = resolved.as_object_mut() {
                    fields.insert("version".to_string(), Value::String(real_version.clone()));
                }

                aliases.insert(
                    key.clone(),
                    AliasTarget {
                        resolved_name: real_name.clone(),
                        resolved_version: real_version,
                        original_alias_target,
                    },
                );

                let aliased_to_itself = real_name == key;
                dependencies.insert(real_name, resolved);
                if !aliased_to_itself {
                    dependencies.shift_remove(&key);
                }
            }
        }

        let mut content = serde_json::to_string_pretty(&lockfile)?;
        content.push('\n');

        Ok(AliasRewrite { content, aliases })
    }
}

fn alias_version(entry: &Value) -> Option<&str> {
    entry
        .get("version")
        .and_then(Value::as_str)
        .filter(|version| version.starts_with(NPM_ALIAS_PREFIX))
}
