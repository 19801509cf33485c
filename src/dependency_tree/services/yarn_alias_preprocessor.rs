use super::alias_preprocessor::{AliasRewrite, NPM_ALIAS_PREFIX};
use crate::dependency_tree::domain::{split_name_version, AliasMap, AliasTarget};
use crate::shared::error::LockTreeError;
use crate::shared::Result;

/// Separator between an alias name and its `npm:` target inside a descriptor
const ALIAS_MARKER: &str = "@npm:";

/// Rewrites aliases in a classic (v1) yarn.lock
///
/// A block heading such as
///
/// ```text
/// "pad@npm:left-pad@^1.3.0", left-pad@^1.0.0:
/// ```
///
/// becomes `"left-pad@^1.3.0", left-pad@^1.0.0:`, and every dependency-list
/// reference `pad "npm:left-pad@^1.3.0"` becomes `left-pad "^1.3.0"`, so the
/// reference still resolves to the rewritten block.
///
/// Descriptors are matched against the alias map by exact token, never by
/// substring, so an alias name that is a prefix of another is left alone.
pub struct YarnAliasPreprocessor;

impl YarnAliasPreprocessor {
    /// # Errors
    /// Returns `InvalidUserInputError` when an alias target has no `@`
    /// between its name and range.
    pub fn rewrite(content: &str) -> Result<AliasRewrite> {
        let aliases = Self::collect_aliases(content)?;
        if aliases.is_empty() {
            return Ok(AliasRewrite {
                content: content.to_string(),
                aliases,
            });
        }

        let mut output = String::with_capacity(content.len());
        for raw_line in content.split_inclusive('\n') {
            let (line, ending) = split_line_ending(raw_line);
            let rewritten = if is_heading(line) {
                rewrite_heading(line, &aliases)
            } else {
                rewrite_reference(line, &aliases)
            };
            match rewritten {
                Some(new_line) => output.push_str(&new_line),
                None => output.push_str(line),
            }
            output.push_str(ending);
        }

        Ok(AliasRewrite {
            content: output,
            aliases,
        })
    }

    /// First pass: every alias descriptor declared in a block heading
    fn collect_aliases(content: &str) -> Result<AliasMap> {
        let mut aliases = AliasMap::new();

        for (index, line) in content.lines().enumerate() {
            if !is_heading(line) {
                continue;
            }
            for descriptor in heading_descriptors(line) {
                if let Some((key, target)) = parse_alias_descriptor(unquote(descriptor), index + 1)? {
                    aliases.insert(key, target);
                }
            }
        }

        Ok(aliases)
    }
}

fn split_line_ending(raw_line: &str) -> (&str, &str) {
    let content_len = raw_line.trim_end_matches(['\r', '\n']).len();
    raw_line.split_at(content_len)
}

/// Block headings start at column 0 and end with a colon
fn is_heading(line: &str) -> bool {
    !line.is_empty() && !line.starts_with([' ', '\t', '#']) && line.trim_end().ends_with(':')
}

fn heading_descriptors(line: &str) -> impl Iterator<Item = &str> {
    let body = line.trim_end();
    let body = body.strip_suffix(':').unwrap_or(body);
    body.split(',').map(str::trim).filter(|token| !token.is_empty())
}

fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(token)
}

/// Parses `<alias>@npm:<target>@<range>`; `Ok(None)` for ordinary descriptors
fn parse_alias_descriptor(descriptor: &str, line_number: usize) -> Result<Option<(String, AliasTarget)>> {
    // The alias name is non-empty and may itself be scoped, so search from index 1.
    let Some(marker) = descriptor
        .get(1..)
        .and_then(|rest| rest.find(ALIAS_MARKER))
        .map(|index| index + 1)
    else {
        return Ok(None);
    };

    let original_alias_target = &descriptor[marker + 1..];
    let target_spec = &descriptor[marker + ALIAS_MARKER.len()..];
    let (resolved_name, resolved_version) = split_name_version(target_spec).ok_or_else(|| {
        LockTreeError::invalid_input_at(
            format!(
                "alias descriptor '{}' must have the form <alias>@npm:<name>@<range>",
                descriptor
            ),
            format!("line {}", line_number),
        )
    })?;

    Ok(Some((
        descriptor.to_string(),
        AliasTarget {
            resolved_name: resolved_name.to_string(),
            resolved_version: resolved_version.to_string(),
            original_alias_target: original_alias_target.to_string(),
        },
    )))
}

fn rewrite_heading(line: &str, aliases: &AliasMap) -> Option<String> {
    let mut changed = false;
    let descriptors: Vec<String> = heading_descriptors(line)
        .map(|token| match aliases.get(unquote(token)) {
            Some(target) => {
                changed = true;
                format!("\"{}@{}\"", target.resolved_name, target.resolved_version)
            }
            None => token.to_string(),
        })
        .collect();

    changed.then(|| format!("{}:", descriptors.join(", ")))
}

/// Rewrites an indented `<alias> "npm:<target>@<range>"` dependency line
fn rewrite_reference(line: &str, aliases: &AliasMap) -> Option<String> {
    let trimmed = line.trim_start();
    if trimmed.len() == line.len() {
        return None;
    }
    let indent = &line[..line.len() - trimmed.len()];

    let (name, rest) = split_first_token(trimmed)?;
    let spec = unquote(rest.trim());
    if !spec.starts_with(NPM_ALIAS_PREFIX) {
        return None;
    }

    let target = aliases.get(&format!("{}@{}", name, spec))?;
    let resolved_name = if target.resolved_name.starts_with('@') {
        format!("\"{}\"", target.resolved_name)
    } else {
        target.resolved_name.clone()
    };

    Some(format!(
        "{}{} \"{}\"",
        indent, resolved_name, target.resolved_version
    ))
}

/// Splits a possibly quoted first token from the rest of the line
fn split_first_token(text: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = text.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some((&quoted[..end], &quoted[end + 1..]));
    }
    text.split_once(' ')
}
