use crate::dependency_tree::domain::{split_name_version, TreeNode};
use crate::shared::error::LockTreeError;
use crate::shared::Result;

const TREE_GLYPHS: &[char] = &['│', '├', '└', '─', '┬', '┼', '|', '\\', '`', '+', '-'];
const DEDUPED_ANNOTATION: &str = "deduped";

/// TreeTextParser service for reading `npm ls` style listings
///
/// Each nesting level occupies two columns of glyphs, so the depth of a
/// line is derived from where its package token starts. Both the unicode
/// and the ASCII (`--unicode=false`) flavours are accepted.
pub struct TreeTextParser;

/// A listing line split into its parts
#[derive(Debug, PartialEq, Eq)]
struct ListingLine<'a> {
    depth: usize,
    name: &'a str,
    version: &'a str,
    deduped: bool,
}

impl TreeTextParser {
    /// Parses a listing into a tree
    ///
    /// The first non-blank line is the root. Annotations after the package
    /// token (paths, `extraneous`, `invalid`) are ignored except `deduped`.
    ///
    /// # Errors
    /// Returns `InvalidUserInputError` with the offending line number for
    /// empty input, a token without `@`, a line nested deeper than its
    /// parent allows, or a second root.
    pub fn parse(text: &str) -> Result<TreeNode> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end()))
            .filter(|(_, line)| !line.trim().is_empty());

        let (root_line_number, root_line) = lines
            .next()
            .ok_or_else(|| LockTreeError::invalid_input("tree listing is empty"))?;
        let root_token = root_line.split_whitespace().next().unwrap_or_default();
        let (name, version) = split_package_token(root_token, root_line_number)?;

        // stack[i] is the open node at depth i
        let mut stack = vec![TreeNode::new(name, version)];

        for (line_number, line) in lines {
            let entry = parse_line(line, line_number)?;

            if entry.depth == 0 {
                return Err(LockTreeError::invalid_input_at(
                    format!("unexpected second root '{}@{}'", entry.name, entry.version),
                    format!("line {}", line_number),
                )
                .into());
            }
            if entry.depth > stack.len() {
                return Err(LockTreeError::invalid_input_at(
                    format!(
                        "'{}@{}' is nested at depth {} but its parent is at depth {}",
                        entry.name,
                        entry.version,
                        entry.depth,
                        stack.len() - 1
                    ),
                    format!("line {}", line_number),
                )
                .into());
            }

            close_to(&mut stack, entry.depth);
            let node = if entry.deduped {
                TreeNode::deduped(entry.name, entry.version)
            } else {
                TreeNode::new(entry.name, entry.version)
            };
            stack.push(node);
        }

        close_to(&mut stack, 1);
        stack
            .pop()
            .ok_or_else(|| LockTreeError::invalid_input("tree listing is empty").into())
    }
}

/// Closes open nodes until only `depth` remain, attaching each to its parent
fn close_to(stack: &mut Vec<TreeNode>, depth: usize) {
    while stack.len() > depth {
        let Some(mut closed) = stack.pop() else {
            return;
        };
        if closed.deduped {
            closed.deps.clear();
        }
        match stack.last_mut() {
            Some(parent) => parent.deps.push(closed),
            None => {
                stack.push(closed);
                return;
            }
        }
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<ListingLine<'_>> {
    let mut tokens = tokens_with_offsets(line).skip_while(|(_, token)| is_glyph_token(token));

    let Some((offset, package_token)) = tokens.next() else {
        return Err(LockTreeError::invalid_input_at(
            "line has tree glyphs but no package",
            format!("line {}", line_number),
        )
        .into());
    };
    let (name, version) = split_package_token(package_token, line_number)?;
    let deduped = tokens.any(|(_, token)| token == DEDUPED_ANNOTATION);

    // The separating space sits just before the package token.
    let depth = offset.saturating_sub(1) / 2;

    Ok(ListingLine {
        depth,
        name,
        version,
        deduped,
    })
}

/// Space-separated tokens with the char index where each one starts
fn tokens_with_offsets(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut char_offset = 0;
    line.split(' ').filter_map(move |token| {
        let start = char_offset;
        char_offset += token.chars().count() + 1;
        (!token.is_empty()).then_some((start, token))
    })
}

fn is_glyph_token(token: &str) -> bool {
    token.chars().all(|c| TREE_GLYPHS.contains(&c))
}

fn split_package_token(token: &str, line_number: usize) -> Result<(&str, &str)> {
    split_name_version(token).ok_or_else(|| {
        LockTreeError::invalid_input_at(
            format!("expected name@version, got '{}'", token),
            format!("line {}", line_number),
        )
        .into()
    })
}
