use crate::dependency_tree::domain::TreeNode;
use crate::ports::outbound::TreeFormatter;
use crate::shared::error::LockTreeError;
use crate::shared::Result;

/// Deepest tree the JSON formatter serializes; serde walks nesting on the
/// call stack
pub const MAX_JSON_DEPTH: usize = 512;

/// JsonTreeFormatter adapter serializing a tree as nested JSON
///
/// The document has the same shape the verifier accepts as an
/// `expected-tree.json` fixture.
pub struct JsonTreeFormatter;

impl JsonTreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for JsonTreeFormatter {
    fn format(&self, tree: &TreeNode) -> Result<String> {
        let depth = tree.depth();
        if depth > MAX_JSON_DEPTH {
            return Err(LockTreeError::unsupported(format!(
                "tree is {} levels deep; JSON output supports at most {}\n\n\
                 💡 Hint: Use --format text for very deep trees",
                depth, MAX_JSON_DEPTH
            ))
            .into());
        }

        let mut output = serde_json::to_string_pretty(tree)?;
        output.push('\n');
        Ok(output)
    }
}
