use crate::dependency_tree::domain::TreeNode;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

/// TextTreeFormatter adapter rendering a tree the way `npm ls` prints it
pub struct TextTreeFormatter;

impl TextTreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for TextTreeFormatter {
    fn format(&self, tree: &TreeNode) -> Result<String> {
        Ok(tree.render())
    }
}
