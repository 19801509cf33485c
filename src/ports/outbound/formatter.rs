use crate::dependency_tree::domain::TreeNode;
use crate::shared::Result;

/// TreeFormatter port for formatting tree output
///
/// This port abstracts the serialization of a dependency tree
/// (JSON document, `npm ls` style listing).
pub trait TreeFormatter {
    /// Formats the tree
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, tree: &TreeNode) -> Result<String>;
}
