use serde::{Deserialize, Serialize};

/// A node of a rooted dependency tree
///
/// Both the graph converter and the listing parser produce this shape, so
/// their outputs can be compared structurally. Children keep the order of
/// their source; sorting by name happens only when rendering.
///
/// Walks over the tree (`node_count`, `depth`, `render` and dropping) use
/// explicit stacks, so a long dependency chain costs heap, not call stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub deps: Vec<TreeNode>,
    /// Set when this node repeats a package already present on the path from
    /// the root. A deduped node never has children.
    #[serde(default)]
    pub deduped: bool,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            deps: Vec::new(),
            deduped: false,
        }
    }

    pub fn deduped(name: impl Into<String>, version: impl Into<String>) -> Self {
        let mut node = Self::new(name, version);
        node.deduped = true;
        node
    }

    pub fn with_deps(mut self, deps: Vec<TreeNode>) -> Self {
        self.deps = deps;
        self
    }

    /// `name@version`, the form used in listings and difference paths
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Total number of nodes including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.deps.iter());
        }
        count
    }

    /// Number of levels; a lone root has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.deps.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Renders the tree the way `npm ls` prints it
    ///
    /// Children are sorted by name at this point only. Every depth level is
    /// two glyph columns wide, which is what the listing parser expects.
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.label());
        output.push('\n');

        let mut pending = Vec::new();
        push_sorted_children(self, "", &mut pending);

        while let Some(line) = pending.pop() {
            let branch = if line.is_last { "└─" } else { "├─" };
            let joint = if line.node.deps.is_empty() { "─" } else { "┬" };

            output.push_str(&line.prefix);
            output.push_str(branch);
            output.push_str(joint);
            output.push(' ');
            output.push_str(&line.node.label());
            if line.node.deduped {
                output.push_str(" deduped");
            }
            output.push('\n');

            let continuation = if line.is_last { "  " } else { "│ " };
            push_sorted_children(
                line.node,
                &format!("{}{}", line.prefix, continuation),
                &mut pending,
            );
        }
        output
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        // Detach descendants first so each node drops with no children left.
        let mut pending = std::mem::take(&mut self.deps);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.deps);
        }
    }
}

/// A child waiting to be rendered
struct PendingLine<'a> {
    node: &'a TreeNode,
    prefix: String,
    is_last: bool,
}

/// Queues the children of `node` so that popping yields them sorted by name
fn push_sorted_children<'a>(node: &'a TreeNode, prefix: &str, pending: &mut Vec<PendingLine<'a>>) {
    let mut children: Vec<&TreeNode> = node.deps.iter().collect();
    children.sort_by(|a, b| a.name.cmp(&b.name));

    let last_index = children.len().saturating_sub(1);
    for (index, child) in children.into_iter().enumerate().rev() {
        pending.push(PendingLine {
            node: child,
            prefix: prefix.to_string(),
            is_last: index == last_index,
        });
    }
}
