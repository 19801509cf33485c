use crate::dependency_tree::domain::{TreeDifference, TreeNode};

/// TreeDiffer service for structural comparison of two dependency trees
///
/// Siblings are matched by name. The expected tree drives the order of
/// `Missing` and `VersionMismatch` entries (siblings sorted by name), and
/// `Extra` entries follow in the order the actual tree lists them.
pub struct TreeDiffer;

/// A pair of matched nodes whose children are being compared
struct Frame<'a> {
    actual: &'a TreeNode,
    expected: &'a TreeNode,
    expected_children: Vec<&'a TreeNode>,
    next_child: usize,
}

impl<'a> Frame<'a> {
    fn new(actual: &'a TreeNode, expected: &'a TreeNode) -> Self {
        let mut expected_children: Vec<&TreeNode> = expected.deps.iter().collect();
        expected_children.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            actual,
            expected,
            expected_children,
            next_child: 0,
        }
    }
}

impl TreeDiffer {
    /// Returns every difference between `actual` and `expected`; empty when
    /// the trees agree
    pub fn diff(actual: &TreeNode, expected: &TreeNode) -> Vec<TreeDifference> {
        if actual.name != expected.name {
            return vec![TreeDifference::Missing(vec![expected.label()])];
        }
        if actual.version != expected.version {
            return vec![TreeDifference::VersionMismatch {
                path: vec![actual.label()],
                expected_version: expected.version.clone(),
            }];
        }

        let mut differences = Vec::new();
        let mut path = vec![actual.label()];
        let mut stack = vec![Frame::new(actual, expected)];

        while let Some(frame) = stack.last_mut() {
            let Some(expected_child) = frame.expected_children.get(frame.next_child).copied()
            else {
                // All expected children done; what is left over is extra.
                if let Some(finished) = stack.pop() {
                    push_extras(&finished, &path, &mut differences);
                }
                path.pop();
                continue;
            };
            frame.next_child += 1;

            let Some(actual_child) = frame
                .actual
                .deps
                .iter()
                .find(|c| c.name == expected_child.name)
            else {
                differences.push(TreeDifference::Missing(with_segment(
                    &path,
                    expected_child.label(),
                )));
                continue;
            };

            if actual_child.version != expected_child.version {
                differences.push(TreeDifference::VersionMismatch {
                    path: with_segment(&path, actual_child.label()),
                    expected_version: expected_child.version.clone(),
                });
            } else if !expected_child.deduped {
                path.push(actual_child.label());
                stack.push(Frame::new(actual_child, expected_child));
            }
        }

        differences
    }
}

fn push_extras(frame: &Frame<'_>, path: &[String], differences: &mut Vec<TreeDifference>) {
    for actual_child in &frame.actual.deps {
        if !frame.expected.deps.iter().any(|c| c.name == actual_child.name) {
            differences.push(TreeDifference::Extra(with_segment(
                path,
                actual_child.label(),
            )));
        }
    }
}

fn with_segment(path: &[String], segment: String) -> Vec<String> {
    let mut extended = path.to_vec();
    extended.push(segment);
    extended
}
