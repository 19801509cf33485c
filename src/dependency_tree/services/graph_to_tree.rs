use crate::dependency_tree::domain::{DepGraph, GraphNode, PkgInfo, TreeNode};
use crate::shared::error::LockTreeError;
use crate::shared::Result;
use std::collections::HashSet;

/// Options for graph-to-tree conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum number of tree nodes; `None` disables the check
    pub max_tree_size: Option<usize>,
}

impl ConvertOptions {
    pub fn with_max_tree_size(max_tree_size: Option<usize>) -> Self {
        Self { max_tree_size }
    }
}

/// GraphToTreeConverter service for unfolding a dependency graph into a tree
///
/// Shared subtrees are expanded once per path that reaches them. A package
/// that already appears on the path from the root is emitted as a deduped
/// leaf, which keeps cyclic graphs finite.
pub struct GraphToTreeConverter;

/// One package being expanded on the current root-to-node path
struct Frame<'g> {
    node: &'g GraphNode,
    next_child: usize,
    tree: TreeNode,
}

impl GraphToTreeConverter {
    /// Converts the graph starting at its root node
    ///
    /// The walk keeps an explicit stack instead of recursing, so deep
    /// dependency chains cannot overflow the call stack.
    ///
    /// # Errors
    /// - `GraphInconsistencyError` when an edge points at an unknown node or a
    ///   node at an unknown package
    /// - `TreeSizeLimitError` when the tree grows past `max_tree_size`
    pub fn convert(graph: &DepGraph, options: &ConvertOptions) -> Result<TreeNode> {
        let mut node_count = 0;
        let (root, root_pkg) = Self::resolve(graph, graph.root_node_id())?;
        Self::count_node(&mut node_count, options)?;

        let mut on_path: HashSet<&str> = HashSet::new();
        on_path.insert(root.pkg_id.as_str());
        let mut stack = vec![Frame {
            node: root,
            next_child: 0,
            tree: Self::tree_node(root_pkg),
        }];

        while let Some(frame) = stack.last_mut() {
            let node: &GraphNode = frame.node;

            if let Some(child_id) = node.deps.get(frame.next_child) {
                frame.next_child += 1;
                let (child, child_pkg) = Self::resolve(graph, child_id)?;
                Self::count_node(&mut node_count, options)?;

                if on_path.contains(child.pkg_id.as_str()) {
                    let version = child_pkg.version.clone().unwrap_or_default();
                    frame
                        .tree
                        .deps
                        .push(TreeNode::deduped(child_pkg.name.clone(), version));
                } else {
                    on_path.insert(child.pkg_id.as_str());
                    stack.push(Frame {
                        node: child,
                        next_child: 0,
                        tree: Self::tree_node(child_pkg),
                    });
                }
                continue;
            }

            if let Some(finished) = stack.pop() {
                on_path.remove(finished.node.pkg_id.as_str());
                match stack.last_mut() {
                    Some(parent) => parent.tree.deps.push(finished.tree),
                    None => return Ok(finished.tree),
                }
            }
        }

        unreachable!("the root frame is returned when it is popped")
    }

    fn resolve<'g>(graph: &'g DepGraph, node_id: &str) -> Result<(&'g GraphNode, &'g PkgInfo)> {
        let node = graph
            .node(node_id)
            .ok_or_else(|| LockTreeError::GraphInconsistency {
                details: format!("node '{}' is referenced but not defined", node_id),
            })?;
        let pkg = graph
            .pkg(&node.pkg_id)
            .ok_or_else(|| LockTreeError::GraphInconsistency {
                details: format!(
                    "package '{}' of node '{}' is missing from the package table",
                    node.pkg_id, node_id
                ),
            })?;
        Ok((node, pkg))
    }

    fn tree_node(pkg: &PkgInfo) -> TreeNode {
        TreeNode::new(pkg.name.clone(), pkg.version.clone().unwrap_or_default())
    }

    fn count_node(node_count: &mut usize, options: &ConvertOptions) -> Result<()> {
        *node_count += 1;
        match options.max_tree_size {
            Some(limit) if *node_count > limit => Err(LockTreeError::TreeSizeLimit {
                size: *node_count,
                limit,
            }
            .into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Builds a graph where node ids equal package ids `name@version`
    fn graph(root: &str, edges: &[(&str, &[&str])]) -> DepGraph {
        let mut pkgs = HashMap::new();
        let nodes = edges
            .iter()
            .map(|(id, deps)| {
                let (name, version) = id.rsplit_once('@').unwrap();
                pkgs.insert(
                    id.to_string(),
                    PkgInfo {
                        name: name.to_string(),
                        version: Some(version.to_string()),
                    },
                );
                GraphNode {
                    node_id: id.to_string(),
                    pkg_id: id.to_string(),
                    deps: deps.iter().map(|d| d.to_string()).collect(),
                }
            })
            .collect();
        DepGraph::new(root.to_string(), nodes, pkgs)
    }

    #[test]
    fn test_convert_simple_tree_preserves_child_order() {
        let graph = graph(
            "app@1.0.0",
            &[
                ("app@1.0.0", &["zlib@1.0.0", "abc@2.0.0"]),
                ("zlib@1.0.0", &[]),
                ("abc@2.0.0", &["zlib@1.0.0"]),
            ],
        );

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        let expected = TreeNode::new("app", "1.0.0").with_deps(vec![
            TreeNode::new("zlib", "1.0.0"),
            TreeNode::new("abc", "2.0.0").with_deps(vec![TreeNode::new("zlib", "1.0.0")]),
        ]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_convert_cycle_marks_second_visit_deduped() {
        let graph = graph(
            "root@1",
            &[("root@1", &["a@1"]), ("a@1", &["b@1"]), ("b@1", &["a@1"])],
        );

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        let second_a = &tree.deps[0].deps[0].deps[0];
        assert_eq!(second_a.name, "a");
        assert!(second_a.deduped);
        assert!(second_a.deps.is_empty());
        assert!(!tree.deps[0].deduped);
    }

    #[test]
    fn test_convert_self_loop_on_root() {
        let graph = graph("root@1", &[("root@1", &["root@1"])]);

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        assert_eq!(tree.deps, vec![TreeNode::deduped("root", "1")]);
    }

    #[test]
    fn test_convert_shared_subtree_is_not_deduped() {
        // `shared` is reached twice on different paths; neither visit is a cycle.
        let graph = graph(
            "root@1",
            &[
                ("root@1", &["a@1", "b@1"]),
                ("a@1", &["shared@1"]),
                ("b@1", &["shared@1"]),
                ("shared@1", &["leaf@1"]),
                ("leaf@1", &[]),
            ],
        );

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        for branch in &tree.deps {
            let shared = &branch.deps[0];
            assert!(!shared.deduped);
            assert_eq!(shared.deps, vec![TreeNode::new("leaf", "1")]);
        }
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_convert_dedupes_by_package_identity() {
        let mut pkgs = HashMap::new();
        pkgs.insert(
            "a@1".to_string(),
            PkgInfo {
                name: "a".to_string(),
                version: Some("1".to_string()),
            },
        );
        let nodes = vec![
            GraphNode {
                node_id: "first".to_string(),
                pkg_id: "a@1".to_string(),
                deps: vec!["second".to_string()],
            },
            GraphNode {
                node_id: "second".to_string(),
                pkg_id: "a@1".to_string(),
                deps: vec![],
            },
        ];
        let graph = DepGraph::new("first".to_string(), nodes, pkgs);

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        assert_eq!(tree.deps, vec![TreeNode::deduped("a", "1")]);
    }

    #[test]
    fn test_convert_missing_version_is_empty() {
        let mut pkgs = HashMap::new();
        pkgs.insert(
            "root".to_string(),
            PkgInfo {
                name: "root".to_string(),
                version: None,
            },
        );
        let nodes = vec![GraphNode {
            node_id: "root-node".to_string(),
            pkg_id: "root".to_string(),
            deps: vec![],
        }];
        let graph = DepGraph::new("root-node".to_string(), nodes, pkgs);

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        assert_eq!(tree, TreeNode::new("root", ""));
    }

    #[test]
    fn test_convert_dangling_edge_is_fatal() {
        let graph = graph("root@1", &[("root@1", &["ghost@1"])]);

        let err = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap_err();
        let lock_err = LockTreeError::find_in(&err).unwrap();

        assert_eq!(lock_err.name(), "GraphInconsistencyError");
        assert!(err.to_string().contains("ghost@1"));
    }

    #[test]
    fn test_convert_missing_package_is_fatal() {
        let nodes = vec![GraphNode {
            node_id: "root-node".to_string(),
            pkg_id: "root@1".to_string(),
            deps: vec![],
        }];
        let graph = DepGraph::new("root-node".to_string(), nodes, HashMap::new());

        let err = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap_err();

        assert!(err.to_string().contains("missing from the package table"));
    }

    #[test]
    fn test_convert_tree_size_limit() {
        let graph = graph(
            "root@1",
            &[
                ("root@1", &["a@1", "b@1"]),
                ("a@1", &["c@1"]),
                ("b@1", &["c@1"]),
                ("c@1", &[]),
            ],
        );

        let within = ConvertOptions::with_max_tree_size(Some(5));
        assert_eq!(
            GraphToTreeConverter::convert(&graph, &within)
                .unwrap()
                .node_count(),
            5
        );

        let too_small = ConvertOptions::with_max_tree_size(Some(4));
        let err = GraphToTreeConverter::convert(&graph, &too_small).unwrap_err();
        match LockTreeError::find_in(&err) {
            Some(LockTreeError::TreeSizeLimit { size, limit }) => {
                assert_eq!(*size, 5);
                assert_eq!(*limit, 4);
            }
            other => panic!("expected TreeSizeLimit, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_deep_chain_does_not_recurse() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("p{}@1", i)).collect();
        let mut pkgs = HashMap::new();
        let nodes = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                pkgs.insert(
                    id.clone(),
                    PkgInfo {
                        name: format!("p{}", i),
                        version: Some("1".to_string()),
                    },
                );
                GraphNode {
                    node_id: id.clone(),
                    pkg_id: id.clone(),
                    deps: ids.get(i + 1).cloned().into_iter().collect(),
                }
            })
            .collect();
        let graph = DepGraph::new(ids[0].clone(), nodes, pkgs);

        let tree = GraphToTreeConverter::convert(&graph, &ConvertOptions::default()).unwrap();

        assert_eq!(tree.node_count(), 50_000);
        assert_eq!(tree.depth(), 50_000);
        drop(tree);
    }
}
