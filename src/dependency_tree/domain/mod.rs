mod alias_map;
mod dep_graph;
mod lockfile_format;
mod tree_difference;
mod tree_node;

pub use alias_map::{split_name_version, AliasMap, AliasTarget};
pub use dep_graph::{DepGraph, GraphNode, PkgInfo};
pub use lockfile_format::LockfileFormat;
pub use tree_difference::{TreeDifference, PATH_SEPARATOR};
pub use tree_node::TreeNode;
