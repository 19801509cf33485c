use crate::shared::error::LockTreeError;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// Name and version of a package referenced by graph nodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PkgInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// One node of the dependency graph
///
/// Several nodes may point at the same package id; this is how the graph
/// shares subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub node_id: String,
    pub pkg_id: String,
    pub deps: Vec<String>,
}

/// Read-only dependency graph produced by the lockfile structural parsers
///
/// The graph is assumed internally consistent: every node id referenced by
/// an edge exists and every package id has an entry in the package table.
/// It may contain cycles reachable from the root.
#[derive(Debug, Clone)]
pub struct DepGraph {
    root_node_id: String,
    nodes: HashMap<String, GraphNode>,
    pkgs: HashMap<String, PkgInfo>,
}

impl DepGraph {
    pub fn new(
        root_node_id: String,
        nodes: Vec<GraphNode>,
        pkgs: HashMap<String, PkgInfo>,
    ) -> Self {
        Self {
            root_node_id,
            nodes: nodes
                .into_iter()
                .map(|node| (node.node_id.clone(), node))
                .collect(),
            pkgs,
        }
    }

    /// Parses the dep-graph JSON interchange format
    ///
    /// Only structural validity is checked here; dangling references are
    /// reported when the graph is walked.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawDepGraph = serde_json::from_str(content).map_err(|e| {
            LockTreeError::invalid_input_at(
                format!("failed to parse dependency graph: {}", e),
                format!("line {}", e.line()),
            )
        })?;

        let pkgs = raw
            .pkgs
            .into_iter()
            .map(|pkg| (pkg.id, pkg.info))
            .collect();
        let nodes = raw
            .graph
            .nodes
            .into_iter()
            .map(|node| GraphNode {
                node_id: node.node_id,
                pkg_id: node.pkg_id,
                deps: node.deps.into_iter().map(|dep| dep.node_id).collect(),
            })
            .collect();

        Ok(Self::new(raw.graph.root_node_id, nodes, pkgs))
    }

    pub fn root_node_id(&self) -> &str {
        &self.root_node_id
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.get(node_id)
    }

    pub fn pkg(&self, pkg_id: &str) -> Option<&PkgInfo> {
        self.pkgs.get(pkg_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Deserialize)]
struct RawDepGraph {
    pkgs: Vec<RawPkg>,
    graph: RawGraph,
}

#[derive(Debug, Deserialize)]
struct RawPkg {
    id: String,
    info: PkgInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGraph {
    root_node_id: String,
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    node_id: String,
    pkg_id: String,
    #[serde(default)]
    deps: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    node_id: String,
}
