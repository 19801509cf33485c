use std::path::PathBuf;

/// Kind of document a tree is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeSource {
    /// Dependency graph JSON, unfolded into a tree
    #[default]
    Graph,
    /// `npm ls` style listing
    Listing,
}

impl std::str::FromStr for TreeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graph" => Ok(TreeSource::Graph),
            "listing" => Ok(TreeSource::Listing),
            _ => Err(format!(
                "Invalid source: {}. Please specify 'graph' or 'listing'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TreeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeSource::Graph => write!(f, "graph"),
            TreeSource::Listing => write!(f, "listing"),
        }
    }
}

/// Request to build a single tree
#[derive(Debug, Clone)]
pub struct BuildTreeRequest {
    pub input_path: PathBuf,
    pub source: TreeSource,
    /// Node ceiling for graph conversion; ignored for listings
    pub max_tree_size: Option<usize>,
}

impl BuildTreeRequest {
    pub fn new(input_path: PathBuf, source: TreeSource, max_tree_size: Option<usize>) -> Self {
        Self {
            input_path,
            source,
            max_tree_size,
        }
    }
}
