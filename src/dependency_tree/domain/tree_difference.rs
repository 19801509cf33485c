use std::fmt;

/// Separator between `name@version` segments of a difference path
pub const PATH_SEPARATOR: &str = " -> ";

/// One structural difference between an actual and an expected tree
///
/// The path runs from the comparison root to the differing node, each
/// segment in `name@version` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDifference {
    /// Present in the expected tree, absent from the actual one
    Missing(Vec<String>),
    /// Present in the actual tree, absent from the expected one
    Extra(Vec<String>),
    /// Same name at the same place, different version; the path ends with
    /// the actual node
    VersionMismatch {
        path: Vec<String>,
        expected_version: String,
    },
}

impl fmt::Display for TreeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeDifference::Missing(path) => write!(f, "MISSING {}", path.join(PATH_SEPARATOR)),
            TreeDifference::Extra(path) => write!(f, "EXTRA {}", path.join(PATH_SEPARATOR)),
            TreeDifference::VersionMismatch {
                path,
                expected_version,
            } => write!(
                f,
                "DIFFERENT VERSION AT {} EXPECTED {}",
                path.join(PATH_SEPARATOR),
                expected_version
            ),
        }
    }
}
