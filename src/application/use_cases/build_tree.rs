use crate::application::dto::{BuildTreeRequest, TreeSource};
use crate::dependency_tree::domain::{DepGraph, TreeNode};
use crate::dependency_tree::services::{ConvertOptions, GraphToTreeConverter, TreeTextParser};
use crate::ports::outbound::{ProgressReporter, TreeSourceReader};
use crate::shared::Result;

/// BuildTreeUseCase - builds one dependency tree from a graph or a listing
///
/// # Type Parameters
/// * `TR` - TreeSourceReader implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildTreeUseCase<TR, PR> {
    source_reader: TR,
    progress_reporter: PR,
}

impl<TR, PR> BuildTreeUseCase<TR, PR>
where
    TR: TreeSourceReader,
    PR: ProgressReporter,
{
    pub fn new(source_reader: TR, progress_reporter: PR) -> Self {
        Self {
            source_reader,
            progress_reporter,
        }
    }

    pub fn execute(&self, request: BuildTreeRequest) -> Result<TreeNode> {
        self.progress_reporter.report(&format!(
            "📖 Loading {} from: {}",
            request.source,
            request.input_path.display()
        ));

        let text = self.source_reader.read_source(&request.input_path)?;
        let tree = match request.source {
            TreeSource::Graph => {
                let graph = DepGraph::from_json(&text)?;
                self.progress_reporter.report(&format!(
                    "📊 Unfolding {} graph node(s)...",
                    graph.node_count()
                ));
                let options = ConvertOptions::with_max_tree_size(request.max_tree_size);
                GraphToTreeConverter::convert(&graph, &options)?
            }
            TreeSource::Listing => TreeTextParser::parse(&text)?,
        };

        self.progress_reporter.report(&format!(
            "✅ Built tree for {} with {} node(s)",
            tree.label(),
            tree.node_count()
        ));

        Ok(tree)
    }
}
