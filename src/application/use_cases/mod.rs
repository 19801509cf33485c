/// Use cases module containing application business logic orchestration
mod build_tree;
mod preprocess_lockfile;
mod verify_trees;

pub use build_tree::BuildTreeUseCase;
pub use preprocess_lockfile::PreprocessLockfileUseCase;
pub use verify_trees::{
    VerifyTreesUseCase, DEP_GRAPH_FILE, EXPECTED_FIXTURE_FILE, EXPECTED_LISTING_FILE,
};
