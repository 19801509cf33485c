//! lockfile-tree - cycle-safe dependency trees from npm and yarn lockfiles
//!
//! This library resolves `npm:` aliases in lockfiles, unfolds dependency
//! graphs into rooted trees without looping on cycles, reads `npm ls`
//! listings back into trees and reports how two trees differ. It follows
//! a hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_tree`): Pure tree, graph and alias logic
//! - **Application Layer** (`application`): Use cases, concurrency and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```
//! use lockfile_tree::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let listing = "app@1.0.0\n└── left-pad@1.3.0\n";
//! let expected = TreeTextParser::parse(listing)?;
//!
//! let actual = TreeNode::new("app", "1.0.0")
//!     .with_deps(vec![TreeNode::new("left-pad", "1.3.0")]);
//!
//! assert!(TreeDiffer::diff(&actual, &expected).is_empty());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_tree;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonTreeFormatter, TextTreeFormatter, VerificationReportFormatter,
    };
    pub use crate::adapters::outbound::runtime::{CooperativeScheduler, NoopScheduler};
    pub use crate::application::dto::{
        BuildTreeRequest, CaseOutcome, CaseReport, OutputFormat, PreprocessRequest,
        PreprocessResponse, TreeSource, VerificationRequest, VerificationResponse,
    };
    pub use crate::application::services::ConcurrencyLimiter;
    pub use crate::application::use_cases::{
        BuildTreeUseCase, PreprocessLockfileUseCase, VerifyTreesUseCase,
    };
    pub use crate::dependency_tree::domain::{
        AliasMap, AliasTarget, DepGraph, GraphNode, LockfileFormat, PkgInfo, TreeDifference,
        TreeNode,
    };
    pub use crate::dependency_tree::services::{
        AliasPreprocessor, ConvertOptions, GraphToTreeConverter, NpmAliasPreprocessor,
        TreeDiffer, TreeTextParser, YarnAliasPreprocessor,
    };
    pub use crate::ports::outbound::{
        LockfileReader, OutputPresenter, ProgressReporter, TreeFormatter, TreeSourceReader,
        YieldScheduler,
    };
    pub use crate::shared::error::LockTreeError;
    pub use crate::shared::Result;
}
