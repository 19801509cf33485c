use clap::{Parser, Subcommand};
use lockfile_tree::application::dto::{OutputFormat, TreeSource};
use std::path::PathBuf;

/// Build cycle-safe dependency trees from npm and yarn lockfiles
#[derive(Parser, Debug)]
#[command(name = "lockfile-tree")]
#[command(version)]
#[command(
    about = "Build cycle-safe dependency trees from npm and yarn lockfiles and verify them against npm ls output",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./lockfile-tree.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite npm: aliases of a package-lock.json or yarn.lock to real package names
    Preprocess {
        /// Lockfile to read
        lockfile: PathBuf,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a dependency tree from a dependency graph or an npm ls listing
    Tree {
        /// dep-graph.json or listing file
        input: PathBuf,

        /// Input kind: graph or listing
        #[arg(long, default_value = "graph")]
        from: TreeSource,

        /// Output format: json or text
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Stop with an error once the tree has more nodes than this
        #[arg(long, value_name = "N")]
        max_tree_size: Option<usize>,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the tree of each case directory with its expected tree
    ///
    /// A case directory holds dep-graph.json and either expected-tree.txt
    /// (npm ls output) or expected-tree.json.
    Verify {
        /// Case directories
        #[arg(required = true)]
        case_dirs: Vec<PathBuf>,

        /// Cases verified at the same time (default 6)
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Skip a case once its tree has more nodes than this
        #[arg(long, value_name = "N")]
        max_tree_size: Option<usize>,

        /// Milliseconds of work between cooperative yields (default 100)
        #[arg(long, value_name = "MS")]
        yield_threshold_ms: Option<u64>,
    },
}

impl Args {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
