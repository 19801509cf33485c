use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a tree mismatch from a
/// broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every verified tree matched
    Success = 0,
    /// At least one verified tree differs from its expectation
    DifferencesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, I/O error, unsupported format, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DifferencesFound => write!(f, "Differences Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// HTTP-style status carried by user-actionable failures.
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// HTTP-style status carried by environment or feature gaps.
pub const INTERNAL_ERROR: u16 = 500;

/// Failure taxonomy shared by the preprocessors, converters and parsers.
///
/// 422-class variants mean the caller supplied bad data and can fix it;
/// 500-class variants mean the tool or its environment cannot handle the
/// request. Batch callers skip the former and surface the latter.
#[derive(Debug, Error)]
pub enum LockTreeError {
    #[error("Invalid input: {message}{}\n\n💡 Hint: Please verify that the input file is complete and in the expected format", context_suffix(.context))]
    InvalidUserInput {
        message: String,
        /// Where in the input the problem was found (e.g. `line 3`)
        context: Option<String>,
    },

    #[error("Dependency tree is too large: {size} nodes exceeds the limit of {limit}\n\n💡 Hint: Raise the limit with --max-tree-size or max_tree_size in the config file")]
    TreeSizeLimit { size: usize, limit: usize },

    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    #[error("Unsupported runtime: {message}")]
    UnsupportedRuntime { message: String },

    #[error("Inconsistent dependency graph: {details}")]
    GraphInconsistency { details: String },
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" (at {})", context),
        None => String::new(),
    }
}

impl LockTreeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LockTreeError::InvalidUserInput {
            message: message.into(),
            context: None,
        }
    }

    pub fn invalid_input_at(message: impl Into<String>, context: impl Into<String>) -> Self {
        LockTreeError::InvalidUserInput {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        LockTreeError::Unsupported {
            message: message.into(),
        }
    }

    /// Kind discriminator, stable across releases
    pub fn name(&self) -> &'static str {
        match self {
            LockTreeError::InvalidUserInput { .. } => "InvalidUserInputError",
            LockTreeError::TreeSizeLimit { .. } => "TreeSizeLimitError",
            LockTreeError::Unsupported { .. } => "UnsupportedError",
            LockTreeError::UnsupportedRuntime { .. } => "UnsupportedRuntimeError",
            LockTreeError::GraphInconsistency { .. } => "GraphInconsistencyError",
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            LockTreeError::InvalidUserInput { .. } | LockTreeError::TreeSizeLimit { .. } => {
                UNPROCESSABLE_ENTITY
            }
            LockTreeError::Unsupported { .. }
            | LockTreeError::UnsupportedRuntime { .. }
            | LockTreeError::GraphInconsistency { .. } => INTERNAL_ERROR,
        }
    }

    /// True when fixing the input (or raising a limit) resolves the failure.
    pub fn is_recoverable(&self) -> bool {
        self.code() == UNPROCESSABLE_ENTITY
    }

    /// Finds a `LockTreeError` anywhere in an anyhow error chain.
    pub fn find_in(error: &anyhow::Error) -> Option<&LockTreeError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<LockTreeError>())
    }
}
