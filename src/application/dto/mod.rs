/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod preprocess;
mod tree_request;
mod verification;

pub use output_format::OutputFormat;
pub use preprocess::{PreprocessRequest, PreprocessResponse};
pub use tree_request::{BuildTreeRequest, TreeSource};
pub use verification::{CaseOutcome, CaseReport, VerificationRequest, VerificationResponse};
