/// Formatter adapters for tree and verification output
mod json_tree_formatter;
mod text_tree_formatter;
mod verification_report_formatter;

pub use json_tree_formatter::{JsonTreeFormatter, MAX_JSON_DEPTH};
pub use text_tree_formatter::TextTreeFormatter;
pub use verification_report_formatter::VerificationReportFormatter;
