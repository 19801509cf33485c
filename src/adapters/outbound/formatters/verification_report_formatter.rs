use crate::application::dto::{CaseOutcome, VerificationResponse};
use owo_colors::OwoColorize;

/// VerificationReportFormatter adapter for the `verify` command output
///
/// One header line per case, followed by its differences indented by
/// three spaces, then a summary line. Colors are applied to the status
/// markers only, and only when enabled.
pub struct VerificationReportFormatter {
    colored: bool,
}

impl VerificationReportFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn format(&self, response: &VerificationResponse) -> String {
        let mut output = String::new();

        for report in &response.reports {
            match &report.outcome {
                CaseOutcome::Matched => {
                    output.push_str(&format!("{} {}\n", self.status_ok("MATCH"), report.case_name));
                }
                CaseOutcome::Differs(differences) => {
                    output.push_str(&format!(
                        "{} {} ({} difference(s))\n",
                        self.status_fail("DIFF"),
                        report.case_name,
                        differences.len()
                    ));
                    for difference in differences {
                        output.push_str(&format!("   {}\n", difference));
                    }
                }
                CaseOutcome::Skipped { error_name, reason } => {
                    output.push_str(&format!(
                        "{} {} [{}] {}\n",
                        self.status_skip("SKIP"),
                        report.case_name,
                        error_name,
                        reason.lines().next().unwrap_or_default()
                    ));
                }
            }
        }

        output.push_str(&format!(
            "\nSummary: {} matched, {} differ, {} skipped\n",
            response.matched_count(),
            response.differing_count(),
            response.skipped_count()
        ));
        output
    }

    fn status_ok(&self, label: &str) -> String {
        if self.colored {
            label.green().bold().to_string()
        } else {
            label.to_string()
        }
    }

    fn status_fail(&self, label: &str) -> String {
        if self.colored {
            label.red().bold().to_string()
        } else {
            label.to_string()
        }
    }

    fn status_skip(&self, label: &str) -> String {
        if self.colored {
            label.yellow().to_string()
        } else {
            label.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CaseReport;
    use crate::dependency_tree::domain::TreeDifference;
    use std::path::PathBuf;

    fn response() -> VerificationResponse {
        VerificationResponse::new(vec![
            CaseReport {
                case_name: "goof".to_string(),
                case_dir: PathBuf::from("cases/goof"),
                outcome: CaseOutcome::Matched,
            },
            CaseReport {
                case_name: "drift".to_string(),
                case_dir: PathBuf::from("cases/drift"),
                outcome: CaseOutcome::Differs(vec![TreeDifference::Missing(vec![
                    "root@1".to_string(),
                    "x@1".to_string(),
                ])]),
            },
            CaseReport {
                case_name: "broken".to_string(),
                case_dir: PathBuf::from("cases/broken"),
                outcome: CaseOutcome::Skipped {
                    error_name: "InvalidUserInputError",
                    reason: "Invalid input: tree listing is empty\n\nHint".to_string(),
                },
            },
        ])
    }

    #[test]
    fn test_format_plain_report() {
        let output = VerificationReportFormatter::new(false).format(&response());

        assert_eq!(
            output,
            concat!(
                "MATCH goof\n",
                "DIFF drift (1 difference(s))\n",
                "   MISSING root@1 -> x@1\n",
                "SKIP broken [InvalidUserInputError] Invalid input: tree listing is empty\n",
                "\n",
                "Summary: 1 matched, 1 differ, 1 skipped\n",
            )
        );
    }

    #[test]
    fn test_format_colored_report_keeps_text() {
        let output = VerificationReportFormatter::new(true).format(&response());

        assert!(output.contains("\u{1b}["));
        assert!(output.contains("   MISSING root@1 -> x@1\n"));
    }
}
