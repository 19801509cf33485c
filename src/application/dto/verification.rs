use crate::dependency_tree::domain::TreeDifference;
use std::path::PathBuf;

/// Request to verify a batch of case directories
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub case_dirs: Vec<PathBuf>,
    pub concurrency: usize,
    pub max_tree_size: Option<usize>,
}

impl VerificationRequest {
    pub fn new(case_dirs: Vec<PathBuf>, concurrency: usize, max_tree_size: Option<usize>) -> Self {
        Self {
            case_dirs,
            concurrency,
            max_tree_size,
        }
    }
}

/// What happened to one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Matched,
    Differs(Vec<TreeDifference>),
    /// The case could not be evaluated because its input was unusable
    Skipped {
        error_name: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub case_name: String,
    pub case_dir: PathBuf,
    pub outcome: CaseOutcome,
}

/// Reports in the order the case directories were given
#[derive(Debug, Clone, Default)]
pub struct VerificationResponse {
    pub reports: Vec<CaseReport>,
}

impl VerificationResponse {
    pub fn new(reports: Vec<CaseReport>) -> Self {
        Self { reports }
    }

    pub fn matched_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Matched))
    }

    pub fn differing_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Differs(_)))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Skipped { .. }))
    }

    pub fn has_differences(&self) -> bool {
        self.differing_count() > 0
    }

    fn count(&self, predicate: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, outcome: CaseOutcome) -> CaseReport {
        CaseReport {
            case_name: name.to_string(),
            case_dir: PathBuf::from(name),
            outcome,
        }
    }

    #[test]
    fn test_response_counts() {
        let response = VerificationResponse::new(vec![
            report("a", CaseOutcome::Matched),
            report("b", CaseOutcome::Differs(vec![TreeDifference::Extra(vec![])])),
            report(
                "c",
                CaseOutcome::Skipped {
                    error_name: "InvalidUserInputError",
                    reason: "bad".to_string(),
                },
            ),
            report("d", CaseOutcome::Matched),
        ]);

        assert_eq!(response.matched_count(), 2);
        assert_eq!(response.differing_count(), 1);
        assert_eq!(response.skipped_count(), 1);
        assert!(response.has_differences());
    }

    #[test]
    fn test_empty_response_has_no_differences() {
        assert!(!VerificationResponse::default().has_differences());
    }
}
