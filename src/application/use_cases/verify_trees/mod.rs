use crate::application::dto::{CaseOutcome, CaseReport, VerificationRequest, VerificationResponse};
use crate::application::services::ConcurrencyLimiter;
use crate::dependency_tree::domain::{DepGraph, TreeDifference, TreeNode};
use crate::dependency_tree::services::{
    ConvertOptions, GraphToTreeConverter, TreeDiffer, TreeTextParser,
};
use crate::ports::outbound::{ProgressReporter, TreeSourceReader, YieldScheduler};
use crate::shared::error::LockTreeError;
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Dependency graph of a case, converted into the actual tree
pub const DEP_GRAPH_FILE: &str = "dep-graph.json";
/// Expected tree as `npm ls` output
pub const EXPECTED_LISTING_FILE: &str = "expected-tree.txt";
/// Expected tree as a hand-written JSON fixture
pub const EXPECTED_FIXTURE_FILE: &str = "expected-tree.json";

/// VerifyTreesUseCase - compares converted graphs against expected trees
///
/// Each case directory holds a dependency graph and an expected tree. Cases
/// run through the ConcurrencyLimiter. A case whose input is unusable
/// (422-class error) is reported as skipped and the batch continues; any
/// other failure aborts the batch.
///
/// # Type Parameters
/// * `TR` - TreeSourceReader implementation
/// * `S` - YieldScheduler implementation
/// * `PR` - ProgressReporter implementation
pub struct VerifyTreesUseCase<TR, S, PR> {
    source_reader: TR,
    scheduler: S,
    progress_reporter: PR,
}

impl<TR, S, PR> VerifyTreesUseCase<TR, S, PR>
where
    TR: TreeSourceReader,
    S: YieldScheduler,
    PR: ProgressReporter,
{
    pub fn new(source_reader: TR, scheduler: S, progress_reporter: PR) -> Self {
        Self {
            source_reader,
            scheduler,
            progress_reporter,
        }
    }

    /// Verifies every case, returning one report per case in request order
    ///
    /// # Errors
    /// Returns the first 500-class failure, with the case name as context.
    pub async fn execute(&self, request: VerificationRequest) -> Result<VerificationResponse> {
        let total = request.case_dirs.len();
        let limiter = ConcurrencyLimiter::new(request.concurrency, &self.scheduler);
        self.progress_reporter.report(&format!(
            "🔍 Verifying {} case(s), {} at a time",
            total,
            limiter.concurrency()
        ));

        let options = ConvertOptions::with_max_tree_size(request.max_tree_size);
        let completed = AtomicUsize::new(0);

        let reports = limiter
            .run(request.case_dirs, |case_dir| {
                let options = &options;
                let completed = &completed;
                async move {
                    let report = self.verify_case(case_dir, options);
                    if let Ok(report) = &report {
                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        self.progress_reporter
                            .report_progress(done, total, Some(&report.case_name));
                    }
                    report
                }
            })
            .await?;

        let response = VerificationResponse::new(reports);
        self.progress_reporter.report_completion(&format!(
            "✅ Verification complete: {} matched, {} differ, {} skipped",
            response.matched_count(),
            response.differing_count(),
            response.skipped_count()
        ));

        Ok(response)
    }

    fn verify_case(&self, case_dir: PathBuf, options: &ConvertOptions) -> Result<CaseReport> {
        let case_name = case_name(&case_dir);

        let outcome = match self.compare_case(&case_dir, options) {
            Ok(differences) if differences.is_empty() => CaseOutcome::Matched,
            Ok(differences) => CaseOutcome::Differs(differences),
            Err(e) => {
                let recoverable = LockTreeError::find_in(&e)
                    .filter(|err| err.is_recoverable())
                    .map(|err| (err.name(), err.to_string()));

                let Some((error_name, reason)) = recoverable else {
                    return Err(e.context(format!("Failed to verify case '{}'", case_name)));
                };

                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Skipping case '{}': {}",
                    case_name,
                    reason.lines().next().unwrap_or_default()
                ));
                CaseOutcome::Skipped { error_name, reason }
            }
        };

        Ok(CaseReport {
            case_name,
            case_dir,
            outcome,
        })
    }

    fn compare_case(
        &self,
        case_dir: &Path,
        options: &ConvertOptions,
    ) -> Result<Vec<TreeDifference>> {
        let graph_path = case_dir.join(DEP_GRAPH_FILE);
        let graph_text = self.source_reader.read_source(&graph_path)?;
        let graph = DepGraph::from_json(&graph_text)
            .with_context(|| format!("Failed to load {}", graph_path.display()))?;
        let actual = GraphToTreeConverter::convert(&graph, options)?;

        let expected = self.read_expected_tree(case_dir)?;

        Ok(TreeDiffer::diff(&actual, &expected))
    }

    fn read_expected_tree(&self, case_dir: &Path) -> Result<TreeNode> {
        let listing_path = case_dir.join(EXPECTED_LISTING_FILE);
        if self.source_reader.source_exists(&listing_path) {
            let listing = self.source_reader.read_source(&listing_path)?;
            return TreeTextParser::parse(&listing)
                .with_context(|| format!("Failed to parse {}", listing_path.display()));
        }

        let fixture_path = case_dir.join(EXPECTED_FIXTURE_FILE);
        if self.source_reader.source_exists(&fixture_path) {
            let fixture = self.source_reader.read_source(&fixture_path)?;
            return serde_json::from_str(&fixture).map_err(|e| {
                LockTreeError::invalid_input_at(
                    format!("{} is not a valid tree: {}", EXPECTED_FIXTURE_FILE, e),
                    format!("line {}", e.line()),
                )
                .into()
            });
        }

        Err(LockTreeError::invalid_input(format!(
            "case directory {} has neither {} nor {}",
            case_dir.display(),
            EXPECTED_LISTING_FILE,
            EXPECTED_FIXTURE_FILE
        ))
        .into())
    }
}

fn case_name(case_dir: &Path) -> String {
    case_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| case_dir.display().to_string())
}
