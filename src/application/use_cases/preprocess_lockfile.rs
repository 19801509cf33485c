use crate::application::dto::{PreprocessRequest, PreprocessResponse};
use crate::dependency_tree::services::AliasPreprocessor;
use crate::ports::outbound::{LockfileReader, ProgressReporter};
use crate::shared::Result;

/// PreprocessLockfileUseCase - resolves `npm:` aliases in a lockfile
///
/// # Type Parameters
/// * `LR` - LockfileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct PreprocessLockfileUseCase<LR, PR> {
    lockfile_reader: LR,
    progress_reporter: PR,
}

impl<LR, PR> PreprocessLockfileUseCase<LR, PR>
where
    LR: LockfileReader,
    PR: ProgressReporter,
{
    pub fn new(lockfile_reader: LR, progress_reporter: PR) -> Self {
        Self {
            lockfile_reader,
            progress_reporter,
        }
    }

    /// Reads the lockfile and rewrites every alias to its real package
    pub fn execute(&self, request: PreprocessRequest) -> Result<PreprocessResponse> {
        self.progress_reporter.report(&format!(
            "📖 Loading lockfile from: {}",
            request.lockfile_path.display()
        ));

        let content = self.lockfile_reader.read_lockfile(&request.lockfile_path)?;
        let preprocessed = AliasPreprocessor::preprocess(&content)?;

        self.progress_reporter
            .report(&format!("✅ Detected {}", preprocessed.format));
        if preprocessed.aliases.is_empty() {
            self.progress_reporter.report("   - No aliases found");
        } else {
            self.progress_reporter.report(&format!(
                "🔗 Resolved {} alias(es)",
                preprocessed.aliases.len()
            ));
            for (alias, target) in preprocessed.aliases.iter() {
                self.progress_reporter.report(&format!(
                    "   - {} -> {}@{}",
                    alias, target.resolved_name, target.resolved_version
                ));
            }
        }

        Ok(PreprocessResponse {
            format: preprocessed.format,
            content: preprocessed.content,
            aliases: preprocessed.aliases,
        })
    }
}
