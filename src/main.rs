mod cli;

use cli::{Args, Command};
use lockfile_tree::adapters::outbound::console::StderrProgressReporter;
use lockfile_tree::adapters::outbound::filesystem::FileSystemReader;
use lockfile_tree::adapters::outbound::formatters::VerificationReportFormatter;
use lockfile_tree::adapters::outbound::runtime::CooperativeScheduler;
use lockfile_tree::application::dto::{BuildTreeRequest, PreprocessRequest, VerificationRequest};
use lockfile_tree::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use lockfile_tree::application::use_cases::{
    BuildTreeUseCase, PreprocessLockfileUseCase, VerifyTreesUseCase,
};
use lockfile_tree::config::{self, CliOverrides, ConfigFile, Settings};
use lockfile_tree::shared::error::{ExitCode, LockTreeError};
use lockfile_tree::shared::Result;
use std::io::IsTerminal;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            // --help and --version are printed as "errors" by clap
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            if let Some(lock_err) = LockTreeError::find_in(&e) {
                eprintln!("\n[{} {}]", lock_err.name(), lock_err.code());
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Preprocess { lockfile, output } => {
            let use_case =
                PreprocessLockfileUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
            let response = use_case.execute(PreprocessRequest::new(lockfile))?;

            let presenter = PresenterFactory::create(output);
            presenter.present(&response.content)?;
            Ok(ExitCode::Success)
        }

        Command::Tree {
            input,
            from,
            format,
            max_tree_size,
            output,
        } => {
            let settings = Settings::resolve(
                config.as_ref(),
                &CliOverrides {
                    max_tree_size,
                    format,
                    ..Default::default()
                },
            )?;

            let use_case =
                BuildTreeUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
            let tree = use_case.execute(BuildTreeRequest::new(
                input,
                from,
                settings.max_tree_size,
            ))?;

            eprintln!("{}", FormatterFactory::progress_message(settings.format));
            let formatted = FormatterFactory::create(settings.format).format(&tree)?;

            let presenter = PresenterFactory::create(output);
            presenter.present(&formatted)?;
            Ok(ExitCode::Success)
        }

        Command::Verify {
            case_dirs,
            concurrency,
            max_tree_size,
            yield_threshold_ms,
        } => {
            let settings = Settings::resolve(
                config.as_ref(),
                &CliOverrides {
                    concurrency,
                    yield_threshold_ms,
                    max_tree_size,
                    format: None,
                },
            )?;

            let scheduler = CooperativeScheduler::with_threshold(settings.yield_threshold)?;
            let use_case = VerifyTreesUseCase::new(
                FileSystemReader::new(),
                scheduler,
                StderrProgressReporter::new(),
            );
            let response = use_case
                .execute(VerificationRequest::new(
                    case_dirs,
                    settings.concurrency,
                    settings.max_tree_size,
                ))
                .await?;

            let report = VerificationReportFormatter::new(std::io::stdout().is_terminal())
                .format(&response);
            PresenterFactory::create(PresenterType::Stdout).present(&report)?;

            if response.has_differences() {
                Ok(ExitCode::DifferencesFound)
            } else {
                Ok(ExitCode::Success)
            }
        }
    }
}

/// Explicit `--config` must exist; otherwise the working directory is searched.
fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Ok(Some(config))
        }
        None => {
            let config = config::discover_config(Path::new("."))?;
            if config.is_some() {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
            }
            Ok(config)
        }
    }
}
