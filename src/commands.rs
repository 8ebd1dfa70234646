//! Glue from parsed arguments to the orchestrators.

use std::process::ExitCode;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::{AppContext, FileArgs, WorkspaceArgs};
use crate::core::batch::{self, BatchHost, BatchMode, BatchOperation, BatchOutcome};
use crate::core::host::{Choice, DocumentSource, LanguageId, Prompt, Workspace};
use crate::core::session::{self, DocumentHost, Operation, Outcome};
use crate::infra::config::Config;
use crate::infra::io::FsWorkspace;
use crate::terminal::{AutoPrompt, BarProgress, CancelFlag, ConsoleNotifier, TerminalPrompt, UnifiedDiff};

/// Exit status of a cancelled workspace run (as after SIGINT).
const EXIT_CANCELLED: u8 = 130;

/// How confirmations get answered for this invocation.
fn prompt_for(ctx: &AppContext, preferred_dry_run: &[Choice]) -> Box<dyn Prompt> {
    if ctx.dry_run {
        Box::new(AutoPrompt::new(preferred_dry_run.to_vec()))
    } else if ctx.yes {
        Box::new(AutoPrompt::new([Choice::Yes]))
    } else {
        Box::new(TerminalPrompt::stdio())
    }
}

fn dry_run_note(ctx: &AppContext, message: &str) {
    if ctx.dry_run && !ctx.quiet {
        if ctx.no_color {
            println!("DRY RUN: {message}");
        } else {
            println!("{}", format!("DRY RUN: {message}").yellow());
        }
    }
}

/// Run one single-document operation against `args.file`.
pub fn run_file(
    operation: Operation,
    args: FileArgs,
    ctx: &AppContext,
    config: &Config,
) -> Result<ExitCode> {
    let mut workspace =
        FsWorkspace::new(".").with_language(args.language.as_deref().map(LanguageId::from));

    let document = if args.file.is_file() {
        let doc = workspace
            .open(&args.file)
            .with_context(|| format!("Failed to open {}", args.file.display()))?;
        Some(doc)
    } else {
        None
    };

    // Dry runs preview where a preview exists and otherwise decline.
    let mut prompt = prompt_for(ctx, &[Choice::Preview, Choice::Cancel]);
    let mut notifier = ConsoleNotifier::new(ctx);
    let mut diff = UnifiedDiff::new(ctx);

    let mut host = DocumentHost {
        prompt: prompt.as_mut(),
        notifier: &mut notifier,
        diff: &mut diff,
        editor: &mut workspace,
    };

    let outcome = session::run(operation, document.as_ref(), &mut host, &config.settings())?;
    info!(?outcome, "single-document run finished");

    match outcome {
        Outcome::NoContext | Outcome::ApplyFailed => Ok(ExitCode::FAILURE),
        Outcome::Declined if !operation.supports_preview() => {
            dry_run_note(ctx, "this operation has no preview; nothing written");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Run a batch over `args.root`.
pub fn run_workspace(args: WorkspaceArgs, ctx: &AppContext, config: &Config) -> Result<ExitCode> {
    let mut discovery = config.discovery();
    if let Some(include) = args.include {
        discovery.include = include;
    }
    discovery.exclude.extend(args.exclude);

    let mut workspace = args.root.is_dir().then(|| FsWorkspace::new(&args.root));

    // A dry run writes nothing, so the up-front confirmation is implied.
    let mut prompt = prompt_for(ctx, &[Choice::Yes]);
    let mut notifier = ConsoleNotifier::new(ctx);
    let mut progress = BarProgress::new(ctx, CancelFlag::default());

    let mut host = BatchHost {
        prompt: prompt.as_mut(),
        notifier: &mut notifier,
        progress: &mut progress,
    };

    let op = if args.clean {
        BatchOperation::CleanAll
    } else {
        BatchOperation::RemoveEmojis
    };
    let mode = if ctx.dry_run {
        BatchMode::DryRun
    } else {
        BatchMode::Apply
    };

    let outcome = batch::run(
        op,
        mode,
        workspace.as_mut().map(|w| w as &mut dyn Workspace),
        &mut host,
        &discovery,
        &config.settings(),
    )
    .with_context(|| format!("Workspace run over {} failed", args.root.display()))?;
    info!(?outcome, "workspace run finished");

    match outcome {
        BatchOutcome::NoContext => Ok(ExitCode::FAILURE),
        BatchOutcome::Cancelled => Ok(ExitCode::from(EXIT_CANCELLED)),
        BatchOutcome::Completed(_) => {
            dry_run_note(ctx, "no files were written");
            Ok(ExitCode::SUCCESS)
        }
        BatchOutcome::Declined => Ok(ExitCode::SUCCESS),
    }
}
