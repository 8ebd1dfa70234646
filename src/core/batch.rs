//! Batch runs over every discovered file in a workspace.
//!
//! Files are processed one at a time. Cancellation is sampled before each
//! file, so a run always stops on a file boundary. A failure on one file is
//! logged and the loop moves on.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::core::host::{
    Choice, HostError, Notifier, Progress, Prompt, Settings, Workspace,
};
use crate::core::session::{self, EmojiScope, Found, Operation};
use crate::core::stats::{CleanupStats, EmojiStats, format_cleanup_summary, format_summary};

/// Glob defaults for discovery.
pub const DEFAULT_INCLUDE: &str = "**/*";
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/out/**",
    "**/build/**",
];

/// The workspace-wide commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    RemoveEmojis,
    CleanAll,
}

impl BatchOperation {
    fn operation(self) -> Operation {
        match self {
            BatchOperation::RemoveEmojis => Operation::RemoveEmojis(EmojiScope::All),
            BatchOperation::CleanAll => Operation::CleanAll,
        }
    }

    fn confirm_message(self) -> &'static str {
        match self {
            BatchOperation::RemoveEmojis => {
                "This will remove emojis from all files in the workspace. Continue?"
            }
            BatchOperation::CleanAll => {
                "This will clean AI artifacts from all files in the workspace. Continue?"
            }
        }
    }
}

/// Whether changes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    #[default]
    Apply,
    /// Count and transform every file, write nothing.
    DryRun,
}

/// Which files discovery returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub include: String,
    pub exclude: Vec<String>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.to_string(),
            exclude: DEFAULT_EXCLUDE.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// Stats of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchReport {
    Emojis(EmojiStats),
    Cleanup(CleanupStats),
}

impl BatchReport {
    fn new(op: BatchOperation) -> Self {
        match op {
            BatchOperation::RemoveEmojis => BatchReport::Emojis(EmojiStats::default()),
            BatchOperation::CleanAll => BatchReport::Cleanup(CleanupStats::default()),
        }
    }

    fn record_processed(&mut self) {
        match self {
            BatchReport::Emojis(stats) => stats.files_processed += 1,
            BatchReport::Cleanup(stats) => stats.files_processed += 1,
        }
    }

    fn record_modified(&mut self, found: &Found) {
        match (self, found) {
            (BatchReport::Emojis(stats), found) => {
                stats.total_emojis += found.total();
                stats.files_with_emojis += 1;
            }
            (BatchReport::Cleanup(stats), Found::Breakdown(issues)) => stats.add_modified(issues),
            (BatchReport::Cleanup(stats), Found::Count(_)) => stats.files_modified += 1,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            BatchReport::Emojis(stats) => format_summary(stats),
            BatchReport::Cleanup(stats) => format_cleanup_summary(stats),
        }
    }
}

/// How a batch run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// No workspace to run in
    NoContext,
    Declined,
    /// Stopped at a file boundary; partial stats are dropped
    Cancelled,
    Completed(BatchReport),
}

/// Interactive collaborators of a batch run.
pub struct BatchHost<'a> {
    pub prompt: &'a mut dyn Prompt,
    pub notifier: &'a mut dyn Notifier,
    pub progress: &'a mut dyn Progress,
}

/// Run `op` over every file `workspace` discovers.
#[instrument(skip_all, fields(op = ?op, mode = ?mode))]
pub fn run(
    op: BatchOperation,
    mode: BatchMode,
    workspace: Option<&mut dyn Workspace>,
    host: &mut BatchHost<'_>,
    discovery: &Discovery,
    settings: &Settings,
) -> Result<BatchOutcome, HostError> {
    let Some(workspace) = workspace else {
        host.notifier.warn("No workspace folder open.");
        return Ok(BatchOutcome::NoContext);
    };

    let answer = host
        .prompt
        .ask(op.confirm_message(), &[Choice::Yes, Choice::Cancel])?;
    if answer != Some(Choice::Yes) {
        return Ok(BatchOutcome::Declined);
    }

    let files = workspace.find_files(&discovery.include, &discovery.exclude)?;
    let total = files.len();
    info!(files = total, "discovered files");
    host.progress.report(0.0, &format!("Found {total} files"));

    let mut report = BatchReport::new(op);

    for (i, path) in files.iter().enumerate() {
        if host.progress.is_cancelled() {
            host.progress.finish();
            host.notifier.warn("Operation cancelled.");
            return Ok(BatchOutcome::Cancelled);
        }

        host.progress
            .report(100.0 / total as f64, &format!("Processing {}/{}", i + 1, total));

        let language_id = workspace.language_of(path);
        if !settings.allows(&language_id) {
            debug!(file = %path.display(), language = %language_id, "skipped: file type not enabled");
            continue;
        }

        match process_file(op.operation(), mode, workspace, path, &mut report) {
            Ok(()) => {}
            Err(e) => warn!(file = %path.display(), error = %e, "failed to process file"),
        }
    }

    host.progress.finish();

    if settings.show_notifications {
        host.notifier.info(&report.summary());
    }

    Ok(BatchOutcome::Completed(report))
}

/// Open, count, transform and (outside dry runs) write one file. Stats are
/// touched only once each step they depend on has succeeded.
fn process_file(
    operation: Operation,
    mode: BatchMode,
    workspace: &mut dyn Workspace,
    path: &Path,
    report: &mut BatchReport,
) -> Result<(), HostError> {
    let document = workspace.open(path)?;
    report.record_processed();

    let language_id = document.language_id().as_str();
    let found = operation.count(document.text(), language_id);
    if found.total() == 0 {
        return Ok(());
    }

    let cleaned = operation.transform(document.text(), language_id);

    if mode == BatchMode::Apply {
        session::apply(workspace, &document, &cleaned)?;
    } else {
        debug!(file = %path.display(), found = found.total(), "dry run: not written");
    }

    report.record_modified(&found);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::testing::{MemoryWorkspace, RecordingNotifier, ScriptedPrompt, ScriptedProgress};

    struct Fixture {
        prompt: ScriptedPrompt,
        notifier: RecordingNotifier,
        progress: ScriptedProgress,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                prompt: ScriptedPrompt::new(Some(Choice::Yes)),
                notifier: RecordingNotifier::default(),
                progress: ScriptedProgress::default(),
            }
        }

        fn run(
            &mut self,
            op: BatchOperation,
            mode: BatchMode,
            workspace: Option<&mut dyn Workspace>,
        ) -> BatchOutcome {
            let mut host = BatchHost {
                prompt: &mut self.prompt,
                notifier: &mut self.notifier,
                progress: &mut self.progress,
            };
            run(op, mode, workspace, &mut host, &Discovery::default(), &Settings::default()).unwrap()
        }
    }

    fn three_files() -> MemoryWorkspace {
        MemoryWorkspace::with_files(&[
            ("a.ts", "const a = '🎉🚀';"),
            ("b.py", "# 🐍 🔥 ✨\nx = 1"),
            ("c.md", "# Plain"),
        ])
    }

    #[test]
    fn test_emoji_batch_stats() {
        let mut fx = Fixture::new();
        let mut ws = three_files();
        let outcome = fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, Some(&mut ws));

        let expected = EmojiStats { total_emojis: 5, files_processed: 3, files_with_emojis: 2 };
        assert_eq!(outcome, BatchOutcome::Completed(BatchReport::Emojis(expected)));
        assert_eq!(
            fx.notifier.infos,
            vec!["Removed 5 emoji(s) from 2 file(s) (3 total files scanned)."]
        );
        assert_eq!(ws.text("a.ts"), "const a = '';");
        assert_eq!(ws.text("b.py"), "#   \nx = 1");
        assert_eq!(ws.saved.len(), 2);
        assert!(fx.progress.finished);
    }

    #[test]
    fn test_progress_messages() {
        let mut fx = Fixture::new();
        let mut ws = three_files();
        fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, Some(&mut ws));

        let messages: Vec<&str> = fx.progress.reports.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["Found 3 files", "Processing 1/3", "Processing 2/3", "Processing 3/3"]);
        let increment = fx.progress.reports[1].0;
        assert!((increment - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancel_after_first_file() {
        let mut fx = Fixture::new();
        // "Found" plus "Processing 1/3"
        fx.progress.cancel_after = Some(2);
        let mut ws = three_files();
        let outcome = fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, Some(&mut ws));

        assert_eq!(outcome, BatchOutcome::Cancelled);
        assert_eq!(ws.opened, vec![PathBuf::from("a.ts")]);
        assert_eq!(fx.notifier.warns, vec!["Operation cancelled."]);
        assert!(fx.notifier.infos.is_empty());
    }

    #[test]
    fn test_declined_before_discovery() {
        let mut fx = Fixture::new();
        fx.prompt = ScriptedPrompt::new(Some(Choice::Cancel));
        let mut ws = three_files();
        let outcome = fx.run(BatchOperation::CleanAll, BatchMode::Apply, Some(&mut ws));

        assert_eq!(outcome, BatchOutcome::Declined);
        assert_eq!(
            fx.prompt.asked[0].0,
            "This will clean AI artifacts from all files in the workspace. Continue?"
        );
        assert!(fx.progress.reports.is_empty());
        assert!(ws.opened.is_empty());
    }

    #[test]
    fn test_no_workspace() {
        let mut fx = Fixture::new();
        let outcome = fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, None);
        assert_eq!(outcome, BatchOutcome::NoContext);
        assert_eq!(fx.notifier.warns, vec!["No workspace folder open."]);
        assert!(fx.prompt.asked.is_empty());
    }

    #[test]
    fn test_file_type_filter_and_failures() {
        let mut fx = Fixture::new();
        let mut ws = MemoryWorkspace::with_files(&[
            ("broken.js", "🎉"),
            ("locked.js", "🎉"),
            ("main.rs", "// 🦀"),
            ("ok.js", "🎉"),
        ]);
        ws.unreadable.insert(PathBuf::from("broken.js"));
        ws.read_only.insert(PathBuf::from("locked.js"));

        let outcome = fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, Some(&mut ws));

        // rust is not in the default allow-list; broken.js never opens
        let expected = EmojiStats { total_emojis: 1, files_processed: 2, files_with_emojis: 1 };
        assert_eq!(outcome, BatchOutcome::Completed(BatchReport::Emojis(expected)));
        assert!(!ws.opened.contains(&PathBuf::from("main.rs")));
        assert_eq!(ws.text("locked.js"), "🎉");
        assert_eq!(ws.text("ok.js"), "");
    }

    #[test]
    fn test_cleanup_batch_and_dry_run() {
        let files: &[(&str, &str)] = &[
            ("a.js", "// Copilot\nconsole.log(1);\nlet a = 1;  "),
            ("b.js", "let b = 2;"),
        ];

        let mut fx = Fixture::new();
        let mut ws = MemoryWorkspace::with_files(files);
        let outcome = fx.run(BatchOperation::CleanAll, BatchMode::DryRun, Some(&mut ws));

        let expected = CleanupStats {
            emojis_removed: 0,
            debug_statements_removed: 1,
            ai_comments_removed: 1,
            trailing_whitespace_lines: 1,
            files_processed: 2,
            files_modified: 1,
        };
        assert_eq!(outcome, BatchOutcome::Completed(BatchReport::Cleanup(expected)));
        assert_eq!(ws.text("a.js"), files[0].1);
        assert!(ws.saved.is_empty());
        assert_eq!(
            fx.notifier.infos,
            vec!["Cleaned: 1 debug statement(s), 1 AI comment(s), trailing whitespace from 1 line(s) from 1 file(s)."]
        );

        let mut fx = Fixture::new();
        fx.run(BatchOperation::CleanAll, BatchMode::Apply, Some(&mut ws));
        assert_eq!(ws.text("a.js"), "\n\nlet a = 1;");
        assert_eq!(ws.text("b.js"), "let b = 2;");
    }

    #[test]
    fn test_empty_workspace_summary() {
        let mut fx = Fixture::new();
        let mut ws = MemoryWorkspace::default();
        let outcome = fx.run(BatchOperation::RemoveEmojis, BatchMode::Apply, Some(&mut ws));
        assert_eq!(
            outcome,
            BatchOutcome::Completed(BatchReport::Emojis(EmojiStats::default()))
        );
        assert_eq!(fx.notifier.infos, vec!["No emojis found in 0 file(s)."]);
        assert_eq!(fx.progress.reports.len(), 1);
    }
}
