//! Terminal implementations of the prompt, notifier, diff and progress seams.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use similar::TextDiff;

use crate::cli::AppContext;
use crate::core::host::{Choice, DiffPresenter, HostError, Notifier, Progress, Prompt, TextDocument};

/// Reads one answer per prompt from `input`. An empty line, an unknown
/// answer or end of input counts as dismissing the prompt.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

fn parse_answer(answer: &str, options: &[Choice]) -> Option<Choice> {
    let answer = answer.trim().to_ascii_lowercase();
    if answer.is_empty() {
        return None;
    }

    options.iter().copied().find(|choice| {
        let label = choice.label().to_ascii_lowercase();
        label == answer || label.starts_with(&answer)
    })
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, message: &str, options: &[Choice]) -> Result<Option<Choice>, HostError> {
        let labels: Vec<String> = options
            .iter()
            .map(|c| {
                let label = c.label();
                format!("[{}]{}", &label[..1].to_ascii_lowercase(), &label[1..])
            })
            .collect();

        write!(self.output, "{message} {} ", labels.join(" / ")).map_err(HostError::Prompt)?;
        self.output.flush().map_err(HostError::Prompt)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(HostError::Prompt)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(parse_answer(&line, options))
    }
}

/// Answers without asking: the first of `preferred` that is on offer, or
/// a dismissal if none is.
pub struct AutoPrompt {
    preferred: Vec<Choice>,
}

impl AutoPrompt {
    pub fn new(preferred: impl Into<Vec<Choice>>) -> Self {
        Self {
            preferred: preferred.into(),
        }
    }
}

impl Prompt for AutoPrompt {
    fn ask(&mut self, message: &str, options: &[Choice]) -> Result<Option<Choice>, HostError> {
        let answer = self.preferred.iter().copied().find(|c| options.contains(c));
        tracing::debug!(prompt = message, ?answer, "answered automatically");
        Ok(answer)
    }
}

/// Information to stdout, warnings and errors to stderr.
pub struct ConsoleNotifier {
    quiet: bool,
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            quiet: ctx.quiet,
            color: !ctx.no_color,
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&mut self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            println!("{} {message}", "✓".green());
        } else {
            println!("{message}");
        }
    }

    fn warn(&mut self, message: &str) {
        if self.color {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{message}");
        }
    }

    fn error(&mut self, message: &str) {
        if self.color {
            eprintln!("{} {message}", "error:".red().bold());
        } else {
            eprintln!("error: {message}");
        }
    }
}

/// Unified diff of the original and cleaned text.
pub fn render_unified_diff(name: &str, original: &str, cleaned: &str) -> String {
    TextDiff::from_lines(original, cleaned)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}

/// Prints previews to stdout.
pub struct UnifiedDiff {
    color: bool,
}

impl UnifiedDiff {
    pub fn new(ctx: &AppContext) -> Self {
        Self { color: !ctx.no_color }
    }
}

impl DiffPresenter for UnifiedDiff {
    fn show_diff(
        &mut self,
        document: &TextDocument,
        original: &str,
        cleaned: &str,
        title: &str,
    ) -> Result<(), HostError> {
        let diff = render_unified_diff(&document.path().display().to_string(), original, cleaned);

        if !self.color {
            println!("{title}");
            print!("{diff}");
            return Ok(());
        }

        println!("{}", title.bold());
        for line in diff.lines() {
            if line.starts_with("+++") || line.starts_with("---") {
                println!("{}", line.bold());
            } else if line.starts_with('+') {
                println!("{}", line.green());
            } else if line.starts_with('-') {
                println!("{}", line.red());
            } else if line.starts_with("@@") {
                println!("{}", line.cyan());
            } else {
                println!("{line}");
            }
        }
        Ok(())
    }
}

/// Cancellation flag, raised by Ctrl+C once armed.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Raise the flag on Ctrl+C from now on. Only the first handler
    /// registered in a process takes effect.
    pub fn arm_ctrl_c(&self) {
        let raised = self.0.clone();
        if let Err(error) = ctrlc::set_handler(move || {
            raised.store(true, Ordering::SeqCst);
        }) {
            tracing::warn!(%error, "Ctrl+C will not cancel this run");
        }
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Percent-based progress bar; hidden in quiet mode.
///
/// Ctrl+C keeps its default behavior until the first report, so it still
/// aborts a pending confirmation prompt.
pub struct BarProgress {
    bar: ProgressBar,
    percent: f64,
    cancel: CancelFlag,
    armed: bool,
}

impl BarProgress {
    pub fn new(ctx: &AppContext, cancel: CancelFlag) -> Self {
        let bar = if ctx.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        };

        Self {
            bar,
            percent: 0.0,
            cancel,
            armed: false,
        }
    }
}

impl Progress for BarProgress {
    fn report(&mut self, increment_percent: f64, message: &str) {
        if !self.armed {
            self.cancel.arm_ctrl_c();
            self.armed = true;
        }

        self.percent = (self.percent + increment_percent).min(100.0);
        self.bar.set_position(self.percent.round() as u64);
        self.bar.set_message(message.to_string());
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_raised()
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prompt_reads_answers() {
        let options = [Choice::Yes, Choice::Preview, Choice::Cancel];
        let mut out = Vec::new();
        let mut prompt = TerminalPrompt::new(&b"p\n"[..], &mut out);
        assert_eq!(prompt.ask("Go?", &options).unwrap(), Some(Choice::Preview));
        assert_eq!(String::from_utf8(out).unwrap(), "Go? [y]es / [p]review / [c]ancel ");
    }

    #[test]
    fn test_prompt_dismissals() {
        let options = [Choice::Yes, Choice::Cancel];
        for input in [&b""[..], &b"\n"[..], &b"maybe\n"[..], &b"preview\n"[..]] {
            let mut prompt = TerminalPrompt::new(input, Vec::new());
            assert_eq!(prompt.ask("Go?", &options).unwrap(), None);
        }
        let mut prompt = TerminalPrompt::new(&b"  YES \n"[..], Vec::new());
        assert_eq!(prompt.ask("Go?", &options).unwrap(), Some(Choice::Yes));
    }

    #[test]
    fn test_auto_prompt_prefers_in_order() {
        let mut dry = AutoPrompt::new([Choice::Preview]);
        assert_eq!(
            dry.ask("x", &[Choice::Yes, Choice::Preview, Choice::Cancel]).unwrap(),
            Some(Choice::Preview)
        );
        assert_eq!(dry.ask("x", &[Choice::Yes, Choice::Cancel]).unwrap(), None);

        let mut yes = AutoPrompt::new([Choice::Yes]);
        assert_eq!(yes.ask("x", &[Choice::Yes, Choice::Cancel]).unwrap(), Some(Choice::Yes));
    }

    #[test]
    fn test_unified_diff() {
        let diff = render_unified_diff("a.js", "a();\nconsole.log(1);\n", "a();\n");
        insta::assert_snapshot!(diff, @r"
        --- a/a.js
        +++ b/a.js
        @@ -1,2 +1 @@
         a();
        -console.log(1);
        ");
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::default();
        let ctx = AppContext { quiet: true, no_color: true, dry_run: false, yes: false };
        let progress = BarProgress::new(&ctx, flag.clone());
        assert!(!progress.is_cancelled());
        flag.raise();
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_failed_ctrl_c_registration_is_logged() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let flag = CancelFlag::default();
            flag.arm_ctrl_c();
            // a process gets one handler; the second registration fails
            flag.arm_ctrl_c();
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Ctrl+C will not cancel this run"), "{logs}");
    }
}
