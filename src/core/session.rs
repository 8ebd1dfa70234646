//! Single-document flow:
//! `Counting → (nothing: Reported | found: AwaitingConfirmation)
//!  → {Cancelled, Previewing, Applying} → Reported`.
//!
//! Each phase is a variant of [`Phase`]; [`run`] drives transitions until an
//! [`Outcome`] is reached. Preview never mutates the document, and the edit is
//! applied at most once.

use tracing::{debug, error, instrument};

use crate::core::cleanup::{
    clean_all_ai_artifacts, count_ai_comments, count_debug_statements, count_trailing_whitespace,
    remove_ai_comments, remove_debug_statements, remove_trailing_whitespace,
};
use crate::core::emoji::{
    count_emojis, remove_emojis, remove_emojis_from_comments, remove_emojis_from_strings,
};
use crate::core::host::{
    Choice, DiffPresenter, EditApplier, HostError, Notifier, Prompt, Settings, TextDocument,
};
use crate::core::stats::IssueCounts;

/// Where emoji removal applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmojiScope {
    #[default]
    All,
    Comments,
    Strings,
}

/// The single-document commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RemoveEmojis(EmojiScope),
    RemoveTrailingWhitespace,
    RemoveDebugStatements,
    RemoveAiComments,
    CleanAll,
}

/// What counting found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Count(usize),
    Breakdown(IssueCounts),
}

impl Found {
    pub fn total(&self) -> usize {
        match self {
            Found::Count(n) => *n,
            Found::Breakdown(issues) => issues.total(),
        }
    }
}

const WITH_PREVIEW: &[Choice] = &[Choice::Yes, Choice::Preview, Choice::Cancel];
const WITHOUT_PREVIEW: &[Choice] = &[Choice::Yes, Choice::Cancel];

impl Operation {
    pub fn count(&self, text: &str, language_id: &str) -> Found {
        match self {
            Operation::RemoveEmojis(_) => Found::Count(count_emojis(text)),
            Operation::RemoveTrailingWhitespace => Found::Count(count_trailing_whitespace(text)),
            Operation::RemoveDebugStatements => {
                Found::Count(count_debug_statements(text, language_id))
            }
            Operation::RemoveAiComments => Found::Count(count_ai_comments(text)),
            Operation::CleanAll => Found::Breakdown(IssueCounts::scan(text, language_id)),
        }
    }

    pub fn transform(&self, text: &str, language_id: &str) -> String {
        match self {
            Operation::RemoveEmojis(EmojiScope::All) => remove_emojis(text),
            Operation::RemoveEmojis(EmojiScope::Comments) => {
                remove_emojis_from_comments(text, language_id)
            }
            Operation::RemoveEmojis(EmojiScope::Strings) => remove_emojis_from_strings(text),
            Operation::RemoveTrailingWhitespace => remove_trailing_whitespace(text),
            Operation::RemoveDebugStatements => remove_debug_statements(text, language_id),
            Operation::RemoveAiComments => remove_ai_comments(text),
            Operation::CleanAll => clean_all_ai_artifacts(text, language_id),
        }
    }

    pub fn options(&self) -> &'static [Choice] {
        match self {
            Operation::RemoveEmojis(_)
            | Operation::RemoveDebugStatements
            | Operation::CleanAll => WITH_PREVIEW,
            Operation::RemoveTrailingWhitespace | Operation::RemoveAiComments => WITHOUT_PREVIEW,
        }
    }

    pub fn supports_preview(&self) -> bool {
        self.options().contains(&Choice::Preview)
    }

    fn nothing_found_message(&self) -> &'static str {
        match self {
            Operation::RemoveEmojis(_) => "No emojis found in this file.",
            Operation::RemoveTrailingWhitespace => "No trailing whitespace found.",
            Operation::RemoveDebugStatements => "No debug statements found.",
            Operation::RemoveAiComments => "No AI comment markers found.",
            Operation::CleanAll => "No AI artifacts found. Code looks clean!",
        }
    }

    fn confirm_message(&self, found: &Found) -> String {
        let n = found.total();
        match (self, found) {
            (_, Found::Breakdown(issues)) => {
                format!("Found: {}. Clean all?", issues.describe().join(", "))
            }
            (Operation::RemoveEmojis(_), _) => {
                format!("Found {n} emoji(s) in this file. Remove them?")
            }
            (Operation::RemoveTrailingWhitespace, _) => {
                format!("Found trailing whitespace on {n} line(s). Remove it?")
            }
            (Operation::RemoveDebugStatements, _) => {
                format!("Found {n} debug statement(s). Remove them?")
            }
            (Operation::RemoveAiComments | Operation::CleanAll, _) => {
                format!("Found {n} AI comment marker(s). Remove them?")
            }
        }
    }

    /// Units actually fixed. For emojis this is a recount, since scoped
    /// removal can leave some behind.
    fn fixed(&self, found: &Found, cleaned: &str) -> usize {
        match self {
            Operation::RemoveEmojis(_) => found.total().saturating_sub(count_emojis(cleaned)),
            _ => found.total(),
        }
    }

    fn success_message(&self, found: &Found, fixed: usize) -> String {
        match (self, found) {
            (_, Found::Breakdown(issues)) => {
                format!("Cleaned all AI artifacts! Fixed: {}", issues.describe().join(", "))
            }
            (Operation::RemoveEmojis(_), _) => format!("Removed {fixed} emoji(s) from this file."),
            (Operation::RemoveTrailingWhitespace, _) => {
                format!("Removed trailing whitespace from {fixed} line(s).")
            }
            (Operation::RemoveDebugStatements, _) => format!("Removed {fixed} debug statement(s)."),
            (Operation::RemoveAiComments | Operation::CleanAll, _) => {
                format!("Removed {fixed} AI comment marker(s).")
            }
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Operation::RemoveEmojis(_) => "Failed to remove emojis.",
            Operation::RemoveTrailingWhitespace => "Failed to remove trailing whitespace.",
            Operation::RemoveDebugStatements => "Failed to remove debug statements.",
            Operation::RemoveAiComments => "Failed to remove AI comment markers.",
            Operation::CleanAll => "Failed to clean AI artifacts.",
        }
    }

    pub fn preview_title(&self) -> &'static str {
        match self {
            Operation::RemoveEmojis(_) => "Emoji Removal Preview",
            Operation::RemoveTrailingWhitespace => "Trailing Whitespace Preview",
            Operation::RemoveDebugStatements => "Debug Statement Removal Preview",
            Operation::RemoveAiComments => "AI Comment Removal Preview",
            Operation::CleanAll => "AI Artifact Cleanup Preview",
        }
    }
}

/// How a single-document run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No document to work on
    NoContext,
    /// Counting found nothing; no prompt shown
    NothingToDo,
    /// Prompt answered with anything but an explicit choice to proceed
    Declined,
    /// Diff shown, document untouched
    Previewed,
    /// Edit applied; `fixed` units removed
    Applied { fixed: usize },
    /// Edit refused or failed; document untouched
    ApplyFailed,
}

/// Collaborators a single-document run needs.
pub struct DocumentHost<'a> {
    pub prompt: &'a mut dyn Prompt,
    pub notifier: &'a mut dyn Notifier,
    pub diff: &'a mut dyn DiffPresenter,
    pub editor: &'a mut dyn EditApplier,
}

#[derive(Debug)]
enum Phase {
    Counting,
    AwaitingConfirmation(Found),
    Previewing(String),
    Applying { found: Found, cleaned: String },
    Cancelled,
    Reported(Outcome),
}

/// Run `operation` against `document`, asking for confirmation first.
#[instrument(skip_all, fields(op = ?operation))]
pub fn run(
    operation: Operation,
    document: Option<&TextDocument>,
    host: &mut DocumentHost<'_>,
    settings: &Settings,
) -> Result<Outcome, HostError> {
    let Some(document) = document else {
        host.notifier.warn("No active file to process.");
        return Ok(Outcome::NoContext);
    };

    let text = document.text();
    let language_id = document.language_id().as_str();
    let mut phase = Phase::Counting;

    loop {
        debug!(?phase, "session step");

        phase = match phase {
            Phase::Counting => {
                let found = operation.count(text, language_id);
                if found.total() == 0 {
                    host.notifier.info(operation.nothing_found_message());
                    Phase::Reported(Outcome::NothingToDo)
                } else {
                    Phase::AwaitingConfirmation(found)
                }
            }

            Phase::AwaitingConfirmation(found) => {
                let message = operation.confirm_message(&found);
                match host.prompt.ask(&message, operation.options())? {
                    Some(Choice::Yes) => Phase::Applying {
                        found,
                        cleaned: operation.transform(text, language_id),
                    },
                    Some(Choice::Preview) if operation.supports_preview() => {
                        Phase::Previewing(operation.transform(text, language_id))
                    }
                    _ => Phase::Cancelled,
                }
            }

            Phase::Previewing(cleaned) => {
                let title = format!("{}: {}", operation.preview_title(), document.name());
                host.diff.show_diff(document, text, &cleaned, &title)?;
                Phase::Reported(Outcome::Previewed)
            }

            Phase::Applying { found, cleaned } => match apply(host.editor, document, &cleaned) {
                Ok(()) => {
                    let fixed = operation.fixed(&found, &cleaned);
                    if settings.show_notifications {
                        host.notifier.info(&operation.success_message(&found, fixed));
                    }
                    Phase::Reported(Outcome::Applied { fixed })
                }
                Err(e) => {
                    error!(file = %document.path().display(), error = %e, "apply failed");
                    host.notifier.error(operation.failure_message());
                    Phase::Reported(Outcome::ApplyFailed)
                }
            },

            Phase::Cancelled => return Ok(Outcome::Declined),

            Phase::Reported(outcome) => return Ok(outcome),
        };
    }
}

/// Replace then persist. A refused edit counts as a failure.
pub(crate) fn apply<E: EditApplier + ?Sized>(
    editor: &mut E,
    document: &TextDocument,
    cleaned: &str,
) -> Result<(), HostError> {
    if !editor.replace_whole_document(document, cleaned)? {
        return Err(HostError::Refused {
            path: document.path().to_path_buf(),
        });
    }

    editor.save(document)
}
