//! Aggregate counters for batch runs and their one-line summaries.

use crate::core::cleanup::{count_ai_comments, count_debug_statements, count_trailing_whitespace};
use crate::core::emoji::count_emojis;

/// Counters for a batch emoji removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmojiStats {
    pub total_emojis: usize,
    pub files_processed: usize,
    pub files_with_emojis: usize,
}

/// Counters for a batch artifact cleanup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
    pub emojis_removed: usize,
    pub debug_statements_removed: usize,
    pub ai_comments_removed: usize,
    pub trailing_whitespace_lines: usize,
    pub files_processed: usize,
    pub files_modified: usize,
}

impl CleanupStats {
    /// Fold one modified file's counts into the totals.
    pub fn add_modified(&mut self, issues: &IssueCounts) {
        self.emojis_removed += issues.emojis;
        self.debug_statements_removed += issues.debug_statements;
        self.ai_comments_removed += issues.ai_comments;
        self.trailing_whitespace_lines += issues.trailing_whitespace;
        self.files_modified += 1;
    }
}

/// Per-document artifact counts, taken before any pass runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub emojis: usize,
    pub debug_statements: usize,
    pub ai_comments: usize,
    pub trailing_whitespace: usize,
}

impl IssueCounts {
    pub fn scan(text: &str, language_id: &str) -> Self {
        Self {
            emojis: count_emojis(text),
            debug_statements: count_debug_statements(text, language_id),
            ai_comments: count_ai_comments(text),
            trailing_whitespace: count_trailing_whitespace(text),
        }
    }

    pub fn total(&self) -> usize {
        self.emojis + self.debug_statements + self.ai_comments + self.trailing_whitespace
    }

    /// Non-zero kinds as phrases, e.g. `["2 emoji(s)", "trailing whitespace on 1 line(s)"]`.
    pub fn describe(&self) -> Vec<String> {
        let mut items = Vec::new();

        if self.emojis > 0 {
            items.push(format!("{} emoji(s)", self.emojis));
        }
        if self.debug_statements > 0 {
            items.push(format!("{} debug statement(s)", self.debug_statements));
        }
        if self.ai_comments > 0 {
            items.push(format!("{} AI comment(s)", self.ai_comments));
        }
        if self.trailing_whitespace > 0 {
            items.push(format!(
                "trailing whitespace on {} line(s)",
                self.trailing_whitespace
            ));
        }

        items
    }
}

pub fn format_summary(stats: &EmojiStats) -> String {
    if stats.total_emojis == 0 {
        return format!("No emojis found in {} file(s).", stats.files_processed);
    }

    format!(
        "Removed {} emoji(s) from {} file(s) ({} total files scanned).",
        stats.total_emojis, stats.files_with_emojis, stats.files_processed
    )
}

pub fn format_cleanup_summary(stats: &CleanupStats) -> String {
    let mut items = Vec::new();

    if stats.emojis_removed > 0 {
        items.push(format!("{} emoji(s)", stats.emojis_removed));
    }
    if stats.debug_statements_removed > 0 {
        items.push(format!("{} debug statement(s)", stats.debug_statements_removed));
    }
    if stats.ai_comments_removed > 0 {
        items.push(format!("{} AI comment(s)", stats.ai_comments_removed));
    }
    if stats.trailing_whitespace_lines > 0 {
        items.push(format!(
            "trailing whitespace from {} line(s)",
            stats.trailing_whitespace_lines
        ));
    }

    if items.is_empty() {
        return format!("No issues found in {} file(s).", stats.files_processed);
    }

    format!(
        "Cleaned: {} from {} file(s).",
        items.join(", "),
        stats.files_modified
    )
}
