//! Whitespace, debug-statement and AI-comment passes plus the composite
//! cleanup pipeline.
//!
//! Every pass is a pure `&str -> String` function over the whole text.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::emoji::remove_emojis;
use crate::core::patterns::{
    AI_COMMENT_PATTERNS, BLANK_LINE_RUN, SPACE_RUN, TRAILING_WHITESPACE, debug_patterns,
};

/// Leading indentation and the rest of the line up to the first line terminator.
static INDENT_AND_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([^\r\x{2028}\x{2029}]*)").unwrap());

/// Strip trailing whitespace from every line and rejoin with `\n`.
///
/// A `\r` before a newline counts as trailing whitespace, so CRLF input comes
/// back LF-only.
pub fn remove_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| TRAILING_WHITESPACE.replace(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of lines ending in whitespace.
pub fn count_trailing_whitespace(text: &str) -> usize {
    text.split('\n')
        .filter(|line| TRAILING_WHITESPACE.is_match(line))
        .count()
}

/// Replace runs of three or more newlines (blank lines between) with `\n\n`.
fn collapse_blank_runs(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Remove whole-line debug statements for `language_id`.
///
/// Only statements that are alone on their line are matched, so a call
/// sharing a line with other code is never touched.
pub fn remove_debug_statements(text: &str, language_id: &str) -> String {
    let stripped = debug_patterns(language_id).strip(text);
    collapse_blank_runs(&stripped)
}

pub fn count_debug_statements(text: &str, language_id: &str) -> usize {
    debug_patterns(language_id).count(text)
}

/// Remove comment lines/blocks whose content starts with an AI marker.
pub fn remove_ai_comments(text: &str) -> String {
    let stripped = AI_COMMENT_PATTERNS.strip(text);
    collapse_blank_runs(&stripped)
}

pub fn count_ai_comments(text: &str) -> usize {
    AI_COMMENT_PATTERNS.count(text)
}

/// Collapse runs of two or more spaces after the leading indentation.
/// Tabs are left alone.
pub fn fix_multiple_spaces(text: &str) -> String {
    text.split('\n')
        .map(|line| match INDENT_AND_BODY.captures(line) {
            Some(caps) => format!("{}{}", &caps[1], SPACE_RUN.replace_all(&caps[2], " ")),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run every pass in order: emojis, debug statements, AI comments, trailing
/// whitespace, multi-space collapse.
pub fn clean_all_ai_artifacts(text: &str, language_id: &str) -> String {
    let text = remove_emojis(text);
    let text = remove_debug_statements(&text, language_id);
    let text = remove_ai_comments(&text);
    let text = remove_trailing_whitespace(&text);
    fix_multiple_spaces(&text)
}
