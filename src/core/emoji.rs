//! Emoji detection and removal, whole-text or scoped to comments/strings.
//!
//! Scoped removal is line/regex based, not a lexer. Lines the comment rules do
//! not recognise pass through untouched, and string literals are found by a
//! single left-to-right scan that can be fooled by unusual quoting.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::patterns::EMOJI_RE;

/// Languages whose line comments start with `#`.
const HASH_COMMENT_LANGUAGES: &[&str] = &["python", "ruby", "bash"];

// `[^\r\x{2028}\x{2029}]` is "any char but a line terminator"; lines are already split on '\n'.
static HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(#[^\r\x{2028}\x{2029}]*)$").unwrap());

static SQL_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(--[^\r\x{2028}\x{2029}]*)$").unwrap());

static SLASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(//[^\r\x{2028}\x{2029}]*)$").unwrap());

static INLINE_SLASH_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\r\x{2028}\x{2029}]+?)(//[^\r\x{2028}\x{2029}]*)$").unwrap()
});

static MARKDOWN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(#{1,6}\s+|[-*+]\s+|>\s+)([^\r\x{2028}\x{2029}]*)$").unwrap()
});

/// Delete every emoji code point.
pub fn remove_emojis(text: &str) -> String {
    EMOJI_RE.replace_all(text, "").into_owned()
}

/// Number of emoji code points in `text`.
pub fn count_emojis(text: &str) -> usize {
    EMOJI_RE.find_iter(text).count()
}

/// True as soon as one emoji is found.
pub fn has_emojis(text: &str) -> bool {
    EMOJI_RE.is_match(text)
}

fn is_hash_family(language_id: &str) -> bool {
    HASH_COMMENT_LANGUAGES.contains(&language_id)
}

/// Strip emojis only from comment text; indentation and code are kept.
///
/// Per line, first match wins:
/// 1. whole-line comment (`#` for python/ruby/bash, `--` for sql, `//` otherwise)
/// 2. code followed by a `//` comment (not for the `#` family)
/// 3. markdown heading, list item or blockquote content
pub fn remove_emojis_from_comments(text: &str, language_id: &str) -> String {
    let hash_family = is_hash_family(language_id);

    let whole_line = if hash_family {
        &*HASH_COMMENT
    } else if language_id == "sql" {
        &*SQL_COMMENT
    } else {
        &*SLASH_COMMENT
    };

    text.split('\n')
        .map(|line| {
            if let Some(caps) = whole_line.captures(line) {
                return format!("{}{}", &caps[1], remove_emojis(&caps[2]));
            }

            if !hash_family && let Some(caps) = INLINE_SLASH_COMMENT.captures(line) {
                return format!("{}{}", &caps[1], remove_emojis(&caps[2]));
            }

            if language_id == "markdown" && let Some(caps) = MARKDOWN_PREFIX.captures(line) {
                return format!("{}{}{}", &caps[1], &caps[2], remove_emojis(&caps[3]));
            }

            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip emojis only inside quoted literals (`'...'`, `"..."`, `` `...` ``).
pub fn remove_emojis_from_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (start, end) in quoted_spans(text) {
        out.push_str(&text[cursor..start]);
        out.push_str(&remove_emojis(&text[start..end]));
        cursor = end;
    }

    out.push_str(&text[cursor..]);
    out
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Byte spans of quoted literals, found left to right without overlap.
///
/// A literal opens at a quote and closes at the next same quote on the same
/// line. A backslash always consumes itself plus the following character, so
/// `\"` never closes a double-quoted literal. If no close is found the opening
/// quote is treated as plain text and scanning resumes after it.
fn quoted_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        if matches!(c, '\'' | '"' | '`')
            && let Some(end) = literal_end(text, pos, c)
        {
            spans.push((pos, end));
            pos = end;
            continue;
        }

        pos += c.len_utf8();
    }

    spans
}

/// End (exclusive) of the literal opened by `quote` at `open`, if it closes.
fn literal_end(text: &str, open: usize, quote: char) -> Option<usize> {
    let mut chars = text[open + quote.len_utf8()..].char_indices();
    let base = open + quote.len_utf8();

    while let Some((i, c)) = chars.next() {
        if c == quote {
            return Some(base + i + c.len_utf8());
        }

        if c == '\\' {
            match chars.next() {
                Some((_, escaped)) if !is_line_terminator(escaped) => continue,
                _ => return None,
            }
        }

        if is_line_terminator(c) {
            return None;
        }
    }

    None
}
