//! Pattern tables for artifact detection.
//!
//! Every table is plain data compiled once on first use. Transform functions in
//! `core::emoji` and `core::cleanup` only read from here.
//!
//! Debug and AI-comment patterns are whole-line patterns: `^` holds at the
//! start of the text or after any line terminator (`\n`, `\r`, U+2028,
//! U+2029) and `$` at the end of the text or before one. `regex` multi-line
//! mode only knows `\n`, so [`LinePattern`] does the line anchoring itself.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// LanguageId whose debug table doubles as the fallback.
pub const FALLBACK_LANGUAGE: &str = "javascript";

/// Emoji code points: emoticons, pictographs, transport, regional indicators,
/// misc symbols, dingbats, supplemental symbols, enclosed alphanumerics,
/// technical symbols, combining marks for symbols, and the emoji variation
/// selector. Each match is a single code point.
pub static EMOJI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F1E0}-\x{1F1FF}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1F018}-\x{1F270}",
        r"\x{238C}-\x{2454}",
        r"\x{20D0}-\x{20FF}",
        r"\x{FE0F}",
        r"\x{1F004}",
        r"\x{1F0CF}",
        r"\x{1F170}-\x{1F251}",
        "]",
    ))
    .unwrap()
});

/// Three or more newlines separated only by whitespace.
pub static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

/// Whitespace run at the end of a single line.
pub static TRAILING_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+$").unwrap());

/// Two or more plain spaces.
pub static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Characters that end a line for `^`/`$` in line patterns.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Any character except a line terminator.
const NOT_TERMINATOR: &str = r"[^\n\r\x{2028}\x{2029}]";

fn is_line_start(text: &str, at: usize) -> bool {
    at == 0
        || text[..at]
            .chars()
            .next_back()
            .is_some_and(|c| LINE_TERMINATORS.contains(&c))
}

/// Byte offset just past the next line terminator at or after `at`.
fn next_line_start(text: &str, at: usize) -> Option<usize> {
    text[at..]
        .char_indices()
        .find(|(_, c)| LINE_TERMINATORS.contains(c))
        .map(|(i, c)| at + i + c.len_utf8())
}

/// One pattern anchored between a line start and a line end.
///
/// The body is compiled as `\A(body)(?:\z|<terminator>)` and tried at every
/// line start, so the terminator that satisfies `$` is never part of the match.
#[derive(Debug)]
pub struct LinePattern {
    re: Regex,
}

impl LinePattern {
    fn new(body: &str) -> Self {
        let src = format!(r"\A({body})(?:\z|[\n\r\x{{2028}}\x{{2029}}])");
        Self { re: Regex::new(&src).unwrap() }
    }

    /// Non-overlapping matches, left to right.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut at = Some(0);

        while let Some(pos) = at {
            if is_line_start(text, pos)
                && let Some(m) = self.re.captures(&text[pos..]).and_then(|caps| caps.get(1))
                && !m.is_empty()
            {
                found.push(pos + m.start()..pos + m.end());
                at = Some(pos + m.end());
                continue;
            }
            at = next_line_start(text, pos);
        }

        found
    }

    /// Delete every match.
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for range in self.find_all(text) {
            out.push_str(&text[last..range.start]);
            last = range.end;
        }
        out.push_str(&text[last..]);

        out
    }
}

/// Ordered line patterns for one artifact kind (and, for debug statements,
/// one language).
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<LinePattern>,
}

impl PatternSet {
    fn compile(bodies: &[&str]) -> Self {
        let patterns = bodies.iter().map(|body| LinePattern::new(body)).collect();

        Self { patterns }
    }

    /// Sum of match counts of every pattern against the unmodified text.
    pub fn count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|p| p.find_all(text).len())
            .sum()
    }

    /// Apply every pattern in order, each one on the previous output.
    pub fn strip(&self, text: &str) -> String {
        let mut out = text.to_string();

        for p in &self.patterns {
            out = p.strip(&out);
        }

        out
    }
}

const JS_DEBUG: &[&str] = &[
    r"\s*console\.(log|debug|info|warn|error|trace)\([^)]*\);?\s*",
    r"\s*debugger;?\s*",
];

const PYTHON_DEBUG: &[&str] = &[
    r"\s*print\([^)]*\)\s*",
    r"\s*pprint\([^)]*\)\s*",
    r"\s*breakpoint\(\)\s*",
];

const JAVA_DEBUG: &[&str] = &[
    r"\s*System\.out\.print(ln)?\([^)]*\);?\s*",
    r"\s*System\.err\.print(ln)?\([^)]*\);?\s*",
];

const KOTLIN_DEBUG: &[&str] = &[
    r"\s*println\([^)]*\)\s*",
    r"\s*print\([^)]*\)\s*",
];

const CSHARP_DEBUG: &[&str] = &[
    r"\s*Console\.Write(Line)?\([^)]*\);?\s*",
    r"\s*Debug\.Write(Line)?\([^)]*\);?\s*",
];

const PHP_DEBUG: &[&str] = &[
    r"\s*var_dump\([^)]*\);?\s*",
    r"\s*print_r\([^)]*\);?\s*",
    r"\s*echo\s+[^;]+;?\s*",
];

const RUBY_DEBUG: &[&str] = &[
    r"\s*puts\s+[^\n]+",
    r"\s*p\s+[^\n]+",
    r"\s*pp\s+[^\n]+",
];

const GO_DEBUG: &[&str] = &[
    r"\s*fmt\.Print(ln|f)?\([^)]*\)\s*",
    r"\s*log\.Print(ln|f)?\([^)]*\)\s*",
];

const RUST_DEBUG: &[&str] = &[
    r"\s*println!\([^)]*\);?\s*",
    r"\s*print!\([^)]*\);?\s*",
    r"\s*dbg!\([^)]*\);?\s*",
];

const CPP_DEBUG: &[&str] = &[
    r"\s*std::cout\s*<<[^;]+;?\s*",
    r"\s*printf\([^)]*\);?\s*",
];

const C_DEBUG: &[&str] = &[r"\s*printf\([^)]*\);?\s*"];

const SWIFT_DEBUG: &[&str] = &[
    r"\s*print\([^)]*\)\s*",
    r"\s*debugPrint\([^)]*\)\s*",
];

const DART_DEBUG: &[&str] = &[
    r"\s*print\([^)]*\);?\s*",
    r"\s*debugPrint\([^)]*\);?\s*",
];

/// LanguageId → debug-statement table.
const DEBUG_SOURCES: &[(&str, &[&str])] = &[
    ("javascript", JS_DEBUG),
    ("typescript", JS_DEBUG),
    ("javascriptreact", JS_DEBUG),
    ("typescriptreact", JS_DEBUG),
    ("vue", JS_DEBUG),
    ("svelte", JS_DEBUG),
    ("python", PYTHON_DEBUG),
    ("java", JAVA_DEBUG),
    ("kotlin", KOTLIN_DEBUG),
    ("csharp", CSHARP_DEBUG),
    ("php", PHP_DEBUG),
    ("ruby", RUBY_DEBUG),
    ("go", GO_DEBUG),
    ("rust", RUST_DEBUG),
    ("cpp", CPP_DEBUG),
    ("c", C_DEBUG),
    ("swift", SWIFT_DEBUG),
    ("dart", DART_DEBUG),
];

static DEBUG_TABLE: LazyLock<HashMap<&'static str, PatternSet>> = LazyLock::new(|| {
    DEBUG_SOURCES
        .iter()
        .map(|(lang, bodies)| (*lang, PatternSet::compile(bodies)))
        .collect()
});

static FALLBACK_DEBUG: LazyLock<PatternSet> = LazyLock::new(|| PatternSet::compile(JS_DEBUG));

/// Debug-statement patterns for `language_id`, falling back to the
/// JavaScript family for unknown ids.
pub fn debug_patterns(language_id: &str) -> &'static PatternSet {
    DEBUG_TABLE
        .get(language_id)
        .unwrap_or(&*FALLBACK_DEBUG)
}

/// Comment prefixes that mark machine-written code, matched case-insensitively.
pub const AI_MARKERS: &[&str] = &[
    "AI-generated",
    "Generated by AI",
    "Copilot",
    "AI suggestion",
    "Generated code",
];

/// Line (`//`, `#`) and block (`/* */`, `<!-- -->`) comments whose content
/// starts with an AI marker. Language independent.
pub static AI_COMMENT_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    let markers = AI_MARKERS.join("|");
    let any = NOT_TERMINATOR;
    let bodies = [
        format!(r"(?i)\s*//\s*({markers}){any}*"),
        format!(r"(?i)\s*#\s*({markers}){any}*"),
        format!(r"(?i)\s*/\*\s*({markers}){any}*\*/\s*"),
        format!(r"(?i)\s*<!--\s*({markers}){any}*-->\s*"),
    ];
    let bodies: Vec<&str> = bodies.iter().map(String::as_str).collect();

    PatternSet::compile(&bodies)
});
