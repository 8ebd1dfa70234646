//! Library-level checks of the documented behavior of every text pass.

use emoji_eraser::core::cleanup::{
    clean_all_ai_artifacts, count_trailing_whitespace, fix_multiple_spaces, remove_ai_comments,
    remove_debug_statements, remove_trailing_whitespace,
};
use emoji_eraser::core::emoji::{
    count_emojis, remove_emojis, remove_emojis_from_comments, remove_emojis_from_strings,
};

const SAMPLES: &[&str] = &[
    "",
    "Hello 🌟 World",
    "plain text\nwith lines\n",
    "🎉🎉🎉",
    "  // comment ✨  \n\tconsole.log('x');\n\n\n\nprint(1)\n",
    "# AI suggestion: rename\n<!-- generated by AI -->\n/* Copilot */\nreal();\r\n",
    "a  b   c\t\td  \n    indented  line   ",
    "x = 1; console.log(x)\nfoo(); // 👍 ok\n",
];

#[test]
fn hello_world_scenario()
{
    assert_eq!(remove_emojis("Hello 🌟 World"), "Hello  World");
    assert_eq!(count_emojis("Hello 🌟 World"), 1);
}

#[test]
fn whole_line_debug_statement_is_removed()
{
    assert_eq!(remove_debug_statements("  console.log('debug');  ", "javascript"), "");
}

#[test]
fn ai_comment_leaves_its_line_break()
{
    assert_eq!(remove_ai_comments("// AI-generated: do not edit\ncode();"), "\ncode();");
}

#[test]
fn trailing_whitespace_scenario()
{
    assert_eq!(remove_trailing_whitespace("let x = 1;   "), "let x = 1;");
    assert_eq!(count_trailing_whitespace("one\ntwo   \nthree"), 1);
}

#[test]
fn passes_are_idempotent()
{
    for s in SAMPLES
    {
        let once = remove_emojis(s);
        assert_eq!(remove_emojis(&once), once, "emojis: {s:?}");

        let once = remove_trailing_whitespace(s);
        assert_eq!(remove_trailing_whitespace(&once), once, "whitespace: {s:?}");

        let once = remove_ai_comments(s);
        assert_eq!(remove_ai_comments(&once), once, "ai: {s:?}");

        for lang in ["javascript", "python", "rust"]
        {
            let once = remove_debug_statements(s, lang);
            assert_eq!(remove_debug_statements(&once, lang), once, "debug/{lang}: {s:?}");
        }
    }
}

#[test]
fn count_matches_removal()
{
    for s in SAMPLES
    {
        let removed = remove_emojis(s);
        assert_eq!(count_emojis(s) == 0, removed == *s, "{s:?}");
        assert_eq!(count_emojis(&removed), 0);
        assert_eq!(
            s.chars().count() - removed.chars().count(),
            count_emojis(s),
            "{s:?}"
        );
    }
}

#[test]
fn comment_scope_ignores_emojis_elsewhere()
{
    let s = "const label = \"ship 🚢\";\nlet x = `🎯`;\n";
    assert_eq!(remove_emojis_from_comments(s, "typescript"), s);
    assert_eq!(remove_emojis_from_comments(s, "python"), s);

    let s = "// 🚢 ship it\n";
    assert_eq!(remove_emojis_from_strings(s), s);
}

#[test]
fn mid_line_debug_calls_survive()
{
    let s = "x = 1; console.log(x)";
    assert_eq!(remove_debug_statements(s, "javascript"), s);
}

#[test]
fn pipeline_leaves_no_trailing_or_double_spaces()
{
    for s in SAMPLES
    {
        let out = clean_all_ai_artifacts(s, "javascript");
        for line in out.split('\n')
        {
            assert_eq!(line.trim_end(), line, "trailing whitespace in {out:?}");
            let body = line.trim_start();
            assert!(!body.contains("  "), "double space in {out:?}");
        }
        assert_eq!(fix_multiple_spaces(&out), out);
    }
}
