//! File path → LanguageId, following the ids editors assign by extension.

use std::path::Path;

use crate::core::host::LanguageId;

/// Id for anything without a known extension.
pub const PLAINTEXT: &str = "plaintext";

const EXTENSIONS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("jsx", "javascriptreact"),
    ("ts", "typescript"),
    ("mts", "typescript"),
    ("cts", "typescript"),
    ("tsx", "typescriptreact"),
    ("py", "python"),
    ("rs", "rust"),
    ("go", "go"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("kts", "kotlin"),
    ("cs", "csharp"),
    ("php", "php"),
    ("rb", "ruby"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("hh", "cpp"),
    ("swift", "swift"),
    ("dart", "dart"),
    ("vue", "vue"),
    ("svelte", "svelte"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("json", "json"),
    ("html", "html"),
    ("htm", "html"),
    ("css", "css"),
    ("sql", "sql"),
    ("sh", "bash"),
    ("bash", "bash"),
];

/// LanguageId for a bare extension (case-insensitive, no leading dot).
pub fn language_for_extension(ext: &str) -> LanguageId {
    let ext = ext.to_ascii_lowercase();

    let id = EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, id)| *id)
        .unwrap_or(PLAINTEXT);

    LanguageId::new(id)
}

pub fn language_for_path(path: &Path) -> LanguageId {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(language_for_extension)
        .unwrap_or_else(|| LanguageId::new(PLAINTEXT))
}
