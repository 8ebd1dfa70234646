//! Seams between the orchestrators and whatever hosts them.
//!
//! The core never owns files, terminals or editors. It receives a
//! [`TextDocument`] snapshot and talks to the outside world only through the
//! traits below, which keeps `session` and `batch` testable with in-memory fakes.

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque dialect tag such as `"python"` or `"rust"`. Only ever used as a
/// lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// File types processed by batch runs when nothing else is configured.
pub const DEFAULT_FILE_TYPES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "markdown",
    "json",
    "html",
    "css",
];

/// Settings the orchestrators read, handed in explicitly per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Report success summaries
    pub show_notifications: bool,

    /// Allow-list for batch runs
    pub file_types: Vec<LanguageId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_notifications: true,
            file_types: DEFAULT_FILE_TYPES.iter().map(|id| LanguageId::new(*id)).collect(),
        }
    }
}

impl Settings {
    pub fn allows(&self, language_id: &LanguageId) -> bool {
        self.file_types.contains(language_id)
    }
}

/// Immutable snapshot of a document's text and dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    path: PathBuf,
    language_id: LanguageId,
    text: String,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>, language_id: LanguageId, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language_id,
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_id(&self) -> &LanguageId {
        &self.language_id
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Short display name (file name, or the full path if it has none).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Failures raised by host adapters.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    NotText { path: PathBuf },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("edit to {} was refused", path.display())]
    Refused { path: PathBuf },

    #[error("file discovery failed: {0}")]
    Walk(String),

    #[error("failed to read answer")]
    Prompt(#[source] std::io::Error),
}

/// One answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    Preview,
    Cancel,
}

impl Choice {
    pub fn label(self) -> &'static str {
        match self {
            Choice::Yes => "Yes",
            Choice::Preview => "Preview",
            Choice::Cancel => "Cancel",
        }
    }
}

/// Confirmation Prompt: returns the selected option, or `None` if dismissed.
pub trait Prompt {
    fn ask(&mut self, message: &str, options: &[Choice]) -> Result<Option<Choice>, HostError>;
}

/// User-facing messages.
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Diff Presenter: shows `original` next to `cleaned` without touching the document.
pub trait DiffPresenter {
    fn show_diff(
        &mut self,
        document: &TextDocument,
        original: &str,
        cleaned: &str,
        title: &str,
    ) -> Result<(), HostError>;
}

/// Edit Applier.
pub trait EditApplier {
    /// Replace the full text of `document` in one step. `Ok(false)` means the
    /// host refused the edit and nothing changed.
    fn replace_whole_document(
        &mut self,
        document: &TextDocument,
        new_text: &str,
    ) -> Result<bool, HostError>;

    /// Persist whatever `replace_whole_document` staged for `document`.
    fn save(&mut self, document: &TextDocument) -> Result<(), HostError>;
}

/// Document Source for batch runs.
pub trait DocumentSource {
    /// Dialect of the file behind `handle`, without reading its contents.
    fn language_of(&self, handle: &Path) -> LanguageId;

    fn open(&mut self, handle: &Path) -> Result<TextDocument, HostError>;
}

/// File Discovery.
pub trait FileDiscovery {
    fn find_files(&self, include: &str, exclude: &[String]) -> Result<Vec<PathBuf>, HostError>;
}

/// The filesystem side of a batch run: discovery, reading and writing.
pub trait Workspace: DocumentSource + EditApplier + FileDiscovery {}

impl<T: DocumentSource + EditApplier + FileDiscovery + ?Sized> Workspace for T {}

/// Progress Reporter with a cooperative cancellation flag.
pub trait Progress {
    fn report(&mut self, increment_percent: f64, message: &str);
    fn is_cancelled(&self) -> bool;
    fn finish(&mut self) {}
}
