//! In-memory collaborators for orchestrator unit tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::core::host::{
    Choice, DiffPresenter, DocumentSource, EditApplier, FileDiscovery, HostError, LanguageId,
    Notifier, Progress, Prompt, TextDocument,
};
use crate::infra::language::language_for_path;

/// Answers every prompt the same way and records what was asked.
pub struct ScriptedPrompt {
    answer: Option<Choice>,
    pub asked: Vec<(String, Vec<Choice>)>,
}

impl ScriptedPrompt {
    pub fn new(answer: Option<Choice>) -> Self {
        Self {
            answer,
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str, options: &[Choice]) -> Result<Option<Choice>, HostError> {
        self.asked.push((message.to_string(), options.to_vec()));
        Ok(self.answer)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Vec<String>,
    pub warns: Vec<String>,
    pub errors: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warns.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Records `(title, original, cleaned)` per diff shown.
#[derive(Default)]
pub struct RecordingDiff {
    pub shown: Vec<(String, String, String)>,
}

impl DiffPresenter for RecordingDiff {
    fn show_diff(
        &mut self,
        _document: &TextDocument,
        original: &str,
        cleaned: &str,
        title: &str,
    ) -> Result<(), HostError> {
        self.shown
            .push((title.to_string(), original.to_string(), cleaned.to_string()));
        Ok(())
    }
}

/// Edit applier that only records calls; `refuse` makes every replace fail.
#[derive(Default)]
pub struct MemoryEditor {
    pub refuse: bool,
    pub replaced: Vec<(PathBuf, String)>,
    pub saved: Vec<PathBuf>,
}

impl EditApplier for MemoryEditor {
    fn replace_whole_document(
        &mut self,
        document: &TextDocument,
        new_text: &str,
    ) -> Result<bool, HostError> {
        if self.refuse {
            return Ok(false);
        }
        self.replaced
            .push((document.path().to_path_buf(), new_text.to_string()));
        Ok(true)
    }

    fn save(&mut self, document: &TextDocument) -> Result<(), HostError> {
        self.saved.push(document.path().to_path_buf());
        Ok(())
    }
}

/// A whole workspace held in memory. Files listed in `unreadable` fail to
/// open, files in `read_only` fail to save.
#[derive(Default)]
pub struct MemoryWorkspace {
    pub files: BTreeMap<PathBuf, String>,
    pub unreadable: BTreeSet<PathBuf>,
    pub read_only: BTreeSet<PathBuf>,
    staged: HashMap<PathBuf, String>,
    pub opened: Vec<PathBuf>,
    pub saved: Vec<PathBuf>,
}

impl MemoryWorkspace {
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn text(&self, path: &str) -> &str {
        &self.files[Path::new(path)]
    }
}

impl FileDiscovery for MemoryWorkspace {
    fn find_files(&self, _include: &str, _exclude: &[String]) -> Result<Vec<PathBuf>, HostError> {
        Ok(self.files.keys().cloned().collect())
    }
}

impl DocumentSource for MemoryWorkspace {
    fn language_of(&self, handle: &Path) -> LanguageId {
        language_for_path(handle)
    }

    fn open(&mut self, handle: &Path) -> Result<TextDocument, HostError> {
        self.opened.push(handle.to_path_buf());
        if self.unreadable.contains(handle) {
            return Err(HostError::NotText {
                path: handle.to_path_buf(),
            });
        }
        let text = self.files.get(handle).cloned().unwrap_or_default();
        Ok(TextDocument::new(handle, self.language_of(handle), text))
    }
}

impl EditApplier for MemoryWorkspace {
    fn replace_whole_document(
        &mut self,
        document: &TextDocument,
        new_text: &str,
    ) -> Result<bool, HostError> {
        self.staged
            .insert(document.path().to_path_buf(), new_text.to_string());
        Ok(true)
    }

    fn save(&mut self, document: &TextDocument) -> Result<(), HostError> {
        let path = document.path().to_path_buf();
        if self.read_only.contains(&path) {
            return Err(HostError::Write {
                path,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        if let Some(text) = self.staged.remove(&path) {
            self.files.insert(path.clone(), text);
        }
        self.saved.push(path);
        Ok(())
    }
}

/// Records reports; flips to cancelled once `cancel_after` reports have
/// been made (the initial "Found" report included).
#[derive(Default)]
pub struct ScriptedProgress {
    pub reports: Vec<(f64, String)>,
    pub cancel_after: Option<usize>,
    pub finished: bool,
}

impl Progress for ScriptedProgress {
    fn report(&mut self, increment_percent: f64, message: &str) {
        self.reports.push((increment_percent, message.to_string()));
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_after
            .is_some_and(|limit| self.reports.len() >= limit)
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
