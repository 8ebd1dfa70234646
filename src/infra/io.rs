use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::host::{
    DocumentSource, EditApplier, FileDiscovery, HostError, LanguageId, TextDocument,
};
use crate::infra::language::language_for_path;
use crate::infra::walk::FileWalker;

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, HostError> {
    let bytes = fs::read(path).map_err(|source| HostError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| HostError::NotText {
        path: path.to_path_buf(),
    })
}

/// Atomic write: temp file in the same directory, then rename over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), HostError> {
    let write_err = |source: std::io::Error| HostError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Preserve original permissions
    let perms = fs::metadata(path).map(|m| m.permissions()).ok();

    // Prefer same-dir tempfile; fall back to OS temp
    let mut tmp = match tempfile::NamedTempFile::new_in(dir) {
        Ok(t) => t,
        Err(_) => tempfile::NamedTempFile::new().map_err(write_err)?,
    };

    tmp.write_all(data).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms).map_err(write_err)?;
    }

    match tmp.persist(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            // Different filesystem? Try copy fallback
            debug!(file = %path.display(), error = %e.error, "rename failed, copying");
            fs::copy(e.file.path(), path).map_err(write_err)?;
            Ok(())
        }
    }
}

/// A directory on disk seen as documents: discovery under `root`, reading
/// by extension-detected language, staged edits written on save.
pub struct FsWorkspace {
    root: PathBuf,
    language_override: Option<LanguageId>,
    staged: HashMap<PathBuf, String>,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            language_override: None,
            staged: HashMap::new(),
        }
    }

    /// Report `language_id` for every file instead of detecting it.
    pub fn with_language(mut self, language_id: Option<LanguageId>) -> Self {
        self.language_override = language_id;
        self
    }
}

impl DocumentSource for FsWorkspace {
    fn language_of(&self, handle: &Path) -> LanguageId {
        self.language_override
            .clone()
            .unwrap_or_else(|| language_for_path(handle))
    }

    fn open(&mut self, handle: &Path) -> Result<TextDocument, HostError> {
        let text = read_text(handle)?;
        Ok(TextDocument::new(handle, self.language_of(handle), text))
    }
}

impl EditApplier for FsWorkspace {
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
        match self.staged.remove(document.path()) {
            Some(text) => write_atomic(document.path(), text.as_bytes()),
            None => Err(HostError::Write {
                path: document.path().to_path_buf(),
                source: ErrorKind::NotFound.into(),
            }),
        }
    }
}

impl FileDiscovery for FsWorkspace {
    fn find_files(&self, include: &str, exclude: &[String]) -> Result<Vec<PathBuf>, HostError> {
        let walker = FileWalker::new(include, exclude).map_err(|e| HostError::Walk(format!("{e:#}")))?;
        Ok(walker.walk_files(&self.root))
    }
}
