//! Gitignore-aware file discovery for workspace runs.
//! - Respects .gitignore, .git/info/exclude, and global gitignore
//! - One include glob, any number of exclude globs, both matched against
//!   paths relative to the root
//! - Deterministic ordering for stable tests/CI
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use tracing::debug;

/// Gitignore-aware walker with an include glob and exclude globs.
/// Excludes are applied in two places:
///   1) Early: prune directories during traversal (filter_entry).
///   2) Late: filter out files that still slipped through.
pub struct FileWalker
{
    /// Files must match this to be returned
    include: GlobSet,

    /// Files matching any of these are dropped
    exclude: GlobSet,

    /// `dir/**` excludes with the `/**` cut off, for pruning directories
    exclude_dirs: GlobSet,
}

impl FileWalker
{
    /// Build a walker from an include glob (e.g. `"**/*"`) and exclude globs
    /// (e.g. `"**/node_modules/**"`).
    pub fn new(
        include: &str,
        exclude: &[String],
    ) -> Result<Self>
    {
        let mut inc = GlobSetBuilder::new();
        inc.add(Glob::new(include)?);

        let mut exc = GlobSetBuilder::new();
        let mut dirs = GlobSetBuilder::new();

        for pattern in exclude
        {
            exc.add(Glob::new(pattern)?);

            if let Some(dir) = pattern.strip_suffix("/**")
            {
                dirs.add(Glob::new(dir)?);
            }
        }

        Ok(Self {
            include: inc.build()?,
            exclude: exc.build()?,
            exclude_dirs: dirs.build()?,
        })
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Dotfiles are candidates too; `.git` is kept out by the exclude list.
        b.hidden(false);

        // Respect .ignore/.gitignore/.git/info/exclude and global gitignore,
        // inside a git repository or not
        b.require_git(false);
        b.git_ignore(true);
        b.git_global(true);
        b.git_exclude(true);
        b.follow_links(false);

        let dirs = self
            .exclude_dirs
            .clone();
        let root_owned = root.to_path_buf();
        b.filter_entry(move |ent: &DirEntry| {
            let is_dir = ent
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false);

            if !is_dir
            {
                return true;
            }

            let rel = ent
                .path()
                .strip_prefix(&root_owned)
                .unwrap_or(ent.path());
            !dirs.is_match(rel)
        });

        b
    }

    /// Traverse files under `root`, respecting ignore rules and globs.
    /// Returns a **sorted** list of file paths for determinism.
    pub fn walk_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Vec<PathBuf>
    {
        let root_path = root.as_ref();
        let walker = self
            .build_walk(root_path)
            .build();

        let mut out: Vec<PathBuf> = walker
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(e) =>
                {
                    debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|abs| {
                let rel = abs
                    .strip_prefix(root_path)
                    .unwrap_or(abs);
                self.include
                    .is_match(rel)
                    && !self
                        .exclude
                        .is_match(rel)
            })
            .collect();

        out.sort();

        out
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::core::batch::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};

    /// Create a file with parent dirs as needed
    fn write_file(
        root: &Path,
        rel: &str,
        contents: &str,
    ) -> Result<()>
    {
        let path = root.join(rel);
        if let Some(parent) = path.parent()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn default_excludes() -> Vec<String>
    {
        DEFAULT_EXCLUDE
            .iter()
            .map(|g| g.to_string())
            .collect()
    }

    fn relative(
        root: &Path,
        files: Vec<PathBuf>,
    ) -> Vec<PathBuf>
    {
        files
            .into_iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_path_buf()
            })
            .collect()
    }

    #[test]
    fn test_default_excludes_prune_build_dirs() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();

        write_file(root, "src/app.ts", "x")?;
        write_file(root, "node_modules/pkg/index.js", "x")?;
        write_file(root, "web/node_modules/pkg/index.js", "x")?;
        write_file(root, "dist/bundle.js", "x")?;
        write_file(root, "build/out.css", "x")?;
        write_file(root, ".hidden.md", "x")?;

        let walker = FileWalker::new(DEFAULT_INCLUDE, &default_excludes())?;
        let files = relative(root, walker.walk_files(root));

        assert_eq!(
            files,
            vec![PathBuf::from(".hidden.md"), PathBuf::from("src/app.ts")]
        );
        Ok(())
    }

    #[test]
    fn test_include_glob_narrows() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();

        write_file(root, "a.ts", "x")?;
        write_file(root, "b.py", "x")?;
        write_file(root, "nested/c.ts", "x")?;

        let walker = FileWalker::new("**/*.ts", &[])?;
        let files = relative(root, walker.walk_files(root));

        assert_eq!(files, vec![PathBuf::from("a.ts"), PathBuf::from("nested/c.ts")]);
        Ok(())
    }

    #[test]
    fn test_respects_gitignore() -> Result<()>
    {
        let tmp = TempDir::new()?;
        let root = tmp.path();

        write_file(root, ".gitignore", "secret.md\n")?;
        write_file(root, "secret.md", "# ignored")?;
        write_file(root, "keep.md", "# kept")?;

        let walker = FileWalker::new(DEFAULT_INCLUDE, &default_excludes())?;
        let files = relative(root, walker.walk_files(root));

        assert!(files.contains(&PathBuf::from("keep.md")));
        assert!(!files.contains(&PathBuf::from("secret.md")));
        Ok(())
    }

    #[test]
    fn test_bad_glob_is_an_error()
    {
        assert!(FileWalker::new("a[", &[]).is_err());
    }
}
