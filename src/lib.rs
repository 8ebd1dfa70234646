//! **emoji-eraser** - pattern-based cleanup of source files
//!
//! Strips emojis, trailing whitespace, whole-line debug prints and
//! AI-generated comment markers, one file at a time or across a directory
//! tree. All detection is regex/line based on raw text.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Argument-to-orchestrator glue for the binary
pub mod commands;

/// Terminal prompt, notifier, diff and progress implementations
pub mod terminal;

/// Core text passes and orchestration, free of filesystem and terminal I/O
pub mod core {
    /// Emoji regex and per-language debug/AI-comment pattern tables
    pub mod patterns;

    /// Emoji removal over whole text, comments only, or string literals only
    pub mod emoji;
    pub use emoji::{count_emojis, has_emojis, remove_emojis};

    /// Trailing whitespace, debug statements, AI comments and the full pipeline
    pub mod cleanup;
    pub use cleanup::clean_all_ai_artifacts;

    /// Batch counters and summary formatters
    pub mod stats;
    pub use stats::{CleanupStats, EmojiStats, format_cleanup_summary, format_summary};

    /// Collaborator traits and the document snapshot
    pub mod host;

    /// Single-document count → confirm → preview/apply → report flow
    pub mod session;

    /// Workspace-wide loop with cooperative cancellation
    pub mod batch;

    #[cfg(test)]
    pub(crate) mod testing;
}

/// Infrastructure - configuration, discovery and file I/O
pub mod infra {
    /// Settings from eraser.toml and EMOJI_ERASER__* variables
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Extension → language id
    pub mod language;
    pub use language::language_for_path;

    /// UTF-8 reads, atomic writes and the on-disk workspace
    pub mod io;
    pub use io::FsWorkspace;

    /// Gitignore-aware file discovery
    pub mod walk;
    pub use walk::FileWalker;
}

// Strategic re-exports for library consumers
pub use cli::{AppContext, Cli, Commands};
pub use core::host::{LanguageId, Settings, TextDocument};
pub use core::session::{EmojiScope, Operation, Outcome};
pub use infra::{Config, FileWalker, FsWorkspace, load_config};
