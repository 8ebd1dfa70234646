use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::session::EmojiScope;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
    pub yes: bool,      // global --yes
}

#[derive(Parser)]
#[command(name = "eraser")]
#[command(
    about = "Strip emojis, debug prints, AI comment markers and trailing whitespace from source files"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and success messages
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Answer "Yes" to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove emojis from a file
    Emojis(EmojisArgs),

    /// Remove trailing whitespace from a file
    Whitespace(FileArgs),

    /// Remove whole-line debug statements from a file
    Debug(FileArgs),

    /// Remove AI-generated comment markers from a file
    AiComments(FileArgs),

    /// Run every cleanup pass on a file
    Clean(FileArgs),

    /// Remove emojis (or clean everything) across a directory tree
    Workspace(WorkspaceArgs),

    /// Initialize an eraser.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// File to clean
    pub file: PathBuf,

    /// Language id to use instead of the one detected from the extension
    #[arg(long = "lang", value_name = "ID")]
    pub language: Option<String>,
}

/// Emoji scopes as accepted on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ScopeArg {
    #[default]
    All,
    Comments,
    Strings,
}

impl From<ScopeArg> for EmojiScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => EmojiScope::All,
            ScopeArg::Comments => EmojiScope::Comments,
            ScopeArg::Strings => EmojiScope::Strings,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EmojisArgs {
    #[command(flatten)]
    pub target: FileArgs,

    /// Where to remove emojis
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub scope: ScopeArg,
}

#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Root directory to process
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Run every cleanup pass instead of emoji removal only
    #[arg(long)]
    pub clean: bool,

    /// Override the configured include glob
    #[arg(long)]
    pub include: Option<String>,

    /// Additional exclude globs
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_emojis_scope_and_globals() {
        let cli = Cli::parse_from(["eraser", "emojis", "a.ts", "--scope", "comments", "--yes", "--lang", "rust"]);
        assert!(cli.yes);
        match cli.command {
            Commands::Emojis(args) => {
                assert!(matches!(args.scope, ScopeArg::Comments));
                assert_eq!(args.target.language.as_deref(), Some("rust"));
                assert_eq!(args.target.file, PathBuf::from("a.ts"));
            }
            _ => panic!("expected emojis"),
        }
    }

    #[test]
    fn test_parse_workspace_defaults() {
        let cli = Cli::parse_from(["eraser", "--dry-run", "workspace"]);
        assert!(cli.dry_run);
        match cli.command {
            Commands::Workspace(args) => {
                assert_eq!(args.root, PathBuf::from("."));
                assert!(!args.clean);
                assert!(args.exclude.is_empty());
            }
            _ => panic!("expected workspace"),
        }
    }
}
