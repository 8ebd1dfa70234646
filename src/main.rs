use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use emoji_eraser::cli::{AppContext, Cli, Commands};
use emoji_eraser::core::session::Operation;
use emoji_eraser::infra::config::load_config;
use emoji_eraser::{commands, completion};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is for messages and diffs
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        yes: cli.yes,
    };

    match cli.command {
        Commands::Emojis(args) => {
            let config = load_config()?;
            commands::run_file(Operation::RemoveEmojis(args.scope.into()), args.target, &ctx, &config)
        }
        Commands::Whitespace(args) => {
            commands::run_file(Operation::RemoveTrailingWhitespace, args, &ctx, &load_config()?)
        }
        Commands::Debug(args) => {
            commands::run_file(Operation::RemoveDebugStatements, args, &ctx, &load_config()?)
        }
        Commands::AiComments(args) => {
            commands::run_file(Operation::RemoveAiComments, args, &ctx, &load_config()?)
        }
        Commands::Clean(args) => commands::run_file(Operation::CleanAll, args, &ctx, &load_config()?),
        Commands::Workspace(args) => commands::run_workspace(args, &ctx, &load_config()?),
        Commands::Init(args) => {
            emoji_eraser::infra::config::init(args, &ctx)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions(args) => {
            completion::run(args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
