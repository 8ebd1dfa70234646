use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::batch::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, Discovery};
use crate::core::host::{DEFAULT_FILE_TYPES, LanguageId, Settings};

/// Config file names, in lookup order
pub const CONFIG_FILES: [&str; 4] = ["eraser.toml", "eraser.yaml", "eraser.json", ".eraser.toml"];

/// Environment overrides look like `EMOJI_ERASER__SHOW_NOTIFICATIONS=false`
pub const ENV_PREFIX: &str = "EMOJI_ERASER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Report a summary after each operation
    pub show_notifications: bool,

    /// Language ids processed by workspace runs
    pub file_types: Vec<String>,

    /// Glob of files considered by workspace runs
    pub include: String,

    /// Globs skipped by workspace runs (in addition to .gitignore)
    pub exclude: Vec<String>,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            show_notifications: true,
            file_types: DEFAULT_FILE_TYPES
                .iter()
                .map(|id| id.to_string())
                .collect(),
            include: DEFAULT_INCLUDE.to_string(),
            exclude: DEFAULT_EXCLUDE
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }
}

impl Config
{
    /// Settings handed to the orchestrators
    pub fn settings(&self) -> Settings
    {
        Settings {
            show_notifications: self.show_notifications,
            file_types: self
                .file_types
                .iter()
                .map(|id| LanguageId::new(id.as_str()))
                .collect(),
        }
    }

    pub fn discovery(&self) -> Discovery
    {
        Discovery {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Load settings from the first config file found in the working directory,
/// overlaid by environment variables.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            tracing::debug!(config = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("file_types")
            .with_list_parse_key("exclude")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY RUN: would write {}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_match_settings_defaults()
    {
        let config = Config::default();
        assert_eq!(config.settings(), Settings::default());
        assert_eq!(config.discovery(), Discovery::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()>
    {
        let tmp = TempDir::new()?;
        std::fs::write(
            tmp.path()
                .join("eraser.toml"),
            "show_notifications = false\nfile_types = [\"rust\"]\n",
        )?;

        let config = load_config_from(tmp.path())?;
        assert!(!config.show_notifications);
        assert_eq!(config.file_types, vec!["rust"]);
        assert_eq!(config.include, DEFAULT_INCLUDE);
        assert_eq!(config.exclude.len(), DEFAULT_EXCLUDE.len());
        Ok(())
    }

    #[test]
    fn test_default_config_round_trips_through_toml() -> Result<()>
    {
        let text = toml::to_string_pretty(&Config::default())?;
        let back: Config = toml::from_str(&text)?;
        assert_eq!(back, Config::default());
        Ok(())
    }
}
