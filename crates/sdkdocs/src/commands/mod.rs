//! CLI command implementations.

mod build;
mod copy;
mod render;
mod theme;
mod topics;

use std::path::PathBuf;

use clap::Args;
use sdkdocs_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use copy::CopyArgs;
pub(crate) use render::RenderArgs;
pub(crate) use theme::ThemeArgs;
pub(crate) use topics::TopicsArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover sdkdocs.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory with topics.toml and markdown pages (overrides config).
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    /// Topic shown when no hash is given (overrides config).
    #[arg(long, global = true)]
    default_topic: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with CLI overrides applied.
    fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir.clone(),
            default_topic: self.default_topic.clone(),
            output_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
