//! `sdkdocs theme` command implementation.

use std::sync::Arc;

use clap::{Args, Subcommand};
use sdkdocs_site::{FileStore, ThemePersistence};

use crate::error::CliError;
use crate::headless::preference_store;
use crate::output::Output;

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    #[command(subcommand)]
    action: Option<ThemeAction>,
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeAction {
    /// Show the stored preference (default).
    Show,
    /// Switch between light and dark.
    Toggle,
}

impl ThemeArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(None)?;
        let store = preference_store(&config);
        let theme = ThemePersistence::new(Arc::<FileStore>::clone(&store), config.theme.storage_key.clone());

        match self.action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => {
                output.print(theme.stored().as_str());
            }
            ThemeAction::Toggle => {
                let next = theme.stored().toggled();
                theme.persist(next)?;
                output.success(&format!("Theme set to {next} {}", next.icon()));
                output.muted(&format!("Saved to {}", store.path().display()));
            }
        }
        Ok(())
    }
}
