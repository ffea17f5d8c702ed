//! `sdkdocs render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use sdkdocs_site::navigator::resolve_hash;

use crate::error::CliError;
use crate::headless::{HeadlessPage, load_site, preference_store};
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Topic to render (default: the default topic).
    #[arg(short, long, conflicts_with = "hash")]
    topic: Option<String>,

    /// URL fragment the page is opened with, e.g. "#faq".
    #[arg(long)]
    hash: Option<String>,

    /// Write the page to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(None)?;
        let site = load_site(&config)?;

        let hash = self.hash.unwrap_or_default();
        if !hash.is_empty() && resolve_hash(site.topics(), &hash).is_none() {
            output.warning(&format!(
                "Unknown hash '{hash}', showing '{}'",
                site.default_topic()
            ));
        }

        let mut page = HeadlessPage::start(site, &config, preference_store(&config), None, &hash);
        if let Some(topic) = self.topic
            && !page.controller_mut().navigate_to(&topic)
        {
            return Err(CliError::UnknownTopic(topic));
        }

        let html = page.snapshot();
        match self.output {
            Some(path) => {
                std::fs::write(&path, html)?;
                output.success(&format!(
                    "Rendered '{}' to {}",
                    page.controller().active_topic(),
                    path.display()
                ));
            }
            None => std::io::stdout().lock().write_all(html.as_bytes())?,
        }
        Ok(())
    }
}
