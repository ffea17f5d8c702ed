//! `sdkdocs topics` command implementation.

use clap::Args;
use sdkdocs_site::TopicEntry;

use crate::error::CliError;
use crate::headless::load_site;
use crate::output::Output;

/// Arguments for the topics command.
#[derive(Args)]
pub(crate) struct TopicsArgs {
    /// Print the topic list as JSON.
    #[arg(long)]
    json: bool,
}

impl TopicsArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(None)?;
        let site = load_site(&config)?;

        if self.json {
            let topics: Vec<&TopicEntry> = site.topics().iter().collect();
            let json = serde_json::to_string_pretty(&topics)
                .map_err(|e| CliError::Validation(e.to_string()))?;
            output.print(&json);
            return Ok(());
        }

        let width = site
            .topics()
            .iter()
            .map(|topic| topic.id.len())
            .max()
            .unwrap_or(0);
        for topic in site.topics() {
            let marker = if topic.id == site.default_topic() {
                "*"
            } else {
                " "
            };
            output.print(&format!("{marker} {:<width$}  {}", topic.id, topic.title));
        }
        output.muted(&format!(
            "{} topics, * marks the default",
            site.topics().len()
        ));
        Ok(())
    }
}
