//! `sdkdocs copy` command implementation.

use std::sync::Arc;

use clap::Args;
use sdkdocs_renderer::copy_sources;
use sdkdocs_site::{CopyOutcome, TokioTimer};

use crate::error::CliError;
use crate::headless::{
    HeadlessPage, SystemClipboard, TerminalFeedback, load_site, preference_store,
};

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    /// Topic containing the code sample.
    topic: String,

    /// Zero-based index of the code block within the topic.
    #[arg(short, long, default_value_t = 0)]
    block: usize,
}

impl CopyArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let config = global.load_config(None)?;
        let site = load_site(&config)?;

        let mut page = HeadlessPage::start(
            site,
            &config,
            preference_store(&config),
            Some(Arc::new(TerminalFeedback::new())),
            "",
        );
        if !page.controller_mut().navigate_to(&self.topic) {
            return Err(CliError::UnknownTopic(self.topic));
        }

        let sources = copy_sources(&page.document().content_html());
        let source = sources.get(self.block).ok_or_else(|| {
            CliError::Validation(format!(
                "Topic '{}' has {} code block(s), no block {}",
                self.topic,
                sources.len(),
                self.block
            ))
        })?;

        let control = format!("{}[{}]", self.topic, self.block);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let outcome = runtime.block_on(page.controller().copy_to_clipboard(
            &SystemClipboard,
            &TokioTimer,
            &control,
            source,
        ));

        match outcome {
            CopyOutcome::Copied => Ok(()),
            CopyOutcome::Failed => Err(CliError::ClipboardUnavailable),
        }
    }
}
