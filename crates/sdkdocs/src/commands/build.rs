//! `sdkdocs build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use sdkdocs_config::Config;

use crate::error::CliError;
use crate::headless::{HeadlessPage, load_site, preference_store};
use crate::output::Output;

/// Stylesheet referenced by every generated page.
const STYLES_CSS: &str = include_str!("../../assets/styles.css");

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory for the generated site (overrides config, default: site/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self, global: &super::GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let config = global.load_config(self.output_dir)?;
        let output_dir = &config.build_resolved.output_dir;

        match &config.site_resolved.content_dir {
            Some(dir) => output.info(&format!("Content: {}", dir.display())),
            None => output.info("Content: built-in AzizbekID documentation"),
        }
        output.info(&format!("Output: {}", output_dir.display()));

        let pages = build_site(&config, output_dir)?;

        output.success(&format!(
            "Built {pages} pages to {}",
            output_dir.display()
        ));
        Ok(())
    }
}

/// Write `index.html`, one `<id>.html` per topic and the stylesheet.
///
/// Returns the number of HTML pages written.
fn build_site(config: &Config, output_dir: &Path) -> Result<usize, CliError> {
    let site = load_site(config)?;
    let ids: Vec<String> = site.topics().iter().map(|topic| topic.id.clone()).collect();
    if let Some(id) = ids.iter().find(|id| !is_safe_file_stem(id)) {
        return Err(CliError::Validation(format!(
            "Topic id '{id}' cannot be used as a file name"
        )));
    }

    let mut page = HeadlessPage::start(site, config, preference_store(config), None, "");

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join("index.html"), page.snapshot())?;
    for id in &ids {
        page.controller_mut().navigate_to(id);
        fs::write(output_dir.join(format!("{id}.html")), page.snapshot())?;
        tracing::info!(topic = %id, "Wrote page");
    }
    fs::write(output_dir.join("styles.css"), STYLES_CSS)?;

    Ok(ids.len() + 1)
}

fn is_safe_file_stem(id: &str) -> bool {
    !id.starts_with('.') && !id.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkdocs_site::{DEFAULT_THEME_KEY, FileStore, KeyValueStore};

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.site_resolved.project_dir = dir.join(".sdkdocs");
        config
    }

    #[test]
    fn test_build_site_writes_every_topic() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = dir.path().join("site");

        let pages = build_site(&config, &out).unwrap();

        assert_eq!(pages, 11);
        assert!(out.join("styles.css").exists());
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("class=\"nav-item active\" data-topic=\"getting-started\""));
        assert!(index.contains("<body>"));

        let faq = fs::read_to_string(out.join("faq.html")).unwrap();
        assert!(faq.contains("<title>FAQ - AzizbekID Documentation</title>"));
        assert!(faq.contains("class=\"nav-item active\" data-topic=\"faq\""));
        assert_eq!(faq.matches("nav-item active").count(), 1);
    }

    #[test]
    fn test_built_live_example_embeds_no_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = dir.path().join("site");

        build_site(&config, &out).unwrap();

        let page = fs::read_to_string(out.join("live-example.html")).unwrap();
        assert!(!page.contains("<iframe"));
        assert!(!page.contains("src=\"examples/"));
        assert!(!page.contains("href=\"examples/"));
    }

    #[test]
    fn test_build_site_applies_stored_theme() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        FileStore::new(config.site_resolved.preferences_path())
            .set(DEFAULT_THEME_KEY, "dark")
            .unwrap();

        build_site(&config, &dir.path().join("site")).unwrap();

        let index = fs::read_to_string(dir.path().join("site/index.html")).unwrap();
        assert!(index.contains("<body class=\"alt-theme\">"));
        assert!(index.contains("☀️"));
    }

    #[test]
    fn test_unsafe_file_stems() {
        assert!(is_safe_file_stem("getting-started"));
        assert!(!is_safe_file_stem("../etc"));
        assert!(!is_safe_file_stem("a/b"));
        assert!(!is_safe_file_stem(".hidden"));
    }
}
