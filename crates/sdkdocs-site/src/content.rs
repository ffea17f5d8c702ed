//! Content registry and site loading.
//!
//! A site is described by a `topics.toml` manifest listing topics in sidebar
//! order, plus one markdown page per topic:
//!
//! ```toml
//! [[topic]]
//! id = "getting-started"
//! title = "Getting Started"
//! file = "getting-started.md"   # optional, defaults to "<id>.md"
//! ```
//!
//! Pages are rendered to fragments once, at load time. A topic whose page is
//! missing stays in the sidebar and renders the "not found" placeholder.

use std::collections::HashMap;
use std::path::{Component, Path};

use serde::Deserialize;

use sdkdocs_renderer::render_markdown;

use crate::error::SiteError;
use crate::topic::{TopicEntry, Topics};

/// Manifest file name inside a content directory.
pub const MANIFEST_FILENAME: &str = "topics.toml";

const BUILTIN_MANIFEST: &str = include_str!("../content/topics.toml");

const BUILTIN_PAGES: &[(&str, &str)] = &[
    (
        "getting-started.md",
        include_str!("../content/getting-started.md"),
    ),
    ("quick-example.md", include_str!("../content/quick-example.md")),
    ("api-reference.md", include_str!("../content/api-reference.md")),
    ("guides.md", include_str!("../content/guides.md")),
    ("live-example.md", include_str!("../content/live-example.md")),
    ("migration.md", include_str!("../content/migration.md")),
    ("faq.md", include_str!("../content/faq.md")),
    ("changelog.md", include_str!("../content/changelog.md")),
    ("contributing.md", include_str!("../content/contributing.md")),
    ("support.md", include_str!("../content/support.md")),
];

/// Static mapping from topic id to content fragment.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    fragments: HashMap<String, String>,
}

impl ContentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment for a topic.
    #[must_use]
    pub fn with_fragment(mut self, id: impl Into<String>, markup: impl Into<String>) -> Self {
        self.fragments.insert(id.into(), markup.into());
        self
    }

    /// Fragment for a topic, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fragments.get(id).map(String::as_str)
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the registry holds no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl FromIterator<(String, String)> for ContentRegistry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}

/// Raw manifest as parsed from TOML.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "topic")]
    topics: Vec<ManifestTopic>,
}

#[derive(Debug, Deserialize)]
struct ManifestTopic {
    id: String,
    title: String,
    file: Option<String>,
}

impl ManifestTopic {
    fn file_name(&self) -> String {
        self.file.clone().unwrap_or_else(|| format!("{}.md", self.id))
    }
}

/// Topics, their content and the default topic, loaded once at startup.
#[derive(Clone, Debug)]
pub struct SiteContent {
    topics: Topics,
    registry: ContentRegistry,
    default_topic: String,
}

impl SiteContent {
    /// Assemble a site from parts.
    ///
    /// `default_topic` falls back to the first topic when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownDefaultTopic`] if the default is not a topic.
    pub fn new(
        topics: Topics,
        registry: ContentRegistry,
        default_topic: Option<&str>,
    ) -> Result<Self, SiteError> {
        let default_topic = match default_topic {
            Some(id) if topics.contains(id) => id.to_owned(),
            Some(id) => return Err(SiteError::UnknownDefaultTopic(id.to_owned())),
            None => topics.first().id.clone(),
        };
        Ok(Self {
            topics,
            registry,
            default_topic,
        })
    }

    /// The AzizbekID SDK documentation embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if `default_topic` is unknown.
    pub fn builtin(default_topic: Option<&str>) -> Result<Self, SiteError> {
        Self::from_manifest(BUILTIN_MANIFEST, default_topic, |file| {
            Ok(BUILTIN_PAGES
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, page)| (*page).to_owned()))
        })
    }

    /// Load a site from a directory containing `topics.toml` and markdown pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is missing or invalid, or a page exists
    /// but cannot be read.
    pub fn load_dir(dir: &Path, default_topic: Option<&str>) -> Result<Self, SiteError> {
        let manifest_path = dir.join(MANIFEST_FILENAME);
        let manifest = std::fs::read_to_string(&manifest_path).map_err(|source| SiteError::Io {
            path: manifest_path.clone(),
            source,
        })?;

        Self::from_manifest(&manifest, default_topic, |file| {
            let path = dir.join(file);
            match std::fs::read_to_string(&path) {
                Ok(page) => Ok(Some(page)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(SiteError::Io { path, source }),
            }
        })
    }

    /// Parse a manifest and render each page found by `read_page`.
    fn from_manifest<F>(
        manifest: &str,
        default_topic: Option<&str>,
        read_page: F,
    ) -> Result<Self, SiteError>
    where
        F: Fn(&str) -> Result<Option<String>, SiteError>,
    {
        let manifest: Manifest = toml::from_str(manifest)?;

        let mut entries = Vec::with_capacity(manifest.topics.len());
        let mut fragments = Vec::with_capacity(manifest.topics.len());
        for topic in &manifest.topics {
            let file = topic.file_name();
            if !is_contained_path(&file) {
                return Err(SiteError::UnsafePagePath {
                    topic: topic.id.clone(),
                    file,
                });
            }
            match read_page(&file)? {
                Some(page) => fragments.push((topic.id.clone(), render_markdown(&page))),
                None => {
                    tracing::warn!(topic = %topic.id, file = %file, "Topic page not found");
                }
            }
            entries.push(TopicEntry::new(&topic.id, &topic.title));
        }

        let topics = Topics::new(entries)?;
        tracing::debug!(
            topics = topics.len(),
            pages = fragments.len(),
            "Loaded site content"
        );
        Self::new(topics, fragments.into_iter().collect(), default_topic)
    }

    /// Topics in sidebar order.
    #[must_use]
    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Content fragments.
    #[must_use]
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Topic shown when nothing else is requested.
    #[must_use]
    pub fn default_topic(&self) -> &str {
        &self.default_topic
    }
}

/// Whether `file` is a relative path that cannot climb out of its base.
fn is_contained_path(file: &str) -> bool {
    let path = Path::new(file);
    !file.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_site() {
        let site = SiteContent::builtin(None).unwrap();
        let ids: Vec<&str> = site.topics().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "getting-started",
                "quick-example",
                "api-reference",
                "guides",
                "live-example",
                "migration",
                "faq",
                "changelog",
                "contributing",
                "support",
            ]
        );
        assert_eq!(site.default_topic(), "getting-started");
        assert_eq!(site.registry().len(), 10);
        for topic in site.topics() {
            assert!(
                site.registry().get(&topic.id).is_some(),
                "missing content for {}",
                topic.id
            );
        }
    }

    #[test]
    fn test_builtin_pages_have_copy_controls() {
        let site = SiteContent::builtin(None).unwrap();
        let html = site.registry().get("getting-started").unwrap();
        assert!(html.contains("<h1>Getting Started</h1>"));
        assert!(html.contains("<span class=\"code-block-label\">install.sh</span>"));
        assert!(html.contains("class=\"copy-btn\""));
    }

    #[test]
    fn test_builtin_with_default() {
        let site = SiteContent::builtin(Some("faq")).unwrap();
        assert_eq!(site.default_topic(), "faq");
    }

    #[test]
    fn test_unknown_default_topic() {
        let err = SiteContent::builtin(Some("nope")).unwrap_err();
        assert!(matches!(err, SiteError::UnknownDefaultTopic(ref id) if id == "nope"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILENAME),
            r#"
[[topic]]
id = "a"
title = "Alpha"

[[topic]]
id = "b"
title = "Beta"
file = "beta.md"
"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("a.md"), "# A\n").unwrap();
        std::fs::write(dir.path().join("beta.md"), "# B\n").unwrap();

        let site = SiteContent::load_dir(dir.path(), Some("b")).unwrap();
        assert_eq!(site.topics().len(), 2);
        assert_eq!(site.registry().get("a"), Some("<h1>A</h1>\n"));
        assert_eq!(site.registry().get("b"), Some("<h1>B</h1>\n"));
        assert_eq!(site.default_topic(), "b");
    }

    #[test]
    fn test_load_dir_missing_page_keeps_topic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "[[topic]]\nid = \"ghost\"\ntitle = \"Ghost\"\n",
        )
        .unwrap();

        let site = SiteContent::load_dir(dir.path(), None).unwrap();
        assert!(site.topics().contains("ghost"));
        assert!(site.registry().get("ghost").is_none());
    }

    #[test]
    fn test_load_dir_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteContent::load_dir(dir.path(), None).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }

    #[test]
    fn test_load_dir_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "[[topic]]\nid = \"a\"\ntitle = \"A\"\n\n[[topic]]\nid = \"a\"\ntitle = \"A2\"\n",
        )
        .unwrap();
        let err = SiteContent::load_dir(dir.path(), None).unwrap_err();
        assert!(matches!(err, SiteError::DuplicateTopic(_)));
    }

    #[test]
    fn test_load_dir_rejects_page_outside_content_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("content");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(root.path().join("secret.md"), "# Secret").unwrap();

        for file in ["../secret.md", "/etc/passwd", "pages/../../secret.md"] {
            std::fs::write(
                dir.join(MANIFEST_FILENAME),
                format!("[[topic]]\nid = \"a\"\ntitle = \"Alpha\"\nfile = \"{file}\"\n"),
            )
            .unwrap();

            let err = SiteContent::load_dir(&dir, None).unwrap_err();
            assert!(
                matches!(err, SiteError::UnsafePagePath { file: ref f, .. } if f == file),
                "accepted {file}"
            );
        }
    }

    #[test]
    fn test_contained_paths() {
        assert!(is_contained_path("faq.md"));
        assert!(is_contained_path("guides/oauth.md"));
        assert!(is_contained_path("./faq.md"));
        assert!(!is_contained_path(""));
        assert!(!is_contained_path("../faq.md"));
        assert!(!is_contained_path("/abs/faq.md"));
    }

    #[test]
    fn test_registry_from_iter() {
        let registry: ContentRegistry = [("a".to_owned(), "<h1>A</h1>".to_owned())]
            .into_iter()
            .collect();
        assert_eq!(registry.get("a"), Some("<h1>A</h1>"));
        assert!(registry.get("b").is_none());
    }
}
