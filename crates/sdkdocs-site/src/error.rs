//! Site loading errors.

use std::path::PathBuf;

/// Error building the topic list or content registry.
///
/// Only load time can fail. Once a [`SiteContent`](crate::SiteContent)
/// exists, navigation and rendering degrade instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Reading the manifest or a page failed.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// `topics.toml` is not valid.
    #[error("Invalid topic manifest: {0}")]
    Manifest(#[from] toml::de::Error),
    /// A manifest `file` points outside the content directory.
    #[error("Topic '{topic}' page path '{file}' must stay inside the content directory")]
    UnsafePagePath {
        /// Topic declaring the file.
        topic: String,
        /// Offending path.
        file: String,
    },
    /// A topic id was declared twice.
    #[error("Duplicate topic id: {0}")]
    DuplicateTopic(String),
    /// A topic id was empty.
    #[error("Topic id cannot be empty")]
    EmptyTopicId,
    /// The manifest lists no topics.
    #[error("Site has no topics")]
    EmptySite,
    /// The configured default topic is not in the list.
    #[error("Default topic '{0}' is not in the topic list")]
    UnknownDefaultTopic(String),
}
