//! CLI error types.

use sdkdocs_config::ConfigError;
use sdkdocs_site::{SiteError, StoreError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("Failed to save preference: {0}")]
    Store(#[from] StoreError),

    #[error("Clipboard unavailable")]
    ClipboardUnavailable,

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("{0}")]
    Validation(String),
}
