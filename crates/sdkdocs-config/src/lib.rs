//! Configuration management for sdkdocs.
//!
//! Parses `sdkdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.content_dir`
//! - `build.output_dir`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the content directory (manifest + markdown pages).
    pub content_dir: Option<PathBuf>,
    /// Override the default topic id.
    pub default_topic: Option<String>,
    /// Override the static build output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sdkdocs.toml";

/// Directory (next to the config file) holding local state such as preferences.
const PROJECT_DIRNAME: &str = ".sdkdocs";

/// Upper bound for the scroll-spy throttle interval.
const MAX_SCROLL_THROTTLE_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Navigation tuning.
    pub navigation: NavigationConfig,
    /// Theme persistence configuration.
    pub theme: ThemeConfig,
    /// Copy feedback durations.
    pub feedback: FeedbackConfig,
    /// Static build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteConfigRaw {
    title: String,
    default_topic: Option<String>,
    content_dir: Option<String>,
}

impl Default for SiteConfigRaw {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_topic: None,
            content_dir: None,
        }
    }
}

fn default_title() -> String {
    "AzizbekID Documentation".to_owned()
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Site title shown in the page head and header.
    pub title: String,
    /// Topic shown when no recognised hash is present (first topic if `None`).
    pub default_topic: Option<String>,
    /// Directory with `topics.toml` and markdown pages (built-in content if `None`).
    pub content_dir: Option<PathBuf>,
    /// Project directory for local state (`.sdkdocs/`).
    pub project_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_topic: None,
            content_dir: None,
            project_dir: PathBuf::from(PROJECT_DIRNAME),
        }
    }
}

impl SiteConfig {
    /// File holding persisted preferences (`.sdkdocs/preferences.json`).
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.project_dir.join("preferences.json")
    }
}

/// Navigation tuning.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// A topic anchor counts as reached once its top offset is below this value.
    pub scroll_threshold_px: f64,
    /// Minimum interval between scroll-spy evaluations.
    pub scroll_throttle_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 200.0,
            scroll_throttle_ms: 100,
        }
    }
}

impl NavigationConfig {
    /// Scroll-spy throttle interval as a [`Duration`].
    #[must_use]
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }
}

/// Theme persistence configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key the preference is stored under.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme-pref".to_owned(),
        }
    }
}

/// Copy-to-clipboard feedback durations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// How long a copy control shows its acknowledgement label.
    pub copied_label_ms: u64,
    /// How long a toast stays visible.
    pub toast_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            copied_label_ms: 2000,
            toast_ms: 3000,
        }
    }
}

impl FeedbackConfig {
    /// Acknowledgement label duration.
    #[must_use]
    pub fn copied_label(&self) -> Duration {
        Duration::from_millis(self.copied_label_ms)
    }

    /// Toast visibility duration.
    #[must_use]
    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Resolved static build configuration.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory the page snapshots are written to.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.content_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sdkdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.site_resolved.content_dir = Some(content_dir.clone());
        }
        if let Some(default_topic) = &settings.default_topic {
            self.site_resolved.default_topic = Some(default_topic.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            navigation: NavigationConfig::default(),
            theme: ThemeConfig::default(),
            feedback: FeedbackConfig::default(),
            build: BuildConfigRaw::default(),
            site_resolved: SiteConfig {
                project_dir: base.join(PROJECT_DIRNAME),
                ..SiteConfig::default()
            },
            build_resolved: BuildConfig {
                output_dir: base.join("site"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.title, "site.title")?;
        if let Some(default_topic) = &self.site_resolved.default_topic {
            require_non_empty(default_topic, "site.default_topic")?;
        }
        require_non_empty(&self.theme.storage_key, "theme.storage_key")?;
        self.validate_navigation()?;
        self.validate_feedback()?;
        Ok(())
    }

    /// Validate scroll-spy tuning.
    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let threshold = self.navigation.scroll_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "navigation.scroll_threshold_px must be a non-negative number".to_owned(),
            ));
        }
        if self.navigation.scroll_throttle_ms > MAX_SCROLL_THROTTLE_MS {
            return Err(ConfigError::Validation(format!(
                "navigation.scroll_throttle_ms cannot exceed {MAX_SCROLL_THROTTLE_MS}"
            )));
        }
        Ok(())
    }

    /// Validate feedback durations.
    fn validate_feedback(&self) -> Result<(), ConfigError> {
        if self.feedback.copied_label_ms == 0 {
            return Err(ConfigError::Validation(
                "feedback.copied_label_ms must be greater than 0".to_owned(),
            ));
        }
        if self.feedback.toast_ms == 0 {
            return Err(ConfigError::Validation(
                "feedback.toast_ms must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;

        if let Some(ref dir) = self.site.content_dir {
            self.site.content_dir = Some(expand::expand_env(dir, "site.content_dir")?);
        }
        if let Some(ref dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            title: self.site.title.clone(),
            default_topic: self.site.default_topic.clone(),
            content_dir: self.site.content_dir.as_deref().map(|d| config_dir.join(d)),
            project_dir: config_dir.join(PROJECT_DIRNAME),
        };

        self.build_resolved = BuildConfig {
            output_dir: config_dir.join(self.build.output_dir.as_deref().unwrap_or("site")),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.title, "AzizbekID Documentation");
        assert_eq!(config.site_resolved.default_topic, None);
        assert_eq!(config.site_resolved.content_dir, None);
        assert_eq!(
            config.site_resolved.preferences_path(),
            PathBuf::from("/test/.sdkdocs/preferences.json")
        );
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/test/site"));
        assert!((config.navigation.scroll_threshold_px - 200.0).abs() < f64::EPSILON);
        assert_eq!(config.navigation.scroll_throttle(), Duration::from_millis(100));
        assert_eq!(config.theme.storage_key, "theme-pref");
        assert_eq!(config.feedback.copied_label(), Duration::from_secs(2));
        assert_eq!(config.feedback.toast(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme.storage_key, "theme-pref");
        assert_eq!(config.feedback.toast_ms, 3000);
    }

    #[test]
    fn test_parse_navigation_config() {
        let toml = r"
[navigation]
scroll_threshold_px = 120.5
scroll_throttle_ms = 50
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!((config.navigation.scroll_threshold_px - 120.5).abs() < f64::EPSILON);
        assert_eq!(config.navigation.scroll_throttle_ms, 50);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
title = "Auth SDK"
default_topic = "faq"
content_dir = "docs"

[build]
output_dir = "public"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.title, "Auth SDK");
        assert_eq!(config.site_resolved.default_topic.as_deref(), Some("faq"));
        assert_eq!(
            config.site_resolved.content_dir,
            Some(PathBuf::from("/project/docs"))
        );
        assert_eq!(
            config.site_resolved.project_dir,
            PathBuf::from("/project/.sdkdocs")
        );
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_validate_rejects_empty_storage_key() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.theme.storage_key = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("theme.storage_key"));
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.scroll_threshold_px = -1.0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scroll_threshold_px"));
    }

    #[test]
    fn test_validate_rejects_huge_throttle() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.scroll_throttle_ms = 60_000;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scroll_throttle_ms"));
    }

    #[test]
    fn test_validate_rejects_zero_toast() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.feedback.toast_ms = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            content_dir: Some(PathBuf::from("/custom/docs")),
            default_topic: Some("guides".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.site_resolved.content_dir,
            Some(PathBuf::from("/custom/docs"))
        );
        assert_eq!(config.site_resolved.default_topic.as_deref(), Some("guides"));
        // Unchanged
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/test/site"));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/sdkdocs.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\ncontent_dir = \"pages\"\n\n[theme]\nstorage_key = \"docs-theme\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.content_dir, Some(dir.path().join("pages")));
        assert_eq!(config.theme.storage_key, "docs-theme");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_from_file_runs_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[feedback]\ncopied_label_ms = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
