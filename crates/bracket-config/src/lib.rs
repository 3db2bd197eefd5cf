//! Configuration for the bracket markup adapter.
//!
//! Parses `bracket.toml` files into partial [`Settings`] and normalizes them
//! into a complete [`Config`] record: every field the caller leaves out takes
//! its default, and the locale is resolved against the host language.
//!
//! ## Environment Variable Expansion
//!
//! Entries of `paths` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Relative paths are resolved against the directory of the config file.
//!
//! ## Example
//!
//! ```
//! use bracket_config::{Config, Settings};
//!
//! let settings: Settings = toml::from_str(r#"
//! locale = "fr-fr"
//! whitelist = ["b", "i"]
//! "#).unwrap();
//!
//! let config = settings.normalize(None);
//! assert_eq!(config.whitelist, vec!["b", "i"]);
//! assert_eq!(config.max_newlines, Config::default().max_newlines);
//! ```

mod expand;
mod locale;

use std::path::{Path, PathBuf};

use bracket_engine::{EngineConfig, Locale};
use serde::Deserialize;

pub use locale::{LOCALE_ALIASES, resolve_locale};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bracket.toml";

/// Locale used when the caller gives none.
const DEFAULT_LOCALE: &str = "en-us";

/// Helpers installed by default.
const DEFAULT_HELPERS: [&str; 3] = ["Time", "Html", "Text"];

/// Output markup flavor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// HTML5 void elements (`<br>`).
    #[default]
    Html,
    /// XHTML void elements (`<br />`).
    Xhtml,
}

/// Caller-supplied settings; every field is optional.
///
/// Sequence fields replace the default sequence when present, they never
/// append to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Opening tag delimiter.
    pub open: Option<String>,
    /// Closing tag delimiter.
    pub close: Option<String>,
    /// Canonical locale (e.g., `de-de`), used when the host locale is unknown.
    pub locale: Option<String>,
    /// Render all markup as plain text.
    pub disabled: Option<bool>,
    /// Replace link text with a short localized label.
    pub shorthand_links: Option<bool>,
    /// HTML or XHTML output.
    pub output_mode: Option<OutputMode>,
    /// Escape HTML in user text.
    pub escape_html: Option<bool>,
    /// Require quoted attribute values.
    pub strict_mode: Option<bool>,
    /// Maximum run of consecutive newlines.
    pub max_newlines: Option<usize>,
    /// Resource lookup paths, highest priority first.
    pub paths: Option<Vec<PathBuf>>,
    /// Tags allowed to render; empty allows all.
    pub whitelist: Option<Vec<String>>,
    /// Tags never rendered.
    pub blacklist: Option<Vec<String>>,
    /// Host helpers the engine may call.
    pub helpers: Option<Vec<String>>,
    /// Filters to install; empty together with `hooks` installs defaults.
    pub filters: Option<Vec<String>>,
    /// Hooks to install; empty together with `filters` installs defaults.
    pub hooks: Option<Vec<String>>,
}

/// Complete configuration record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Opening tag delimiter.
    pub open: String,
    /// Closing tag delimiter.
    pub close: String,
    /// Resolved locale; `None` leaves the engine on its default.
    pub locale: Option<Locale>,
    /// Render all markup as plain text.
    pub disabled: bool,
    /// Replace link text with a short localized label.
    pub shorthand_links: bool,
    /// HTML or XHTML output.
    pub output_mode: OutputMode,
    /// Escape HTML in user text.
    pub escape_html: bool,
    /// Require quoted attribute values.
    pub strict_mode: bool,
    /// Maximum run of consecutive newlines.
    pub max_newlines: usize,
    /// Resource lookup paths, highest priority first.
    pub paths: Vec<PathBuf>,
    /// Tags allowed to render; empty allows all.
    pub whitelist: Vec<String>,
    /// Tags never rendered.
    pub blacklist: Vec<String>,
    /// Host helpers the engine may call.
    pub helpers: Vec<String>,
    /// Filters to install.
    pub filters: Vec<String>,
    /// Hooks to install.
    pub hooks: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open: "[".to_owned(),
            close: "]".to_owned(),
            locale: Some(Locale::EnUs),
            disabled: false,
            shorthand_links: false,
            output_mode: OutputMode::Html,
            escape_html: true,
            strict_mode: true,
            max_newlines: 3,
            paths: Vec::new(),
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            helpers: DEFAULT_HELPERS.iter().map(|h| (*h).to_owned()).collect(),
            filters: Vec::new(),
            hooks: Vec::new(),
        }
    }
}

impl Config {
    /// Engine-facing subset of the record.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            open: self.open.clone(),
            close: self.close.clone(),
            disabled: self.disabled,
            shorthand_links: self.shorthand_links,
            xhtml_output: self.output_mode == OutputMode::Xhtml,
            escape_html: self.escape_html,
            strict_mode: self.strict_mode,
            max_newlines: self.max_newlines,
        }
    }
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
    /// TOML parsing error, including unknown keys and wrongly typed values.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`paths[0]`").
        field: String,
        /// Error message (e.g., "${`ASSETS_DIR`} not set").
        message: String,
    },
}

impl Settings {
    /// Load settings from an explicit file, a discovered `bracket.toml`, or
    /// defaults when neither exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match std::env::current_dir().ok().and_then(|cwd| Self::discover(&cwd)) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Search for `bracket.toml` in `start` and its parents.
    #[must_use]
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` for malformed or unknown fields and
    /// `ConfigError::EnvVar` for unset variables in `paths`.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        settings.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        settings.resolve_paths(config_dir);

        Ok(settings)
    }

    /// Merge with defaults and resolve the locale.
    ///
    /// `host_locale` is the host's language code (e.g., `eng`); it takes
    /// precedence over the `locale` setting when it is a known alias.
    #[must_use]
    pub fn normalize(self, host_locale: Option<&str>) -> Config {
        let defaults = Config::default();
        let explicit = self.locale.as_deref().unwrap_or(DEFAULT_LOCALE);

        Config {
            locale: resolve_locale(host_locale.unwrap_or_default(), explicit),
            open: self.open.unwrap_or(defaults.open),
            close: self.close.unwrap_or(defaults.close),
            disabled: self.disabled.unwrap_or(defaults.disabled),
            shorthand_links: self.shorthand_links.unwrap_or(defaults.shorthand_links),
            output_mode: self.output_mode.unwrap_or(defaults.output_mode),
            escape_html: self.escape_html.unwrap_or(defaults.escape_html),
            strict_mode: self.strict_mode.unwrap_or(defaults.strict_mode),
            max_newlines: self.max_newlines.unwrap_or(defaults.max_newlines),
            paths: self.paths.unwrap_or(defaults.paths),
            whitelist: self.whitelist.unwrap_or(defaults.whitelist),
            blacklist: self.blacklist.unwrap_or(defaults.blacklist),
            helpers: self.helpers.unwrap_or(defaults.helpers),
            filters: self.filters.unwrap_or(defaults.filters),
            hooks: self.hooks.unwrap_or(defaults.hooks),
        }
    }

    /// Expand environment variable references in resource paths.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(paths) = &mut self.paths {
            for (i, path) in paths.iter_mut().enumerate() {
                let expanded = expand::expand_env(&path.to_string_lossy(), &format!("paths[{i}]"))?;
                *path = PathBuf::from(expanded);
            }
        }
        Ok(())
    }

    /// Resolve relative resource paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(paths) = &mut self.paths {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = config_dir.join(&*path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.open, "[");
        assert_eq!(config.close, "]");
        assert_eq!(config.locale, Some(Locale::EnUs));
        assert!(config.escape_html);
        assert!(config.strict_mode);
        assert_eq!(config.max_newlines, 3);
        assert_eq!(config.helpers, vec!["Time", "Html", "Text"]);
        assert!(config.filters.is_empty());
        assert!(config.hooks.is_empty());
    }

    #[test]
    fn test_normalize_empty_is_default() {
        assert_eq!(Settings::default().normalize(None), Config::default());
    }

    #[test]
    fn test_normalize_overrides_field_by_field() {
        let settings = Settings {
            open: Some("{".to_owned()),
            max_newlines: Some(1),
            output_mode: Some(OutputMode::Xhtml),
            ..Settings::default()
        };
        let config = settings.normalize(None);

        assert_eq!(
            config,
            Config {
                open: "{".to_owned(),
                max_newlines: 1,
                output_mode: OutputMode::Xhtml,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_normalize_sequences_replace_defaults() {
        let settings = Settings {
            helpers: Some(vec!["Time".to_owned()]),
            filters: Some(Vec::new()),
            ..Settings::default()
        };
        let config = settings.normalize(None);
        assert_eq!(config.helpers, vec!["Time"]);
        assert!(config.filters.is_empty());
    }

    #[test]
    fn test_normalize_resolves_locale() {
        let settings = Settings {
            locale: Some("fr-fr".to_owned()),
            ..Settings::default()
        };
        assert_eq!(settings.clone().normalize(None).locale, Some(Locale::FrFr));
        assert_eq!(settings.clone().normalize(Some("jpn")).locale, Some(Locale::JaJp));
        assert_eq!(settings.normalize(Some("xyz")).locale, Some(Locale::FrFr));

        let unknown = Settings {
            locale: Some("tlh".to_owned()),
            ..Settings::default()
        };
        assert_eq!(unknown.normalize(None).locale, None);
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_parse_full_settings() {
        let toml = r#"
open = "{"
close = "}"
locale = "de-de"
disabled = false
shorthand_links = true
output_mode = "xhtml"
escape_html = false
strict_mode = false
max_newlines = 2
paths = ["/srv/bracket"]
whitelist = ["b"]
blacklist = ["img"]
helpers = ["Time"]
filters = ["Default", "Url"]
hooks = ["Censor"]
"#;
        let config = toml::from_str::<Settings>(toml).unwrap().normalize(None);
        assert_eq!(config.open, "{");
        assert_eq!(config.locale, Some(Locale::DeDe));
        assert!(config.shorthand_links);
        assert_eq!(config.output_mode, OutputMode::Xhtml);
        assert!(!config.escape_html);
        assert_eq!(config.paths, vec![PathBuf::from("/srv/bracket")]);
        assert_eq!(config.filters, vec!["Default", "Url"]);
        assert_eq!(config.hooks, vec!["Censor"]);
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let result = toml::from_str::<Settings>("escape = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        assert!(toml::from_str::<Settings>("whitelist = \"b\"").is_err());
        assert!(toml::from_str::<Settings>("output_mode = \"pdf\"").is_err());
    }

    #[test]
    fn test_engine_config() {
        let config = Config {
            output_mode: OutputMode::Xhtml,
            max_newlines: 5,
            ..Config::default()
        };
        let engine = config.engine_config();
        assert!(engine.xhtml_output);
        assert_eq!(engine.max_newlines, 5);
        assert_eq!(engine.open, "[");
    }

    #[test]
    fn test_load_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "paths = [\"assets\", \"/abs\", \"${BRACKET_TEST_UNSET_DIR:-fallback}\"]\n",
        )
        .unwrap();

        let settings = Settings::load_from_file(&path).unwrap();
        assert_eq!(
            settings.paths,
            Some(vec![
                dir.path().join("assets"),
                PathBuf::from("/abs"),
                dir.path().join("fallback"),
            ])
        );
    }

    #[test]
    fn test_load_from_file_unset_env_var() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "paths = [\"${BRACKET_TEST_SURELY_UNSET}\"]\n").unwrap();

        let err = Settings::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "paths[0]"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/bracket.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_discover_walks_parents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            Settings::discover(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }
}
