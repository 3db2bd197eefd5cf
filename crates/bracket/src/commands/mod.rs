//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod strip;

use std::io::Read;
use std::path::{Path, PathBuf};

use bracket_adapter::{AdapterBuilder, MarkupAdapter};
use bracket_config::Settings;
use clap::Args;

use crate::error::CliError;

pub(crate) use render::RenderArgs;
pub(crate) use strip::StripArgs;

/// Input and configuration arguments shared by every command.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Input file (default: read stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover bracket.toml).
    #[arg(short, long, env = "BRACKET_CONFIG")]
    config: Option<PathBuf>,

    /// Host language code used to pick the locale (e.g., eng, deu).
    #[arg(long)]
    locale: Option<String>,
}

impl SourceArgs {
    /// Build the adapter described by the configuration.
    pub(crate) fn adapter(&self) -> Result<MarkupAdapter, CliError> {
        let settings = Settings::load(self.config.as_deref())?;
        let config = settings.normalize(self.locale.as_deref());
        Ok(AdapterBuilder::new(config).build()?)
    }

    /// Read the input file, or stdin when none was given.
    pub(crate) fn read_input(&self) -> Result<String, CliError> {
        match &self.file {
            Some(path) => read_file(path),
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(file: Option<PathBuf>, config: Option<PathBuf>) -> SourceArgs {
        SourceArgs {
            file,
            config,
            locale: None,
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.txt");
        std::fs::write(&path, "[b]hi[/b]").unwrap();

        assert_eq!(args(Some(path), None).read_input().unwrap(), "[b]hi[/b]");
    }

    #[test]
    fn test_missing_input_names_file() {
        let err = args(Some(PathBuf::from("/nonexistent/post.txt")), None)
            .read_input()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/post.txt"));
    }

    #[test]
    fn test_adapter_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bracket.toml");
        std::fs::write(&path, "filters = [\"Default\"]\n").unwrap();

        let adapter = args(None, Some(path)).adapter().unwrap();
        assert_eq!(adapter.filters(), ["Default"]);
    }

    #[test]
    fn test_adapter_unknown_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bracket.toml");
        std::fs::write(&path, "filters = [\"DoesNotExist\"]\n").unwrap();

        let err = args(None, Some(path)).adapter().err().unwrap();
        assert_eq!(err.to_string(), "Unknown filter: DoesNotExist");
    }

    #[test]
    fn test_adapter_missing_config() {
        let err = args(None, Some(PathBuf::from("/nonexistent/bracket.toml")))
            .adapter()
            .err()
            .unwrap();
        assert!(matches!(err, CliError::Config(_)));
    }
}
