//! Resource file lookup across registered paths.
//!
//! Hooks and the message catalog load optional data files (`emoticons.json`,
//! `censored.txt`, `messages.json`) from the first registered path that
//! contains them. Earlier paths take priority; later paths are fallbacks.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::EngineError;

/// Ordered list of directories searched for resource files.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    paths: Vec<PathBuf>,
}

impl Resources {
    /// Create an empty resource lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lookup path (lower priority than previously added paths).
    pub fn add_path(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    /// Registered lookup paths in priority order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Find the first registered path containing `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.paths
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Read and deserialize a JSON resource.
    ///
    /// Returns `Ok(None)` when no path contains the file.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Resource` if the file exists but cannot be read
    /// or parsed.
    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, EngineError> {
        let Some(path) = self.find(name) else {
            return Ok(None);
        };
        let content = read(&path)?;
        let value = serde_json::from_str(&content).map_err(|e| EngineError::Resource {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded resource");
        Ok(Some(value))
    }

    /// Read a line-based resource, skipping blank lines and `#` comments.
    ///
    /// Returns `Ok(None)` when no path contains the file.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Resource` if the file exists but cannot be read.
    pub fn load_lines(&self, name: &str) -> Result<Option<Vec<String>>, EngineError> {
        let Some(path) = self.find(name) else {
            return Ok(None);
        };
        let content = read(&path)?;
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();
        tracing::debug!(path = %path.display(), "Loaded resource");
        Ok(Some(lines))
    }
}

fn read(path: &Path) -> Result<String, EngineError> {
    std::fs::read_to_string(path).map_err(|e| EngineError::Resource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
