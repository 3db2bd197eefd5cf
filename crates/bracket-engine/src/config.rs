//! Engine configuration.

use crate::EngineError;

/// Engine-level settings fixed at construction.
///
/// Visibility lists, resource paths and extensions are registered through
/// [`Engine`](crate::Engine) methods instead, since their order matters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Opening tag delimiter.
    pub open: String,
    /// Closing tag delimiter.
    pub close: String,
    /// Render all markup as plain text.
    pub disabled: bool,
    /// Replace link text with a short localized label.
    pub shorthand_links: bool,
    /// Emit XHTML void elements (`<br />`).
    pub xhtml_output: bool,
    /// Escape HTML special characters in user text.
    pub escape_html: bool,
    /// Require quoted attribute values.
    pub strict_mode: bool,
    /// Maximum run of consecutive newlines kept in the output.
    pub max_newlines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            open: "[".to_owned(),
            close: "]".to_owned(),
            disabled: false,
            shorthand_links: false,
            xhtml_output: false,
            escape_html: true,
            strict_mode: true,
            max_newlines: 3,
        }
    }
}

impl EngineConfig {
    /// Check value ranges the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` for empty or identical delimiters
    /// and for a zero newline limit.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(EngineError::InvalidConfig(
                "tag delimiters cannot be empty".to_owned(),
            ));
        }
        if self.open == self.close {
            return Err(EngineError::InvalidConfig(format!(
                "open and close delimiters must differ (both are {:?})",
                self.open
            )));
        }
        if self.max_newlines == 0 {
            return Err(EngineError::InvalidConfig(
                "max_newlines must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Line break element for the configured output mode.
    pub(crate) fn line_break(&self) -> &'static str {
        if self.xhtml_output { "<br />" } else { "<br>" }
    }

    /// Terminator for void elements (`>` or ` />`).
    pub(crate) fn void_end(&self) -> &'static str {
        if self.xhtml_output { " />" } else { ">" }
    }
}
