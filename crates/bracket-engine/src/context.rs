//! Contexts handed to filters and hooks while rendering.

use crate::locale::Messages;
use crate::{EngineConfig, EngineError, Locale, OutputAdapter, escape_html};

/// Context provided to [`Filter::render`](crate::Filter::render).
///
/// Gives filters the output mode, localized messages and, when the host
/// installed one, the [`OutputAdapter`] for helper calls.
pub struct RenderContext<'a> {
    pub(crate) config: &'a EngineConfig,
    pub(crate) messages: &'a Messages,
    pub(crate) output: Option<&'a dyn OutputAdapter>,
}

impl RenderContext<'_> {
    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.messages.locale()
    }

    /// Localized message for `key`.
    #[must_use]
    pub fn message(&self, key: &str) -> String {
        self.messages.get(key)
    }

    /// Localized message with `{name}` placeholders substituted.
    #[must_use]
    pub fn format_message(&self, key: &str, vars: &[(&str, &str)]) -> String {
        self.messages.format(key, vars)
    }

    /// Escape a value for an HTML attribute or text.
    ///
    /// Always escapes, regardless of `escape_html`: attribute values are
    /// never trusted.
    #[must_use]
    pub fn escape(&self, s: &str) -> String {
        escape_html(s)
    }

    /// Line break element for the output mode.
    #[must_use]
    pub fn line_break(&self) -> &'static str {
        self.config.line_break()
    }

    /// Void element terminator for the output mode (`>` or ` />`).
    #[must_use]
    pub fn void_end(&self) -> &'static str {
        self.config.void_end()
    }

    /// Call a host helper through the installed output adapter.
    ///
    /// Returns `Ok(None)` when no adapter is installed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Helper` if the adapter refuses or fails the call.
    pub fn helper(
        &self,
        helper: &str,
        method: &str,
        args: &[&str],
    ) -> Result<Option<String>, EngineError> {
        let Some(output) = self.output else {
            return Ok(None);
        };
        match output.call(helper, method, args) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                tracing::warn!(helper, method, error = %e, "Helper call failed");
                Err(e.into())
            }
        }
    }
}

/// Context provided to [`Hook::content`](crate::Hook::content).
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    pub(crate) config: &'a EngineConfig,
    pub(crate) in_anchor: bool,
}

impl HookContext<'_> {
    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Whether the text sits inside a tag that already renders a link.
    #[must_use]
    pub fn in_anchor(&self) -> bool {
        self.in_anchor
    }

    /// Void element terminator for the output mode.
    #[must_use]
    pub fn void_end(&self) -> &'static str {
        self.config.void_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HelperError;

    struct Refusing {
        helpers: Vec<String>,
    }

    impl OutputAdapter for Refusing {
        fn helpers(&self) -> &[String] {
            &self.helpers
        }

        fn call(&self, helper: &str, _method: &str, _args: &[&str]) -> Result<String, HelperError> {
            Err(HelperError::NotAllowed(helper.to_owned()))
        }
    }

    #[test]
    fn test_helper_without_adapter_is_none() {
        let config = EngineConfig::default();
        let messages = Messages::default();
        let ctx = RenderContext {
            config: &config,
            messages: &messages,
            output: None,
        };
        assert_eq!(ctx.helper("Time", "nice", &["2024-01-01"]).unwrap(), None);
    }

    #[test]
    fn test_helper_error_propagates() {
        let config = EngineConfig::default();
        let messages = Messages::default();
        let adapter = Refusing {
            helpers: Vec::new(),
        };
        let ctx = RenderContext {
            config: &config,
            messages: &messages,
            output: Some(&adapter),
        };
        let err = ctx.helper("Time", "nice", &[]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Helper(HelperError::NotAllowed(_))
        ));
    }

    #[test]
    fn test_escape_ignores_escape_setting() {
        let config = EngineConfig {
            escape_html: false,
            ..EngineConfig::default()
        };
        let messages = Messages::default();
        let ctx = RenderContext {
            config: &config,
            messages: &messages,
            output: None,
        };
        assert_eq!(ctx.escape("\"<x>\""), "&quot;&lt;x&gt;&quot;");
    }
}
