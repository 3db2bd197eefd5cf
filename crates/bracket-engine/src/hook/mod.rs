//! Hooks: text transformations around parsing and stripping.
//!
//! Hooks run at fixed points of the pipeline:
//!
//! 1. [`Hook::before_parse`] / [`Hook::before_strip`] on the raw input.
//! 2. [`Hook::content`] on every escaped text run while rendering.
//! 3. [`Hook::after_parse`] / [`Hook::after_strip`] on the final output.
//!
//! Hooks registered on an engine run in registration order.

mod censor;
mod clickable;
mod emoticon;

use std::fmt;

pub use censor::CensorHook;
pub use clickable::ClickableHook;
pub use emoticon::{DEFAULT_EMOTICON_PATH, EmoticonHook};

use crate::{EngineError, HookContext, Resources};

/// Transforms text around the tag pipeline.
///
/// Every stage defaults to passing its input through unchanged.
pub trait Hook: Send {
    /// Hook name (e.g., "Censor").
    ///
    /// Registering a hook with the same name replaces the earlier one.
    fn name(&self) -> &str;

    /// Load resources before first use.
    ///
    /// Called once before the first parse or strip, and again after new
    /// resource paths are registered.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Resource` when a resource file is malformed.
    fn startup(&mut self, _resources: &Resources) -> Result<(), EngineError> {
        Ok(())
    }

    /// Transform raw input before tokenizing.
    fn before_parse(&self, content: &str) -> String {
        content.to_owned()
    }

    /// Transform an escaped text run outside verbatim tags.
    fn content(&self, text: &str, _ctx: &HookContext<'_>) -> String {
        text.to_owned()
    }

    /// Transform the rendered HTML.
    fn after_parse(&self, html: &str) -> String {
        html.to_owned()
    }

    /// Transform raw input before markup is stripped.
    fn before_strip(&self, content: &str) -> String {
        content.to_owned()
    }

    /// Transform stripped plain text.
    fn after_strip(&self, content: &str) -> String {
        content.to_owned()
    }
}

/// Built-in hook identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    Censor,
    Clickable,
    Emoticon,
}

impl HookKind {
    /// Hooks installed by [`Engine::defaults`](crate::Engine::defaults).
    pub const DEFAULTS: [Self; 2] = [Self::Censor, Self::Clickable];

    /// Every built-in hook.
    pub const ALL: [Self; 3] = [Self::Censor, Self::Clickable, Self::Emoticon];

    /// Registry name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Censor => "Censor",
            Self::Clickable => "Clickable",
            Self::Emoticon => "Emoticon",
        }
    }

    /// Resolve a registry name.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownHook` if no built-in hook has the name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| EngineError::UnknownHook(name.to_owned()))
    }

    /// Instantiate the hook with its default settings.
    #[must_use]
    pub fn create(self) -> Box<dyn Hook> {
        match self {
            Self::Censor => Box::new(CensorHook::new()),
            Self::Clickable => Box::new(ClickableHook),
            Self::Emoticon => Box::new(EmoticonHook::default()),
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
