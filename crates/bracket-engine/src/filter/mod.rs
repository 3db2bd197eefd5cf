//! Filters: groups of tags and how they render.
//!
//! A filter declares the tags it owns as static [`TagDef`]s and renders each
//! matched tag given its already-rendered content. Built-in filters are a
//! closed registry ([`FilterKind`]) so that names from configuration resolve
//! at construction time instead of at render time.
//!
//! # Example
//!
//! ```
//! use bracket_engine::{
//!     Engine, EngineConfig, Filter, RenderContext, Tag, TagDef, TagOutput,
//!     EngineError,
//! };
//!
//! struct KbdFilter;
//!
//! static KBD_TAGS: &[TagDef] = &[TagDef::inline("kbd")];
//!
//! impl Filter for KbdFilter {
//!     fn name(&self) -> &str { "Kbd" }
//!
//!     fn tags(&self) -> &'static [TagDef] { KBD_TAGS }
//!
//!     fn render(
//!         &self,
//!         _tag: &Tag,
//!         content: &str,
//!         _ctx: &RenderContext<'_>,
//!     ) -> Result<TagOutput, EngineError> {
//!         Ok(TagOutput::html(format!("<kbd>{content}</kbd>")))
//!     }
//! }
//!
//! let mut engine = Engine::new("Press [kbd]Ctrl+C[/kbd]", EngineConfig::default()).unwrap();
//! engine.add_filter(Box::new(KbdFilter));
//! assert_eq!(engine.parse().unwrap(), "Press <kbd>Ctrl+C</kbd>");
//! ```

mod block;
mod code;
mod default;
mod email;
mod image;
mod list;
mod quote;
mod table;
mod text;
mod url;
mod video;

use std::fmt;

pub use block::BlockFilter;
pub use code::CodeFilter;
pub use default::DefaultFilter;
pub use email::EmailFilter;
pub use image::ImageFilter;
pub use list::ListFilter;
pub use quote::QuoteFilter;
pub use table::TableFilter;
pub use text::TextFilter;
pub use url::UrlFilter;
pub use video::VideoFilter;

use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

/// Renders a group of related tags.
///
/// # Thread Safety
///
/// Filters are `Send` so an engine can move between threads behind a lock;
/// they are never called concurrently.
pub trait Filter: Send {
    /// Filter name (e.g., "Default", "Url").
    ///
    /// Registering a filter with the same name replaces the earlier one.
    fn name(&self) -> &str;

    /// Tags handled by this filter.
    fn tags(&self) -> &'static [TagDef];

    /// Render a matched tag.
    ///
    /// `content` is the rendered (and, if enabled, escaped) tag content.
    /// Return [`TagOutput::Skip`] to emit the tag as literal text.
    fn render(
        &self,
        tag: &Tag,
        content: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<TagOutput, EngineError>;
}

/// Built-in filter identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Default,
    Email,
    Image,
    List,
    Quote,
    Text,
    Url,
    Video,
    Code,
    Table,
    Block,
}

impl FilterKind {
    /// Default filter set, in registration order.
    pub const DEFAULTS: [Self; 11] = [
        Self::Default,
        Self::Email,
        Self::Image,
        Self::List,
        Self::Quote,
        Self::Text,
        Self::Url,
        Self::Video,
        Self::Code,
        Self::Table,
        Self::Block,
    ];

    /// Registry name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Email => "Email",
            Self::Image => "Image",
            Self::List => "List",
            Self::Quote => "Quote",
            Self::Text => "Text",
            Self::Url => "Url",
            Self::Video => "Video",
            Self::Code => "Code",
            Self::Table => "Table",
            Self::Block => "Block",
        }
    }

    /// Resolve a registry name.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownFilter` if no built-in filter has the name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Self::DEFAULTS
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| EngineError::UnknownFilter(name.to_owned()))
    }

    /// Instantiate the filter.
    #[must_use]
    pub fn create(self) -> Box<dyn Filter> {
        match self {
            Self::Default => Box::new(DefaultFilter),
            Self::Email => Box::new(EmailFilter),
            Self::Image => Box::new(ImageFilter),
            Self::List => Box::new(ListFilter),
            Self::Quote => Box::new(QuoteFilter),
            Self::Text => Box::new(TextFilter),
            Self::Url => Box::new(UrlFilter),
            Self::Video => Box::new(VideoFilter),
            Self::Code => Box::new(CodeFilter),
            Self::Table => Box::new(TableFilter),
            Self::Block => Box::new(BlockFilter),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap content in a plain element, e.g. `<b>content</b>`.
pub(crate) fn wrap(element: &str, content: &str) -> TagOutput {
    TagOutput::html(format!("<{element}>{content}</{element}>"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Engine, EngineConfig, FilterKind};

    /// Render `input` with a single filter registered.
    pub(crate) fn render_with(kind: FilterKind, input: &str) -> String {
        render_with_config(kind, input, EngineConfig::default())
    }

    /// Render `input` with a single filter and a custom configuration.
    pub(crate) fn render_with_config(kind: FilterKind, input: &str, config: EngineConfig) -> String {
        let mut engine = Engine::new(input, config).unwrap();
        engine.add_filter(kind.create());
        engine.parse().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trip() {
        for kind in FilterKind::DEFAULTS {
            assert_eq!(FilterKind::from_name(kind.as_str()).unwrap(), kind);
            assert_eq!(kind.create().name(), kind.as_str());
        }
    }

    #[test]
    fn test_from_name_unknown() {
        let err = FilterKind::from_name("DoesNotExist").unwrap_err();
        assert!(matches!(err, EngineError::UnknownFilter(ref n) if n == "DoesNotExist"));
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert!(FilterKind::from_name("url").is_err());
    }

    #[test]
    fn test_tag_names_are_unique_across_defaults() {
        let mut seen = std::collections::HashSet::new();
        for kind in FilterKind::DEFAULTS {
            for def in kind.create().tags() {
                assert!(seen.insert(def.name), "duplicate tag {}", def.name);
            }
        }
    }
}
