//! Bracket-tag markup engine.
//!
//! Turns user-authored text with `[b]bold[/b]`-style markup into sanitized
//! HTML, or strips the markup to plain text. The vocabulary is pluggable:
//!
//! - [`Filter`]s own a group of tags and render them (see [`FilterKind`] for
//!   the built-in set).
//! - [`Hook`]s transform text around the pipeline (censoring, automatic
//!   links, emoticons; see [`HookKind`]).
//! - An [`OutputAdapter`] lets filters call host-side rendering helpers.
//!
//! # Architecture
//!
//! Input is tokenized with the configured delimiters, matched into a tag
//! tree, and rendered bottom-up: each tag's content is rendered first and
//! handed to the owning filter. Anything that cannot be matched stays
//! literal text, so the engine never rejects input.
//!
//! An [`Engine`] is long-lived and reusable. Per-call state (input, disable
//! flag, per-call whitelist, warnings) is cleared by [`Engine::reset`].
//!
//! # Example
//!
//! ```
//! use bracket_engine::{Engine, EngineConfig, Locale};
//!
//! let mut engine = Engine::new("", EngineConfig::default()).unwrap();
//! engine.defaults().set_locale(Locale::DeDe);
//!
//! engine.reset("[url]https://example.com[/url]");
//! assert_eq!(
//!     engine.parse().unwrap(),
//!     r#"<a href="https://example.com">https://example.com</a>"#
//! );
//! ```

mod config;
mod context;
mod engine;
mod error;
mod escape;
pub mod filter;
pub mod hook;
mod locale;
mod output;
mod parser;
mod resources;
mod tag;
mod tree;

pub use config::EngineConfig;
pub use context::{HookContext, RenderContext};
pub use engine::Engine;
pub use error::{EngineError, HelperError};
pub use escape::escape_html;
pub use filter::{
    BlockFilter, CodeFilter, DefaultFilter, EmailFilter, Filter, FilterKind, ImageFilter,
    ListFilter, QuoteFilter, TableFilter, TextFilter, UrlFilter, VideoFilter,
};
pub use hook::{CensorHook, ClickableHook, DEFAULT_EMOTICON_PATH, EmoticonHook, Hook, HookKind};
pub use locale::Locale;
pub use output::OutputAdapter;
pub use resources::Resources;
pub use tag::{AttrKind, AttrRule, DEFAULT_ATTR, Display, Tag, TagDef, TagOutput, normalize_url};
