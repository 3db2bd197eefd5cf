//! Configured render and strip pipeline around the bracket markup engine.
//!
//! A [`MarkupAdapter`] is built once from a normalized
//! [`Config`](bracket_config::Config) and then serves any number of
//! [`render`](MarkupAdapter::render) and [`strip`](MarkupAdapter::strip)
//! calls. Construction applies the visibility policy, resource paths,
//! extensions, locale and host helpers in a fixed order and fails as a whole
//! on any unknown name.
//!
//! # Example
//!
//! ```
//! use bracket_adapter::AdapterBuilder;
//! use bracket_config::Settings;
//!
//! let config = Settings::default().normalize(Some("eng"));
//! let adapter = AdapterBuilder::new(config).build().unwrap();
//!
//! let html = adapter.render("[b]hello[/b]", &[] as &[&str], false).unwrap();
//! assert_eq!(html, r#"<div class="bracket"><b>hello</b></div>"#);
//! assert_eq!(adapter.strip("[b]hello[/b]", false).unwrap(), "hello");
//! ```

mod adapter;
mod builder;
mod error;
mod helper;

pub use adapter::{MarkupAdapter, OUTPUT_CLASS, RenderOutput};
pub use builder::AdapterBuilder;
pub use error::AdapterError;
pub use helper::{Helper, HostHelpers, HtmlHelper, TextHelper, TimeHelper, builtin_helpers};
