//! Tag definitions, attribute validation and filter output.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
});
static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$").unwrap());
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.\-]*):").unwrap());

/// Name of the attribute given as `[tag=value]`.
pub const DEFAULT_ATTR: &str = "default";

/// Whether a tag renders inline or as a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    /// Flows with surrounding text.
    Inline,
    /// Starts a new block; surrounding newlines are absorbed.
    Block,
}

/// Accepted shape of an attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrKind {
    /// Any non-empty text.
    Text,
    /// Letters, digits, `-` and `_`.
    Alpha,
    /// Unsigned integer.
    Number,
    /// Comma-separated unsigned integers (e.g., `1,4,5`).
    NumberList,
    /// `http`, `https` or `ftp` URL; scheme-less values get `http://`.
    Url,
    /// E-mail address.
    Email,
    /// `#rgb`, `#rrggbb` or a color keyword.
    Color,
    /// ISO-8601 date or date-time.
    Date,
    /// One of a fixed set of lowercase keywords.
    Choice(&'static [&'static str]),
}

impl AttrKind {
    /// Validate a raw attribute value, returning its normalized form.
    #[must_use]
    pub fn validate(self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match self {
            Self::Text => Some(value.to_owned()),
            Self::Alpha => value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                .then(|| value.to_owned()),
            Self::Number => value.parse::<u32>().ok().map(|n| n.to_string()),
            Self::NumberList => value
                .split(',')
                .all(|n| n.trim().parse::<u32>().is_ok())
                .then(|| value.replace(' ', "")),
            Self::Url => normalize_url(value),
            Self::Email => EMAIL_RE.is_match(value).then(|| value.to_owned()),
            Self::Color => COLOR_RE.is_match(value).then(|| value.to_owned()),
            Self::Date => value
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | 'Z' | '+' | '.'))
                .then(|| value.to_owned()),
            Self::Choice(options) => {
                let lower = value.to_ascii_lowercase();
                options.contains(&lower.as_str()).then_some(lower)
            }
        }
    }
}

/// Normalize a link target.
///
/// Accepts `http`, `https` and `ftp` URLs plus root-relative and fragment
/// links. Values without a scheme are treated as `http://` hosts; any other
/// scheme (e.g., `javascript:`) is rejected.
#[must_use]
pub fn normalize_url(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return None;
    }
    if value.starts_with('/') || value.starts_with('#') {
        return Some(value.to_owned());
    }
    match SCHEME_RE.captures(value) {
        Some(caps) => {
            let scheme = caps[1].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "ftp").then(|| value.to_owned())
        }
        None => Some(format!("http://{value}")),
    }
}

/// Attribute accepted by a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrRule {
    /// Attribute name ([`DEFAULT_ATTR`] for `[tag=value]`).
    pub name: &'static str,
    /// Accepted value shape.
    pub kind: AttrKind,
}

impl AttrRule {
    /// Create an attribute rule.
    #[must_use]
    pub const fn new(name: &'static str, kind: AttrKind) -> Self {
        Self { name, kind }
    }
}

/// Static description of a tag a filter can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagDef {
    /// Lowercase tag name.
    pub name: &'static str,
    /// Inline or block display.
    pub display: Display,
    /// Tag takes no closing tag (`[br]`).
    pub self_closing: bool,
    /// Content is not parsed for nested tags and keeps its newlines.
    pub verbatim: bool,
    /// Whitespace-only text between children is dropped (lists, tables).
    pub structural: bool,
    /// Tag produces a link; hooks must not insert anchors inside it.
    pub anchor: bool,
    /// Tag may omit its closer; the next sibling of the same name or the
    /// parent's closer ends it (`[*]`).
    pub implicit_close: bool,
    /// Tags allowed as the direct parent; empty means any.
    pub parents: &'static [&'static str],
    /// Accepted attributes.
    pub attributes: &'static [AttrRule],
}

impl TagDef {
    /// Inline tag with no attributes.
    #[must_use]
    pub const fn inline(name: &'static str) -> Self {
        Self {
            name,
            display: Display::Inline,
            self_closing: false,
            verbatim: false,
            structural: false,
            anchor: false,
            implicit_close: false,
            parents: &[],
            attributes: &[],
        }
    }

    /// Block tag with no attributes.
    #[must_use]
    pub const fn block(name: &'static str) -> Self {
        let mut def = Self::inline(name);
        def.display = Display::Block;
        def
    }

    /// Mark the tag as taking no closing tag.
    #[must_use]
    pub const fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Mark the tag content as verbatim.
    #[must_use]
    pub const fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    /// Drop whitespace-only text between children.
    #[must_use]
    pub const fn structural(mut self) -> Self {
        self.structural = true;
        self
    }

    /// Mark the tag as producing a link.
    #[must_use]
    pub const fn anchor(mut self) -> Self {
        self.anchor = true;
        self
    }

    /// Allow the closer to be omitted.
    #[must_use]
    pub const fn implicit_close(mut self) -> Self {
        self.implicit_close = true;
        self
    }

    /// Restrict the direct parent.
    #[must_use]
    pub const fn parents(mut self, parents: &'static [&'static str]) -> Self {
        self.parents = parents;
        self
    }

    /// Set the accepted attributes.
    #[must_use]
    pub const fn attributes(mut self, attributes: &'static [AttrRule]) -> Self {
        self.attributes = attributes;
        self
    }

    /// Validate parsed attributes against this definition.
    ///
    /// Unknown attributes and values that fail validation are dropped.
    pub(crate) fn validate_attrs(&self, raw: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut attrs = BTreeMap::new();
        for (key, value) in raw {
            let Some(rule) = self.attributes.iter().find(|rule| rule.name == key) else {
                tracing::debug!(tag = self.name, attr = %key, "Dropping unknown attribute");
                continue;
            };
            match rule.kind.validate(value) {
                Some(valid) => {
                    attrs.insert(key.clone(), valid);
                }
                None => {
                    tracing::debug!(tag = self.name, attr = %key, "Dropping invalid attribute");
                }
            }
        }
        attrs
    }
}

/// A matched tag handed to a filter for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    /// Lowercase tag name.
    pub name: String,
    /// Validated attributes.
    pub attrs: BTreeMap<String, String>,
    /// Plain text of the tag content, unescaped and without markup.
    pub text: String,
}

impl Tag {
    /// Get a validated attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get the `[tag=value]` attribute.
    #[must_use]
    pub fn default_attr(&self) -> Option<&str> {
        self.get(DEFAULT_ATTR)
    }
}

/// Output from a filter rendering a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagOutput {
    /// Rendered HTML replacing the tag and its content.
    Html(String),
    /// Tag cannot be rendered (e.g., invalid URL); emit it as literal text.
    Skip,
}

impl TagOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}
