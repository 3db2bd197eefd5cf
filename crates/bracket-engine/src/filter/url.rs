//! Hyperlinks.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR, normalize_url};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const URL_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Url)];

static TAGS: &[TagDef] = &[
    TagDef::inline("url").anchor().attributes(URL_ATTRS),
    TagDef::inline("link").anchor().attributes(URL_ATTRS),
];

/// `[url]https://example.com[/url]` and `[url=https://example.com]text[/url]`.
pub struct UrlFilter;

impl Filter for UrlFilter {
    fn name(&self) -> &'static str {
        "Url"
    }

    fn tags(&self) -> &'static [TagDef] {
        TAGS
    }

    fn render(
        &self,
        tag: &Tag,
        content: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<TagOutput, EngineError> {
        let (href, label) = match tag.default_attr() {
            Some(href) => (href.to_owned(), content.to_owned()),
            None => match normalize_url(&tag.text) {
                Some(href) => (href, content.to_owned()),
                None => return Ok(TagOutput::Skip),
            },
        };

        let label = if ctx.config().shorthand_links {
            ctx.escape(&ctx.message("link"))
        } else {
            label
        };

        Ok(TagOutput::html(format!(
            r#"<a href="{}">{label}</a>"#,
            ctx.escape(&href)
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::filter::test_support::{render_with, render_with_config};
    use crate::{EngineConfig, FilterKind};

    #[test]
    fn test_url_as_content() {
        assert_eq!(
            render_with(FilterKind::Url, "[url]https://example.com[/url]"),
            r#"<a href="https://example.com">https://example.com</a>"#
        );
    }

    #[test]
    fn test_url_as_attribute() {
        assert_eq!(
            render_with(FilterKind::Url, "[url=https://example.com/?a=1&b=2]Home[/url]"),
            r#"<a href="https://example.com/?a=1&amp;b=2">Home</a>"#
        );
    }

    #[test]
    fn test_scheme_less_gets_http() {
        assert_eq!(
            render_with(FilterKind::Url, "[link=example.com]x[/link]"),
            r#"<a href="http://example.com">x</a>"#
        );
    }

    #[test]
    fn test_script_url_is_literal() {
        assert_eq!(
            render_with(FilterKind::Url, "[url]javascript:alert(1)[/url]"),
            "[url]javascript:alert(1)[/url]"
        );
    }

    #[test]
    fn test_shorthand_localized() {
        let config = EngineConfig {
            shorthand_links: true,
            ..EngineConfig::default()
        };
        assert_eq!(
            render_with_config(FilterKind::Url, "[url]https://example.com[/url]", config),
            r#"<a href="https://example.com">link</a>"#
        );
    }
}
