//! Code blocks and inline variables.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const CODE_ATTRS: &[AttrRule] = &[
    AttrRule::new(DEFAULT_ATTR, AttrKind::Text),
    AttrRule::new("hl", AttrKind::NumberList),
];

static TAGS: &[TagDef] = &[
    TagDef::block("code").verbatim().attributes(CODE_ATTRS),
    TagDef::inline("var").verbatim(),
];

/// `[code]` blocks (optionally `[code=rust hl="2,3"]`) and `[var]`.
pub struct CodeFilter;

impl Filter for CodeFilter {
    fn name(&self) -> &'static str {
        "Code"
    }

    fn tags(&self) -> &'static [TagDef] {
        TAGS
    }

    fn render(
        &self,
        tag: &Tag,
        content: &str,
        _ctx: &RenderContext<'_>,
    ) -> Result<TagOutput, EngineError> {
        if tag.name == "var" {
            return Ok(TagOutput::html(format!("<var>{content}</var>")));
        }

        let mut class = String::from("bracket-code");
        if let Some(lang) = tag.default_attr() {
            if !is_language(lang) {
                return Ok(TagOutput::Skip);
            }
            class.push_str(" lang-");
            class.push_str(&lang.to_ascii_lowercase());
        }
        let highlight = tag
            .get("hl")
            .map(|lines| format!(r#" data-highlight="{lines}""#))
            .unwrap_or_default();

        Ok(TagOutput::html(format!(
            r#"<pre class="{class}"{highlight}><code>{content}</code></pre>"#
        )))
    }
}

/// Language names such as `rust`, `c++`, `c#` or `objective-c`.
fn is_language(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
}

#[cfg(test)]
mod tests {
    use crate::FilterKind;
    use crate::filter::test_support::render_with;

    #[test]
    fn test_plain_code() {
        assert_eq!(
            render_with(FilterKind::Code, "[code]let x = 1;[/code]"),
            r#"<pre class="bracket-code"><code>let x = 1;</code></pre>"#
        );
    }

    #[test]
    fn test_language_and_highlight() {
        assert_eq!(
            render_with(FilterKind::Code, r#"[code=Rust hl="1,3"]a[/code]"#),
            r#"<pre class="bracket-code lang-rust" data-highlight="1,3"><code>a</code></pre>"#
        );
    }

    #[test]
    fn test_content_is_not_parsed_and_keeps_newlines() {
        assert_eq!(
            render_with(FilterKind::Code, "[code][b]x[/b]\n<y>[/code]"),
            "<pre class=\"bracket-code\"><code>[b]x[/b]\n&lt;y&gt;</code></pre>"
        );
    }

    #[test]
    fn test_invalid_language_is_literal() {
        assert_eq!(
            render_with(FilterKind::Code, r#"[code="a b"]x[/code]"#),
            "[code=&quot;a b&quot;]x[/code]"
        );
    }

    #[test]
    fn test_var() {
        assert_eq!(render_with(FilterKind::Code, "[var]n[/var]"), "<var>n</var>");
    }
}
