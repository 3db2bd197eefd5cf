//! Ordered and unordered lists.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const LIST_STYLES: &[&str] = &[
    "disc",
    "circle",
    "square",
    "decimal",
    "decimal-leading-zero",
    "lower-roman",
    "upper-roman",
    "lower-greek",
    "lower-alpha",
    "upper-alpha",
    "lower-latin",
    "upper-latin",
];

const LIST_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Choice(LIST_STYLES))];

const LIST_PARENTS: &[&str] = &["list", "olist", "ol", "ul"];

static TAGS: &[TagDef] = &[
    TagDef::block("list").structural().attributes(LIST_ATTRS),
    TagDef::block("olist").structural(),
    TagDef::block("ol").structural(),
    TagDef::block("ul").structural(),
    TagDef::block("li").parents(LIST_PARENTS),
    TagDef::block("*").parents(LIST_PARENTS).implicit_close(),
];

/// `[list]`, `[olist]`/`[ol]`, `[ul]` with `[li]` or `[*]` items.
pub struct ListFilter;

impl Filter for ListFilter {
    fn name(&self) -> &'static str {
        "List"
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
        let html = match tag.name.as_str() {
            "list" => match tag.default_attr() {
                Some(style) => format!(
                    r#"<ul class="bracket-list" style="list-style-type: {style}">{content}</ul>"#
                ),
                None => format!(r#"<ul class="bracket-list">{content}</ul>"#),
            },
            "olist" | "ol" => format!(r#"<ol class="bracket-olist">{content}</ol>"#),
            "ul" => format!("<ul>{content}</ul>"),
            _ => format!("<li>{content}</li>"),
        };
        Ok(TagOutput::html(html))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::FilterKind;
    use crate::filter::test_support::render_with;

    #[test]
    fn test_list_items() {
        assert_eq!(
            render_with(FilterKind::List, "[list]\n[li]One[/li]\n[li]Two[/li]\n[/list]"),
            r#"<ul class="bracket-list"><li>One</li><li>Two</li></ul>"#
        );
    }

    #[test]
    fn test_star_items() {
        assert_eq!(
            render_with(FilterKind::List, "[olist][*]One[*]Two[/olist]"),
            r#"<ol class="bracket-olist"><li>One</li><li>Two</li></ol>"#
        );
    }

    #[test]
    fn test_list_style() {
        assert_eq!(
            render_with(FilterKind::List, "[list=square][li]x[/li][/list]"),
            r#"<ul class="bracket-list" style="list-style-type: square"><li>x</li></ul>"#
        );
    }

    #[test]
    fn test_item_outside_list_is_literal() {
        assert_eq!(render_with(FilterKind::List, "[li]x[/li]"), "[li]x[/li]");
    }
}
