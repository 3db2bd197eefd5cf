//! Font, size, color and heading tags.

use super::{Filter, wrap};
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const FONT_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Text)];
const SIZE_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Number)];
const COLOR_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Color)];

static TAGS: &[TagDef] = &[
    TagDef::inline("font").attributes(FONT_ATTRS),
    TagDef::inline("size").attributes(SIZE_ATTRS),
    TagDef::inline("color").attributes(COLOR_ATTRS),
    TagDef::block("h1"),
    TagDef::block("h2"),
    TagDef::block("h3"),
    TagDef::block("h4"),
    TagDef::block("h5"),
    TagDef::block("h6"),
];

/// Allowed `[size]` range in pixels.
const MIN_SIZE: u32 = 10;
const MAX_SIZE: u32 = 29;

/// Text styling: `[font]`, `[size]`, `[color]` and `[h1]`..`[h6]`.
pub struct TextFilter;

impl Filter for TextFilter {
    fn name(&self) -> &'static str {
        "Text"
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
        let output = match tag.name.as_str() {
            "font" => match tag.default_attr().filter(|f| is_font_family(f)) {
                Some(family) => TagOutput::html(format!(
                    r#"<span style="font-family: '{}', sans-serif">{content}</span>"#,
                    ctx.escape(family)
                )),
                None => TagOutput::Skip,
            },
            "size" => match tag.default_attr().and_then(|s| s.parse::<u32>().ok()) {
                Some(px) if (MIN_SIZE..=MAX_SIZE).contains(&px) => TagOutput::html(format!(
                    r#"<span style="font-size: {px}px">{content}</span>"#
                )),
                _ => TagOutput::Skip,
            },
            "color" => match tag.default_attr() {
                Some(color) => TagOutput::html(format!(
                    r#"<span style="color: {}">{content}</span>"#,
                    ctx.escape(color)
                )),
                None => TagOutput::Skip,
            },
            heading => wrap(heading, content),
        };
        Ok(output)
    }
}

fn is_font_family(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ',' | '-'))
}
