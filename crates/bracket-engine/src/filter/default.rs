//! Basic inline formatting.

use super::{Filter, wrap};
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const ABBR_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Text)];

static TAGS: &[TagDef] = &[
    TagDef::inline("b"),
    TagDef::inline("i"),
    TagDef::inline("u"),
    TagDef::inline("s"),
    TagDef::inline("sub"),
    TagDef::inline("sup"),
    TagDef::inline("abbr").attributes(ABBR_ATTRS),
    TagDef::inline("br").self_closing(),
    TagDef::block("hr").self_closing(),
];

/// Bold, italic, underline, strike-through, sub/superscript, `abbr`,
/// `br` and `hr`.
pub struct DefaultFilter;

impl Filter for DefaultFilter {
    fn name(&self) -> &'static str {
        "Default"
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
            "s" => wrap("del", content),
            "abbr" => match tag.default_attr() {
                Some(title) => TagOutput::html(format!(
                    r#"<abbr title="{}">{content}</abbr>"#,
                    ctx.escape(title)
                )),
                None => wrap("abbr", content),
            },
            "br" => TagOutput::html(ctx.line_break()),
            "hr" => TagOutput::html(format!("<hr{}", ctx.void_end())),
            name => wrap(name, content),
        };
        Ok(output)
    }
}
