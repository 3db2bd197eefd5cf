//! Block quotes with optional author and date.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const QUOTE_ATTRS: &[AttrRule] = &[
    AttrRule::new(DEFAULT_ATTR, AttrKind::Text),
    AttrRule::new("date", AttrKind::Date),
];

static TAGS: &[TagDef] = &[TagDef::block("quote").attributes(QUOTE_ATTRS)];

/// `[quote="Ada" date="2024-03-01"]...[/quote]`.
///
/// With an output adapter installed the date is formatted by the host's
/// `Time.nice` helper; otherwise it is shown as written.
pub struct QuoteFilter;

impl Filter for QuoteFilter {
    fn name(&self) -> &'static str {
        "Quote"
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
        let mut head = String::new();
        if let Some(author) = tag.default_attr() {
            let by = ctx.format_message("quoteBy", &[("author", author)]);
            head.push_str(&format!(
                r#"<span class="bracket-quote-author">{}</span>"#,
                ctx.escape(&by)
            ));
        }
        if let Some(date) = tag.get("date") {
            let shown = ctx
                .helper("Time", "nice", &[date])?
                .unwrap_or_else(|| ctx.escape(date));
            head.push_str(&format!(
                r#"<span class="bracket-quote-date">{shown}</span>"#
            ));
        }

        let mut html = String::from(r#"<blockquote class="bracket-quote">"#);
        if !head.is_empty() {
            html.push_str(&format!(r#"<div class="bracket-quote-head">{head}</div>"#));
        }
        html.push_str(&format!(
            r#"<div class="bracket-quote-body">{content}</div></blockquote>"#
        ));
        Ok(TagOutput::html(html))
    }
}
