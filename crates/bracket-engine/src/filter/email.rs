//! E-mail links.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const EMAIL_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Email)];

static TAGS: &[TagDef] = &[
    TagDef::inline("email").anchor().attributes(EMAIL_ATTRS),
    TagDef::inline("mail").anchor().attributes(EMAIL_ATTRS),
];

/// `[email]ada@example.com[/email]` and `[email=ada@example.com]Ada[/email]`.
pub struct EmailFilter;

impl Filter for EmailFilter {
    fn name(&self) -> &'static str {
        "Email"
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
        let (address, label) = match tag.default_attr() {
            Some(address) => (address.to_owned(), content.to_owned()),
            None => match AttrKind::Email.validate(&tag.text) {
                Some(address) => {
                    let label = ctx.escape(&address);
                    (address, label)
                }
                None => return Ok(TagOutput::Skip),
            },
        };

        let label = if ctx.config().shorthand_links {
            ctx.escape(&ctx.message("mail"))
        } else {
            label
        };

        Ok(TagOutput::html(format!(
            r#"<a href="mailto:{}">{label}</a>"#,
            ctx.escape(&address)
        )))
    }
}
