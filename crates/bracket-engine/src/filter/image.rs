//! Images.

use std::sync::LazyLock;

use regex::Regex;

use super::Filter;
use crate::tag::{AttrKind, AttrRule, normalize_url};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

static IMAGE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(gif|jpe?g|png|bmp|webp|svg)(\?.*)?$").unwrap());

const IMG_ATTRS: &[AttrRule] = &[
    AttrRule::new("width", AttrKind::Number),
    AttrRule::new("height", AttrKind::Number),
    AttrRule::new("alt", AttrKind::Text),
];

static TAGS: &[TagDef] = &[
    TagDef::inline("img").anchor().attributes(IMG_ATTRS),
    TagDef::inline("image").anchor().attributes(IMG_ATTRS),
];

/// `[img width="200"]https://example.com/a.png[/img]`.
///
/// Only `http(s)` and root-relative sources with an image extension render.
pub struct ImageFilter;

impl Filter for ImageFilter {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn tags(&self) -> &'static [TagDef] {
        TAGS
    }

    fn render(
        &self,
        tag: &Tag,
        _content: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<TagOutput, EngineError> {
        let src = tag.text.trim();
        let is_web = ["http://", "https://", "/"]
            .iter()
            .any(|prefix| src.starts_with(prefix));
        if !is_web || !IMAGE_PATH_RE.is_match(src) {
            return Ok(TagOutput::Skip);
        }
        let Some(src) = normalize_url(src) else {
            return Ok(TagOutput::Skip);
        };

        let mut html = format!(r#"<img src="{}""#, ctx.escape(&src));
        for key in ["width", "height"] {
            if let Some(value) = tag.get(key) {
                html.push_str(&format!(r#" {key}="{value}""#));
            }
        }
        let alt = tag.get("alt").unwrap_or_default();
        html.push_str(&format!(r#" alt="{}""#, ctx.escape(alt)));
        html.push_str(ctx.void_end());

        Ok(TagOutput::html(html))
    }
}
