//! Embedded videos from known providers.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const PROVIDERS: &[&str] = &["youtube", "vimeo", "dailymotion"];
const SIZES: &[&str] = &["small", "medium", "large"];

const VIDEO_ATTRS: &[AttrRule] = &[
    AttrRule::new(DEFAULT_ATTR, AttrKind::Choice(PROVIDERS)),
    AttrRule::new("size", AttrKind::Choice(SIZES)),
];
const PROVIDER_ATTRS: &[AttrRule] = &[AttrRule::new("size", AttrKind::Choice(SIZES))];

static TAGS: &[TagDef] = &[
    TagDef::block("video").attributes(VIDEO_ATTRS),
    TagDef::block("youtube").attributes(PROVIDER_ATTRS),
    TagDef::block("vimeo").attributes(PROVIDER_ATTRS),
    TagDef::block("dailymotion").attributes(PROVIDER_ATTRS),
];

/// `[video=youtube]id[/video]`, or the provider as the tag: `[vimeo]id[/vimeo]`.
pub struct VideoFilter;

impl Filter for VideoFilter {
    fn name(&self) -> &'static str {
        "Video"
    }

    fn tags(&self) -> &'static [TagDef] {
        TAGS
    }

    fn render(
        &self,
        tag: &Tag,
        _content: &str,
        _ctx: &RenderContext<'_>,
    ) -> Result<TagOutput, EngineError> {
        let provider = match tag.name.as_str() {
            "video" => tag.default_attr(),
            name => Some(name),
        };
        let id = tag.text.trim();
        let (Some(provider), true) = (provider, is_video_id(id)) else {
            return Ok(TagOutput::Skip);
        };

        let src = match provider {
            "youtube" => format!("https://www.youtube.com/embed/{id}"),
            "vimeo" => format!("https://player.vimeo.com/video/{id}"),
            _ => format!("https://www.dailymotion.com/embed/video/{id}"),
        };
        let (width, height) = match tag.get("size") {
            Some("small") => (560, 315),
            Some("large") => (853, 480),
            _ => (640, 360),
        };

        Ok(TagOutput::html(format!(
            concat!(
                r#"<iframe class="bracket-video bracket-video-{}" src="{}" "#,
                r#"width="{}" height="{}" frameborder="0" allowfullscreen></iframe>"#
            ),
            provider, src, width, height
        )))
    }
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
