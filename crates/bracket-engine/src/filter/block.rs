//! Layout blocks: alignment, floats, notes and spoilers.

use super::Filter;
use crate::tag::{AttrKind, AttrRule, DEFAULT_ATTR};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const ALIGNMENTS: &[&str] = &["left", "center", "right", "justify"];
const FLOATS: &[&str] = &["left", "right", "none"];

const ALIGN_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Choice(ALIGNMENTS))];
const FLOAT_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Choice(FLOATS))];
const DIV_ATTRS: &[AttrRule] = &[
    AttrRule::new("id", AttrKind::Alpha),
    AttrRule::new("class", AttrKind::Alpha),
];
const SPOILER_ATTRS: &[AttrRule] = &[AttrRule::new(DEFAULT_ATTR, AttrKind::Text)];

static TAGS: &[TagDef] = &[
    TagDef::block("align").attributes(ALIGN_ATTRS),
    TagDef::block("float").attributes(FLOAT_ATTRS),
    TagDef::block("left"),
    TagDef::block("center"),
    TagDef::block("right"),
    TagDef::block("justify"),
    TagDef::inline("hide"),
    TagDef::block("alert"),
    TagDef::block("note"),
    TagDef::block("div").attributes(DIV_ATTRS),
    TagDef::block("spoiler").attributes(SPOILER_ATTRS),
];

/// Block-level layout: `[align]`, `[float]`, `[left]`/`[center]`/`[right]`/
/// `[justify]`, `[hide]`, `[alert]`, `[note]`, `[div]` and `[spoiler]`.
pub struct BlockFilter;

impl Filter for BlockFilter {
    fn name(&self) -> &'static str {
        "Block"
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
            "align" => match tag.default_attr() {
                Some(align) => aligned(align, content),
                None => TagOutput::Skip,
            },
            "float" => match tag.default_attr() {
                Some(side) => TagOutput::html(format!(
                    r#"<div class="float-{side}">{content}</div>"#
                )),
                None => TagOutput::Skip,
            },
            name @ ("left" | "center" | "right" | "justify") => aligned(name, content),
            "hide" => TagOutput::html(format!(
                r#"<span style="display: none">{content}</span>"#
            )),
            "alert" | "note" => TagOutput::html(format!(
                r#"<div class="bracket-{}">{content}</div>"#,
                tag.name
            )),
            "div" => {
                let mut attrs = String::new();
                if let Some(id) = tag.get("id") {
                    attrs.push_str(&format!(r#" id="{id}""#));
                }
                if let Some(class) = tag.get("class") {
                    attrs.push_str(&format!(r#" class="{class}""#));
                }
                TagOutput::html(format!("<div{attrs}>{content}</div>"))
            }
            _ => spoiler(tag, content, ctx),
        };
        Ok(output)
    }
}

fn aligned(align: &str, content: &str) -> TagOutput {
    TagOutput::html(format!(r#"<div class="align-{align}">{content}</div>"#))
}

fn spoiler(tag: &Tag, content: &str, ctx: &RenderContext<'_>) -> TagOutput {
    let label = tag
        .default_attr()
        .map_or_else(|| ctx.message("spoiler"), |title| ctx.escape(title));
    TagOutput::html(format!(
        concat!(
            r#"<div class="bracket-spoiler">"#,
            r#"<button class="bracket-spoiler-button" type="button">{} ({})</button>"#,
            r#"<div class="bracket-spoiler-content" style="display: none">{}</div>"#,
            "</div>"
        ),
        label,
        ctx.escape(&ctx.message("show")),
        content
    ))
}

#[cfg(test)]
mod tests {
    use crate::filter::test_support::render_with;
    use crate::{Engine, EngineConfig, FilterKind, Locale};

    #[test]
    fn test_align() {
        assert_eq!(
            render_with(FilterKind::Block, "[align=center]x[/align]"),
            r#"<div class="align-center">x</div>"#
        );
        assert_eq!(
            render_with(FilterKind::Block, "[align=middle]x[/align]"),
            "[align=middle]x[/align]"
        );
    }

    #[test]
    fn test_alignment_shortcuts() {
        assert_eq!(
            render_with(FilterKind::Block, "[right]x[/right]"),
            r#"<div class="align-right">x</div>"#
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(
            render_with(FilterKind::Block, "[float=left]x[/float]"),
            r#"<div class="float-left">x</div>"#
        );
    }

    #[test]
    fn test_div_attributes() {
        assert_eq!(
            render_with(FilterKind::Block, r#"[div id="main" class="wide"]x[/div]"#),
            r#"<div id="main" class="wide">x</div>"#
        );
    }

    #[test]
    fn test_spoiler_default_label() {
        let html = render_with(FilterKind::Block, "[spoiler]secret[/spoiler]");
        assert!(html.contains("Spoiler (Show)"));
        assert!(html.contains(r#"style="display: none">secret</div>"#));
    }

    #[test]
    fn test_spoiler_localized() {
        let mut engine = Engine::new("[spoiler]x[/spoiler]", EngineConfig::default()).unwrap();
        engine.add_filter(FilterKind::Block.create());
        engine.set_locale(Locale::FrFr);
        let html = engine.parse().unwrap();
        assert!(html.contains("Spoiler (Afficher)"));
    }

    #[test]
    fn test_note_and_alert() {
        assert_eq!(
            render_with(FilterKind::Block, "[note]n[/note]"),
            r#"<div class="bracket-note">n</div>"#
        );
        assert_eq!(
            render_with(FilterKind::Block, "[alert]a[/alert]"),
            r#"<div class="bracket-alert">a</div>"#
        );
    }
}
