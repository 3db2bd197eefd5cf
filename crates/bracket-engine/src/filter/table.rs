//! Tables.

use super::Filter;
use crate::tag::{AttrKind, AttrRule};
use crate::{EngineError, RenderContext, Tag, TagDef, TagOutput};

const CELL_ATTRS: &[AttrRule] = &[
    AttrRule::new("colspan", AttrKind::Number),
    AttrRule::new("rowspan", AttrKind::Number),
];

const SECTION_PARENTS: &[&str] = &["table"];
const ROW_PARENTS: &[&str] = &["table", "thead", "tbody", "tfoot"];
const CELL_PARENTS: &[&str] = &["tr", "row"];

static TAGS: &[TagDef] = &[
    TagDef::block("table").structural(),
    TagDef::block("thead").structural().parents(SECTION_PARENTS),
    TagDef::block("tbody").structural().parents(SECTION_PARENTS),
    TagDef::block("tfoot").structural().parents(SECTION_PARENTS),
    TagDef::block("tr").structural().parents(ROW_PARENTS),
    TagDef::block("row").structural().parents(ROW_PARENTS),
    TagDef::block("td").parents(CELL_PARENTS).attributes(CELL_ATTRS),
    TagDef::block("col").parents(CELL_PARENTS).attributes(CELL_ATTRS),
    TagDef::block("th").parents(CELL_PARENTS).attributes(CELL_ATTRS),
];

/// `[table]` with `[thead]`/`[tbody]`/`[tfoot]`, `[tr]`/`[row]` and
/// `[td]`/`[col]`/`[th]` cells.
pub struct TableFilter;

impl Filter for TableFilter {
    fn name(&self) -> &'static str {
        "Table"
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
            "table" => format!(r#"<table class="bracket-table">{content}</table>"#),
            "row" | "tr" => format!("<tr>{content}</tr>"),
            section @ ("thead" | "tbody" | "tfoot") => {
                format!("<{section}>{content}</{section}>")
            }
            cell => {
                let element = if cell == "th" { "th" } else { "td" };
                let mut attrs = String::new();
                for key in ["colspan", "rowspan"] {
                    if let Some(span) = tag.get(key) {
                        attrs.push_str(&format!(r#" {key}="{span}""#));
                    }
                }
                format!("<{element}{attrs}>{content}</{element}>")
            }
        };
        Ok(TagOutput::html(html))
    }
}
