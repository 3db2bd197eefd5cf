//! `Text` helper.

use bracket_engine::HelperError;

use super::{Helper, arg, unknown_method};

/// Appended to truncated text.
const ELLIPSIS: &str = "...";

/// Plain-text utilities.
///
/// `truncate(text, length)` shortens `text` to at most `length` characters,
/// ending in `...` when anything was cut.
pub struct TextHelper;

impl Helper for TextHelper {
    fn name(&self) -> &str {
        "Text"
    }

    fn call(&self, method: &str, args: &[&str]) -> Result<String, HelperError> {
        match method {
            "truncate" => {
                let text = arg(self.name(), args, 0)?;
                let length = arg(self.name(), args, 1)?;
                let length = length
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| HelperError::InvalidArgument {
                        helper: self.name().to_owned(),
                        message: format!("length {length:?}: {e}"),
                    })?;
                Ok(truncate(text, length))
            }
            _ => Err(unknown_method(self.name(), method)),
        }
    }
}

fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }
    let keep = length.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&ELLIPSIS[..length.min(ELLIPSIS.len())]);
    out
}
