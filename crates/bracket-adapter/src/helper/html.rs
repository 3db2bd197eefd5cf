//! `Html` helper.

use bracket_engine::{HelperError, escape_html};

use super::{Helper, arg, unknown_method};

/// HTML building primitives.
///
/// - `escape(text)` escapes HTML special characters.
/// - `div(class, content)` wraps already-rendered content in a `div`.
pub struct HtmlHelper;

impl Helper for HtmlHelper {
    fn name(&self) -> &str {
        "Html"
    }

    fn call(&self, method: &str, args: &[&str]) -> Result<String, HelperError> {
        match method {
            "escape" => Ok(escape_html(arg(self.name(), args, 0)?)),
            "div" => {
                let class = arg(self.name(), args, 0)?;
                let content = arg(self.name(), args, 1)?;
                Ok(format!(
                    r#"<div class="{}">{content}</div>"#,
                    escape_html(class)
                ))
            }
            _ => Err(unknown_method(self.name(), method)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            HtmlHelper.call("escape", &[r#"a "b" <c>"#]).unwrap(),
            "a &quot;b&quot; &lt;c&gt;"
        );
    }

    #[test]
    fn test_div_escapes_class_only() {
        assert_eq!(
            HtmlHelper.call("div", &["x\"y", "<b>hi</b>"]).unwrap(),
            r#"<div class="x&quot;y"><b>hi</b></div>"#
        );
    }

    #[test]
    fn test_unknown_method() {
        assert!(matches!(
            HtmlHelper.call("link", &["x"]),
            Err(HelperError::UnknownMethod { .. })
        ));
    }
}
