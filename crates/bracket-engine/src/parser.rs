//! Tag syntax tokenizer.
//!
//! Splits input into text and tag tokens: `[name]`, `[name=value]`,
//! `[name key="value"]` and `[/name]`, with configurable delimiters.

use std::collections::BTreeMap;

use crate::tag::DEFAULT_ATTR;

/// Token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Plain text between tags.
    Text(String),
    /// Opening tag with raw (unvalidated) attributes.
    Open {
        name: String,
        attrs: BTreeMap<String, String>,
        raw: String,
    },
    /// Closing tag.
    Close { name: String, raw: String },
}

/// Delimiters and quoting policy used while tokenizing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Syntax<'a> {
    pub open: &'a str,
    pub close: &'a str,
    pub strict: bool,
}

/// Why a bracketed span was not accepted as a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    /// Not tag syntax at all (e.g., `[some words]`).
    NotATag,
    /// Tag syntax with an unquoted attribute value in strict mode.
    Unquoted(String),
}

/// Tokenize input into text and tag tokens.
///
/// Returns the tokens and warnings for spans rejected by strict mode.
/// Adjacent text is merged into a single token.
pub(crate) fn tokenize(input: &str, syntax: Syntax<'_>) -> (Vec<Token>, Vec<String>) {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while pos < input.len() {
        let Some(rel_open) = input[pos..].find(syntax.open) else {
            break;
        };
        let mut start = pos + rel_open;
        let inner_start = start + syntax.open.len();
        let Some(rel_close) = input[inner_start..].find(syntax.close) else {
            break;
        };
        let close_at = inner_start + rel_close;

        // `[[b]`: the tag starts at the last opener before the closer
        if let Some(rel_nested) = input[inner_start..close_at].rfind(syntax.open) {
            start = inner_start + rel_nested;
        }
        let inner = &input[start + syntax.open.len()..close_at];
        let end = close_at + syntax.close.len();
        let raw = &input[start..end];

        text.push_str(&input[pos..start]);

        match parse_tag(inner, syntax.strict) {
            Ok(token) => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(match token {
                    ParsedTag::Open { name, attrs } => Token::Open {
                        name,
                        attrs,
                        raw: raw.to_owned(),
                    },
                    ParsedTag::Close { name } => Token::Close {
                        name,
                        raw: raw.to_owned(),
                    },
                });
            }
            Err(rejection) => {
                if let Rejection::Unquoted(attr) = rejection {
                    warnings.push(format!(
                        "{raw}: attribute {attr} must be quoted in strict mode"
                    ));
                }
                text.push_str(raw);
            }
        }

        pos = end;
    }

    text.push_str(&input[pos..]);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }

    (tokens, warnings)
}

enum ParsedTag {
    Open {
        name: String,
        attrs: BTreeMap<String, String>,
    },
    Close {
        name: String,
    },
}

/// Parse the text between delimiters.
fn parse_tag(inner: &str, strict: bool) -> Result<ParsedTag, Rejection> {
    if let Some(name) = inner.strip_prefix('/') {
        let name = name.trim();
        if !is_valid_tag_name(name) {
            return Err(Rejection::NotATag);
        }
        return Ok(ParsedTag::Close {
            name: name.to_ascii_lowercase(),
        });
    }

    let name_end = inner
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    if !is_valid_tag_name(name) {
        return Err(Rejection::NotATag);
    }

    let mut attrs = BTreeMap::new();
    let mut rest = &inner[name_end..];

    // `[tag=value]`: unquoted values are accepted even in strict mode
    if let Some(after_eq) = rest.strip_prefix('=') {
        let (value, remaining) = parse_value(after_eq).ok_or(Rejection::NotATag)?;
        attrs.insert(DEFAULT_ATTR.to_owned(), value.text);
        rest = remaining;
    }

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let key_end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        let Some(after_eq) = rest[key_end..].strip_prefix('=') else {
            return Err(Rejection::NotATag);
        };
        if key.is_empty() {
            return Err(Rejection::NotATag);
        }

        let (value, remaining) = parse_value(after_eq).ok_or(Rejection::NotATag)?;
        if strict && !value.quoted {
            return Err(Rejection::Unquoted(key.to_owned()));
        }
        attrs.insert(key.to_ascii_lowercase(), value.text);
        rest = remaining;
    }

    Ok(ParsedTag::Open {
        name: name.to_ascii_lowercase(),
        attrs,
    })
}

struct Value {
    text: String,
    quoted: bool,
}

/// Parse a quoted or bare attribute value, returning it and the remainder.
fn parse_value(s: &str) -> Option<(Value, &str)> {
    if let Some(quoted) = s.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some((
            Value {
                text: quoted[..end].to_owned(),
                quoted: true,
            },
            &quoted[end + 1..],
        ));
    }

    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((
        Value {
            text: s[..end].to_owned(),
            quoted: false,
        },
        &s[end..],
    ))
}

/// Tag names are ASCII alphanumerics, or a single `*`.
fn is_valid_tag_name(name: &str) -> bool {
    name == "*" || (!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BRACKETS: Syntax<'static> = Syntax {
        open: "[",
        close: "]",
        strict: true,
    };

    fn open(name: &str, attrs: &[(&str, &str)], raw: &str) -> Token {
        Token::Open {
            name: name.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            raw: raw.to_owned(),
        }
    }

    fn close(name: &str) -> Token {
        Token::Close {
            name: name.to_owned(),
            raw: format!("[/{name}]"),
        }
    }

    #[test]
    fn test_simple_tag() {
        let (tokens, warnings) = tokenize("a [b]bold[/b] c", BRACKETS);
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_owned()),
                open("b", &[], "[b]"),
                Token::Text("bold".to_owned()),
                close("b"),
                Token::Text(" c".to_owned()),
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_default_attribute_unquoted() {
        let (tokens, _) = tokenize("[url=http://example.com]x[/url]", BRACKETS);
        assert_eq!(
            tokens[0],
            open(
                "url",
                &[(DEFAULT_ATTR, "http://example.com")],
                "[url=http://example.com]"
            )
        );
    }

    #[test]
    fn test_named_attributes_quoted() {
        let (tokens, _) = tokenize(r#"[quote="Ada" date="2024-01-02"]"#, BRACKETS);
        assert_eq!(
            tokens[0],
            open(
                "quote",
                &[(DEFAULT_ATTR, "Ada"), ("date", "2024-01-02")],
                r#"[quote="Ada" date="2024-01-02"]"#
            )
        );
    }

    #[test]
    fn test_strict_mode_rejects_unquoted_attribute() {
        let (tokens, warnings) = tokenize("[img width=100]a.png[/img]", BRACKETS);
        assert_eq!(tokens[0], Token::Text("[img width=100]a.png".to_owned()));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("width"));
    }

    #[test]
    fn test_lenient_mode_accepts_unquoted_attribute() {
        let syntax = Syntax {
            strict: false,
            ..BRACKETS
        };
        let (tokens, warnings) = tokenize("[img width=100]", syntax);
        assert_eq!(tokens, vec![open("img", &[("width", "100")], "[img width=100]")]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_names_are_lowercased() {
        let (tokens, _) = tokenize("[B]x[/B]", BRACKETS);
        assert_eq!(tokens[0], open("b", &[], "[B]"));
        assert_eq!(
            tokens[2],
            Token::Close {
                name: "b".to_owned(),
                raw: "[/B]".to_owned()
            }
        );
    }

    #[test]
    fn test_non_tag_brackets_are_text() {
        let (tokens, warnings) = tokenize("see [this note] here", BRACKETS);
        assert_eq!(tokens, vec![Token::Text("see [this note] here".to_owned())]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_nested_opener_starts_tag() {
        let (tokens, _) = tokenize("[[b]x", BRACKETS);
        assert_eq!(
            tokens,
            vec![
                Token::Text("[".to_owned()),
                open("b", &[], "[b]"),
                Token::Text("x".to_owned()),
            ]
        );
    }

    #[test]
    fn test_unterminated_bracket_is_text() {
        let (tokens, _) = tokenize("a [b", BRACKETS);
        assert_eq!(tokens, vec![Token::Text("a [b".to_owned())]);
    }

    #[test]
    fn test_list_item_star() {
        let (tokens, _) = tokenize("[*]one[/*]", BRACKETS);
        assert_eq!(tokens[0], open("*", &[], "[*]"));
        assert_eq!(tokens[2], close("*"));
    }

    #[test]
    fn test_custom_delimiters() {
        let syntax = Syntax {
            open: "{{",
            close: "}}",
            strict: true,
        };
        let (tokens, _) = tokenize("{{b}}x{{/b}} [b]", syntax);
        assert_eq!(
            tokens,
            vec![
                open("b", &[], "{{b}}"),
                Token::Text("x".to_owned()),
                Token::Close {
                    name: "b".to_owned(),
                    raw: "{{/b}}".to_owned()
                },
                Token::Text(" [b]".to_owned()),
            ]
        );
    }

    #[test]
    fn test_multibyte_text_preserved() {
        let (tokens, _) = tokenize("héllo [b]wörld[/b] ✓", BRACKETS);
        assert_eq!(tokens[0], Token::Text("héllo ".to_owned()));
        assert_eq!(tokens[2], Token::Text("wörld".to_owned()));
        assert_eq!(tokens[4], Token::Text(" ✓".to_owned()));
    }
}
