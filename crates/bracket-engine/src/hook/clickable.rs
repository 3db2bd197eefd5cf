//! Automatic links for bare URLs and e-mail addresses.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Hook;
use crate::HookContext;

// Text is already escaped, so `&amp;` is the only entity a URL can contain.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?P<url>(?:https?|ftp)://(?:[^\s&<>]|&amp;)+)",
        r"|\b(?P<email>[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,})\b"
    ))
    .unwrap()
});

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '\''];

/// Turns bare `http(s)://` URLs and e-mail addresses into anchors.
///
/// Text inside link tags (`[url]`, `[email]`, `[img]`) is left alone.
pub struct ClickableHook;

impl Hook for ClickableHook {
    fn name(&self) -> &'static str {
        "Clickable"
    }

    fn content(&self, text: &str, ctx: &HookContext<'_>) -> String {
        if ctx.in_anchor() {
            return text.to_owned();
        }
        LINK_RE
            .replace_all(text, |caps: &Captures<'_>| {
                if let Some(email) = caps.name("email") {
                    let email = email.as_str();
                    return format!(r#"<a href="mailto:{email}">{email}</a>"#);
                }
                let matched = &caps[0];
                let url = matched.trim_end_matches(TRAILING_PUNCTUATION);
                let rest = &matched[url.len()..];
                format!(r#"<a href="{url}">{url}</a>{rest}"#)
            })
            .into_owned()
    }
}
