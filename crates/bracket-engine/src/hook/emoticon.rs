//! Smiley to image substitution.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Hook;
use crate::{EngineError, HookContext, Resources, escape_html};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

/// Resource file mapping emoticon names to their smilies.
const EMOTICONS_FILE: &str = "emoticons.json";

/// Default image directory.
pub const DEFAULT_EMOTICON_PATH: &str = "/bracket/img/emoticon/";

const BUILTIN_EMOTICONS: &[(&str, &[&str])] = &[
    ("happy", &[":)", ":-)", ":happy:"]),
    ("sad", &[":(", ":-(", ":sad:"]),
    ("wink", &[";)", ";-)", ":wink:"]),
    ("laugh", &[":D", ":-D", ":laugh:"]),
    ("tongue", &[":p", ":P", ":-p", ":-P"]),
    ("shock", &[":o", ":O", ":shock:"]),
    ("cool", &["8)", "8-)", ":cool:"]),
    ("cry", &[":'(", ":cry:"]),
    ("angry", &[">:(", ":angry:"]),
    ("love", &["<3", ":love:"]),
];

/// Replaces whitespace-delimited smilies with `<img>` tags.
///
/// Images are served from `{path}{name}.{extension}`.
pub struct EmoticonHook {
    path: String,
    extension: String,
    smilies: HashMap<String, String>,
    escaped: HashMap<String, String>,
}

impl EmoticonHook {
    /// Create a hook serving images from `path` with the given extension.
    #[must_use]
    pub fn new(path: impl Into<String>, extension: impl Into<String>) -> Self {
        let emoticons = BUILTIN_EMOTICONS
            .iter()
            .map(|(name, smilies)| {
                let smilies = smilies.iter().map(|s| (*s).to_owned()).collect();
                ((*name).to_owned(), smilies)
            })
            .collect();
        let mut hook = Self {
            path: path.into(),
            extension: extension.into(),
            smilies: HashMap::new(),
            escaped: HashMap::new(),
        };
        hook.set_emoticons(emoticons);
        hook
    }

    fn set_emoticons(&mut self, emoticons: BTreeMap<String, Vec<String>>) {
        self.smilies = emoticons
            .into_iter()
            .flat_map(|(name, smilies)| smilies.into_iter().map(move |s| (s, name.clone())))
            .collect();
        self.escaped = self
            .smilies
            .iter()
            .map(|(smiley, name)| (escape_html(smiley), name.clone()))
            .collect();
    }

    /// Image directory.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn image(&self, name: &str, smiley: &str, ctx: &HookContext<'_>) -> String {
        format!(
            r#"<img src="{}{name}.{}" alt="{smiley}" class="bracket-emoticon"{}"#,
            self.path,
            self.extension,
            ctx.void_end()
        )
    }
}

impl Default for EmoticonHook {
    fn default() -> Self {
        Self::new(DEFAULT_EMOTICON_PATH, "png")
    }
}

impl Hook for EmoticonHook {
    fn name(&self) -> &'static str {
        "Emoticon"
    }

    fn startup(&mut self, resources: &Resources) -> Result<(), EngineError> {
        let loaded: Option<BTreeMap<String, Vec<String>>> = resources.load_json(EMOTICONS_FILE)?;
        if let Some(emoticons) = loaded {
            tracing::debug!(emoticons = emoticons.len(), "Loaded emoticons");
            self.set_emoticons(emoticons);
        }
        Ok(())
    }

    fn content(&self, text: &str, ctx: &HookContext<'_>) -> String {
        // Text arrives escaped when escaping is on, so match escaped smilies
        let escape = ctx.config().escape_html;
        let smilies = if escape { &self.escaped } else { &self.smilies };
        TOKEN_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let token = &caps[0];
                match smilies.get(token) {
                    Some(name) if escape => self.image(name, token, ctx),
                    Some(name) => self.image(name, &escape_html(token), ctx),
                    None => token.to_owned(),
                }
            })
            .into_owned()
    }
}
