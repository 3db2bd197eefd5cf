//! Profanity censoring.

use regex::{Captures, Regex};

use super::Hook;
use crate::{EngineError, Resources};

/// Resource file listing censored words, one per line.
const CENSORED_FILE: &str = "censored.txt";

const BUILTIN_WORDS: &[&str] = &["fuck", "shit", "cunt", "bitch", "asshole", "bastard"];

/// Replaces censored words with asterisks, one per character.
///
/// Matching is case-insensitive and on whole words only, so `class` is
/// left alone when `ass` is censored.
pub struct CensorHook {
    pattern: Option<Regex>,
}

impl CensorHook {
    /// Create a hook using the built-in word list until resources load.
    #[must_use]
    pub fn new() -> Self {
        let words: Vec<String> = BUILTIN_WORDS.iter().map(|w| (*w).to_owned()).collect();
        Self {
            pattern: build_pattern(&words),
        }
    }

    fn censor(&self, content: &str) -> String {
        match &self.pattern {
            Some(re) => re
                .replace_all(content, |caps: &Captures<'_>| "*".repeat(caps[0].chars().count()))
                .into_owned(),
            None => content.to_owned(),
        }
    }
}

impl Default for CensorHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for CensorHook {
    fn name(&self) -> &'static str {
        "Censor"
    }

    fn startup(&mut self, resources: &Resources) -> Result<(), EngineError> {
        if let Some(words) = resources.load_lines(CENSORED_FILE)? {
            tracing::debug!(words = words.len(), "Loaded censored words");
            self.pattern = build_pattern(&words);
        }
        Ok(())
    }

    fn before_parse(&self, content: &str) -> String {
        self.censor(content)
    }

    fn before_strip(&self, content: &str) -> String {
        self.censor(content)
    }
}

fn build_pattern(words: &[String]) -> Option<Regex> {
    if words.is_empty() {
        return None;
    }
    let alternation = words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"(?i)\b(?:{alternation})\b")) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid censor word list, censoring disabled");
            None
        }
    }
}
