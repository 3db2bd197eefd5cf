//! The markup engine: a reusable, resettable tag pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::locale::{MessageOverrides, Messages};
use crate::parser::{Syntax, tokenize};
use crate::tag::Display;
use crate::tree::{self, Element, Node};
use crate::{
    EngineConfig, EngineError, Filter, FilterKind, Hook, HookContext, HookKind, Locale,
    OutputAdapter, RenderContext, Resources, Tag, TagDef, TagOutput, escape_html,
};

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|</?[a-zA-Z][^<>]*>").unwrap());

/// Resource file with per-locale message overrides.
const MESSAGES_FILE: &str = "messages.json";

/// Upper bound on strip passes; each pass that changes the text removes at
/// least one tag, so real input settles long before this.
const MAX_STRIP_PASSES: usize = 64;

/// Bracket-tag markup engine.
///
/// An engine is built once, configured with visibility lists, resource paths
/// and extensions, then reused: each call starts with [`Engine::reset`],
/// which clears every piece of per-call state.
///
/// # Example
///
/// ```
/// use bracket_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new("", EngineConfig::default()).unwrap();
/// engine.defaults();
///
/// engine.reset("[b]hello[/b]");
/// assert_eq!(engine.parse().unwrap(), "<b>hello</b>");
///
/// engine.reset("[b]hello[/b]");
/// assert_eq!(engine.strip(false).unwrap(), "hello");
/// ```
pub struct Engine {
    config: EngineConfig,
    input: String,
    call_disabled: bool,
    whitelist: HashSet<String>,
    blacklist: HashSet<String>,
    call_whitelist: HashSet<String>,
    resources: Resources,
    filters: Vec<Box<dyn Filter>>,
    tags: HashMap<&'static str, (&'static TagDef, usize)>,
    hooks: Vec<Box<dyn Hook>>,
    messages: Messages,
    output: Option<Box<dyn OutputAdapter>>,
    started: bool,
    warnings: Vec<String>,
}

impl Engine {
    /// Create an engine with no extensions registered.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if `config` fails validation.
    pub fn new(text: impl Into<String>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            input: text.into(),
            call_disabled: false,
            whitelist: HashSet::new(),
            blacklist: HashSet::new(),
            call_whitelist: HashSet::new(),
            resources: Resources::new(),
            filters: Vec::new(),
            tags: HashMap::new(),
            hooks: Vec::new(),
            messages: Messages::default(),
            output: None,
            started: false,
            warnings: Vec::new(),
        })
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Restrict rendering to the given tags. Repeated calls add to the list.
    pub fn whitelist<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.whitelist, tags);
        self
    }

    /// Never render the given tags. Repeated calls add to the list.
    pub fn blacklist<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.blacklist, tags);
        self
    }

    /// Restrict rendering for the current call only; cleared by [`reset`](Self::reset).
    pub fn call_whitelist<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.call_whitelist, tags);
        self
    }

    /// Register a resource lookup path.
    pub fn add_path(&mut self, path: impl Into<std::path::PathBuf>) -> &mut Self {
        self.resources.add_path(path);
        self.started = false;
        self
    }

    /// Registered resource lookup.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Register a filter, replacing any filter with the same name in place.
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        match self.filters.iter().position(|f| f.name() == filter.name()) {
            Some(index) => self.filters[index] = filter,
            None => self.filters.push(filter),
        }
        self.index_tags();
        self
    }

    /// Register a hook, replacing any hook with the same name in place.
    pub fn add_hook(&mut self, hook: Box<dyn Hook>) -> &mut Self {
        match self.hooks.iter().position(|h| h.name() == hook.name()) {
            Some(index) => self.hooks[index] = hook,
            None => self.hooks.push(hook),
        }
        self.started = false;
        self
    }

    /// Register the default extension set: every built-in filter plus the
    /// `Censor` and `Clickable` hooks.
    pub fn defaults(&mut self) -> &mut Self {
        for kind in FilterKind::DEFAULTS {
            self.add_filter(kind.create());
        }
        for kind in HookKind::DEFAULTS {
            self.add_hook(kind.create());
        }
        self
    }

    /// Names of registered filters, in registration order.
    #[must_use]
    pub fn filters(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Names of registered hooks, in registration order.
    #[must_use]
    pub fn hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Set the locale used for filter messages.
    pub fn set_locale(&mut self, locale: Locale) -> &mut Self {
        self.messages.set_locale(locale);
        self
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.messages.locale()
    }

    /// Install the adapter filters use to call host helpers.
    pub fn set_output_adapter(&mut self, adapter: Box<dyn OutputAdapter>) -> &mut Self {
        self.output = Some(adapter);
        self
    }

    /// Installed output adapter, if any.
    #[must_use]
    pub fn output_adapter(&self) -> Option<&dyn OutputAdapter> {
        self.output.as_deref()
    }

    /// Replace the input and clear per-call state: the disable flag, the
    /// per-call whitelist and warnings.
    pub fn reset(&mut self, text: impl Into<String>) -> &mut Self {
        self.input = text.into();
        self.call_disabled = false;
        self.call_whitelist.clear();
        self.warnings.clear();
        self
    }

    /// Disable markup for the current call.
    pub fn disable(&mut self, disabled: bool) -> &mut Self {
        self.call_disabled = disabled;
        self
    }

    /// Whether markup is disabled by configuration or for this call.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.config.disabled || self.call_disabled
    }

    /// Whether `tag` passes the blacklist and both whitelists.
    #[must_use]
    pub fn is_allowed(&self, tag: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        if self.blacklist.contains(&tag) {
            return false;
        }
        (self.whitelist.is_empty() || self.whitelist.contains(&tag))
            && (self.call_whitelist.is_empty() || self.call_whitelist.contains(&tag))
    }

    /// Warnings recorded by the last parse or strip.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Render the current input to HTML.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Resource` if a hook resource is malformed and
    /// `EngineError::Helper` if a host helper call fails.
    pub fn parse(&mut self) -> Result<String, EngineError> {
        self.startup()?;
        let disabled = self.is_disabled();

        let mut input = collapse_newlines(&self.input, self.config.max_newlines);
        if !disabled {
            for hook in &self.hooks {
                input = hook.before_parse(&input);
            }
        }

        let mut warnings = Vec::new();
        let nodes = self.tree(&input, &mut warnings);

        let html = if disabled {
            let text = self.escape(&flatten(&nodes));
            text.replace('\n', self.config.line_break())
        } else {
            let mut html = self.render_nodes(&nodes, None, false, &mut warnings)?;
            for hook in &self.hooks {
                html = hook.after_parse(&html);
            }
            html
        };

        for warning in &warnings {
            tracing::debug!(warning = %warning, "Markup warning");
        }
        self.warnings = warnings;
        Ok(html)
    }

    /// Remove markup from the current input and return plain text.
    ///
    /// With `also_strip_html`, raw HTML tags and comments embedded in the
    /// input are removed too. Stripping already-stripped text returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Resource` if a hook resource is malformed.
    pub fn strip(&mut self, also_strip_html: bool) -> Result<String, EngineError> {
        self.startup()?;

        let mut warnings = Vec::new();
        let max = self.config.max_newlines;
        let input = collapse_newlines(&self.input, max);
        // Flattening adds newlines for blocks and `br`, so collapse each pass
        let (text, settled) = settle(input, MAX_STRIP_PASSES, |text| {
            collapse_newlines(&self.strip_once(text, also_strip_html, &mut warnings), max)
        });
        if !settled {
            tracing::debug!(
                passes = MAX_STRIP_PASSES,
                len = text.len(),
                "Strip pass limit reached before text settled"
            );
        }

        self.warnings = warnings;
        Ok(text)
    }

    fn strip_once(&self, text: &str, also_strip_html: bool, warnings: &mut Vec<String>) -> String {
        let mut text = text.to_owned();
        for hook in &self.hooks {
            text = hook.before_strip(&text);
        }
        if also_strip_html {
            text = HTML_TAG_RE.replace_all(&text, "").into_owned();
        }

        let nodes = self.tree(&text, warnings);
        let mut text = flatten(&nodes);
        for hook in &self.hooks {
            text = hook.after_strip(&text);
        }
        text
    }

    /// Load hook resources and message overrides once per path set.
    fn startup(&mut self) -> Result<(), EngineError> {
        if self.started {
            return Ok(());
        }
        let overrides: Option<MessageOverrides> = self.resources.load_json(MESSAGES_FILE)?;
        self.messages.set_overrides(overrides.unwrap_or_default());
        for hook in &mut self.hooks {
            hook.startup(&self.resources)?;
        }
        tracing::debug!(
            filters = self.filters.len(),
            hooks = self.hooks.len(),
            paths = self.resources.paths().len(),
            "Engine started"
        );
        self.started = true;
        Ok(())
    }

    fn index_tags(&mut self) {
        self.tags.clear();
        for (index, filter) in self.filters.iter().enumerate() {
            for def in filter.tags() {
                self.tags.insert(def.name, (def, index));
            }
        }
    }

    fn tree(&self, input: &str, warnings: &mut Vec<String>) -> Vec<Node> {
        let syntax = Syntax {
            open: &self.config.open,
            close: &self.config.close,
            strict: self.config.strict_mode,
        };
        let (tokens, token_warnings) = tokenize(input, syntax);
        let (nodes, tree_warnings) = tree::build(tokens, |name| self.tags.get(name).copied());
        warnings.extend(token_warnings);
        warnings.extend(tree_warnings);
        nodes
    }

    fn escape(&self, text: &str) -> String {
        if self.config.escape_html {
            escape_html(text)
        } else {
            text.to_owned()
        }
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        parent: Option<&Element>,
        in_anchor: bool,
        warnings: &mut Vec<String>,
    ) -> Result<String, EngineError> {
        let structural = parent.is_some_and(|p| p.def.structural);
        let block_parent = parent.is_some_and(|p| p.def.display == Display::Block);
        let mut out = String::new();

        for (index, node) in nodes.iter().enumerate() {
            match node {
                Node::Text(text) => {
                    if structural && text.trim().is_empty() {
                        continue;
                    }
                    let mut text = text.as_str();
                    if index > 0 && is_block(&nodes[index - 1]) {
                        text = text.strip_prefix('\n').unwrap_or(text);
                    }
                    if nodes.get(index + 1).is_some_and(is_block) {
                        text = text.strip_suffix('\n').unwrap_or(text);
                    }
                    if block_parent && index == 0 {
                        text = text.trim_start_matches('\n');
                    }
                    if block_parent && index + 1 == nodes.len() {
                        text = text.trim_end_matches('\n');
                    }
                    out.push_str(&self.render_text(text, in_anchor, structural));
                }
                Node::Element(element) => {
                    out.push_str(&self.render_element(element, in_anchor, warnings)?);
                }
            }
        }
        Ok(out)
    }

    fn render_text(&self, text: &str, in_anchor: bool, structural: bool) -> String {
        let ctx = HookContext {
            config: &self.config,
            in_anchor,
        };
        let mut text = self.escape(text);
        for hook in &self.hooks {
            text = hook.content(&text, &ctx);
        }
        if structural {
            text
        } else {
            text.replace('\n', self.config.line_break())
        }
    }

    fn render_element(
        &self,
        element: &Element,
        in_anchor: bool,
        warnings: &mut Vec<String>,
    ) -> Result<String, EngineError> {
        let def = element.def;
        let content = if def.verbatim {
            let text = element.text();
            let text = text.strip_prefix('\n').unwrap_or(&text);
            self.escape(text.strip_suffix('\n').unwrap_or(text))
        } else {
            self.render_nodes(
                &element.children,
                Some(element),
                in_anchor || def.anchor,
                warnings,
            )?
        };

        if !self.is_allowed(def.name) {
            return Ok(content);
        }

        let tag = Tag {
            name: def.name.to_owned(),
            attrs: def.validate_attrs(&element.attrs),
            text: element.text(),
        };
        let ctx = RenderContext {
            config: &self.config,
            messages: &self.messages,
            output: self.output.as_deref(),
        };
        match self.filters[element.filter].render(&tag, &content, &ctx)? {
            TagOutput::Html(html) => Ok(html),
            TagOutput::Skip => {
                warnings.push(format!("{}: rendered as text", element.raw_open));
                Ok(format!(
                    "{}{content}{}",
                    self.escape(&element.raw_open),
                    self.escape(&element.raw_close)
                ))
            }
        }
    }
}

fn extend_lowercase<I, S>(set: &mut HashSet<String>, tags: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    set.extend(tags.into_iter().map(|t| t.as_ref().trim().to_ascii_lowercase()));
}

fn is_block(node: &Node) -> bool {
    matches!(node, Node::Element(e) if e.def.display == Display::Block)
}

/// Plain text of a tree; block elements are separated by a newline.
fn flatten(nodes: &[Node]) -> String {
    let mut out = String::new();
    for (index, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if element.def.self_closing => {
                if element.def.name == "br" {
                    out.push('\n');
                }
            }
            Node::Element(element) => {
                out.push_str(&flatten(&element.children));
                let is_last = index + 1 == nodes.len();
                if element.def.display == Display::Block && !is_last {
                    out.push('\n');
                }
            }
        }
    }
    out
}

/// Apply `pass` until the text stops changing or `limit` passes ran.
///
/// Returns the last text and whether it settled.
fn settle<F>(mut text: String, limit: usize, mut pass: F) -> (String, bool)
where
    F: FnMut(&str) -> String,
{
    for _ in 0..limit {
        let next = pass(&text);
        if next == text {
            return (text, true);
        }
        text = next;
    }
    (text, false)
}

/// Normalize line endings and cap runs of consecutive newlines.
fn collapse_newlines(text: &str, max: usize) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run > max {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(c);
    }
    out
}
