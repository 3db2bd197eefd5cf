//! Render and strip sessions over a shared engine.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bracket_config::Config;
use bracket_engine::Engine;

use crate::AdapterError;

/// Host customization run by [`MarkupAdapter::before_render`].
pub(crate) type SetupFn = dyn Fn(&mut Engine) + Send + Sync;

/// Class of the container every rendered fragment is wrapped in.
pub const OUTPUT_CLASS: &str = "bracket";

/// Rendered fragment plus the tags that were rendered as text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Wrapped HTML fragment.
    pub html: String,
    /// Markup the engine left as literal text, one entry per tag.
    pub warnings: Vec<String>,
}

/// A configured markup pipeline.
///
/// Owns one long-lived [`Engine`]. Each call takes the engine lock for the
/// whole reset-then-use sequence, so concurrent calls on a shared adapter
/// never observe each other's input, flags or per-call whitelist.
pub struct MarkupAdapter {
    engine: Mutex<Engine>,
    config: Config,
    setup: Option<Box<SetupFn>>,
}

impl MarkupAdapter {
    pub(crate) fn new(engine: Engine, config: Config, setup: Option<Box<SetupFn>>) -> Self {
        Self {
            engine: Mutex::new(engine),
            config,
            setup,
        }
    }

    /// Configuration the pipeline was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the host setup callback, if any, against the engine.
    pub fn before_render(&self) {
        if let Some(setup) = &self.setup {
            setup(&mut self.lock());
        }
    }

    /// Render `text` to a wrapped HTML fragment.
    ///
    /// `whitelist` narrows the tags allowed for this call only; an empty list
    /// keeps the construction-time policy. With `disable` set, markup is
    /// rendered as escaped text.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Engine` when a resource file is malformed or a
    /// host helper call fails.
    pub fn render<S: AsRef<str>>(
        &self,
        text: &str,
        whitelist: &[S],
        disable: bool,
    ) -> Result<String, AdapterError> {
        self.render_with_warnings(text, whitelist, disable)
            .map(|output| output.html)
    }

    /// Like [`MarkupAdapter::render`], also returning the engine warnings.
    ///
    /// # Errors
    ///
    /// Same as [`MarkupAdapter::render`].
    pub fn render_with_warnings<S: AsRef<str>>(
        &self,
        text: &str,
        whitelist: &[S],
        disable: bool,
    ) -> Result<RenderOutput, AdapterError> {
        let mut engine = self.lock();
        engine
            .reset(text)
            .disable(disable)
            .call_whitelist(whitelist.iter().map(AsRef::as_ref));
        let html = engine.parse()?;

        tracing::debug!(
            input_len = text.len(),
            output_len = html.len(),
            warnings = engine.warnings().len(),
            "Rendered markup"
        );

        Ok(RenderOutput {
            html: wrap(&html),
            warnings: engine.warnings().to_vec(),
        })
    }

    /// Remove markup from `text`, and raw HTML too when `also_strip_html`
    /// is set.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Engine` when a resource file is malformed.
    pub fn strip(&self, text: &str, also_strip_html: bool) -> Result<String, AdapterError> {
        let mut engine = self.lock();
        engine.reset(text);
        Ok(engine.strip(also_strip_html)?)
    }

    /// Names of the installed filters.
    #[must_use]
    pub fn filters(&self) -> Vec<String> {
        self.lock().filters().into_iter().map(str::to_owned).collect()
    }

    /// Names of the installed hooks.
    #[must_use]
    pub fn hooks(&self) -> Vec<String> {
        self.lock().hooks().into_iter().map(str::to_owned).collect()
    }

    // Every call resets the engine first, so state left by a panicked call
    // is never observed.
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn wrap(html: &str) -> String {
    format!(r#"<div class="{OUTPUT_CLASS}">{html}</div>"#)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AdapterBuilder;

    const NO_TAGS: &[&str] = &[];

    fn adapter() -> MarkupAdapter {
        AdapterBuilder::new(Config::default()).build().unwrap()
    }

    #[test]
    fn test_render_wraps_output() {
        assert_eq!(
            adapter().render("[b]hi[/b]", NO_TAGS, false).unwrap(),
            r#"<div class="bracket"><b>hi</b></div>"#
        );
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(
            adapter().render("", NO_TAGS, false).unwrap(),
            r#"<div class="bracket"></div>"#
        );
    }

    #[test]
    fn test_disable_is_per_call() {
        let adapter = adapter();
        assert_eq!(
            adapter.render("[b]x[/b]", NO_TAGS, true).unwrap(),
            r#"<div class="bracket">x</div>"#
        );
        assert_eq!(
            adapter.render("[b]x[/b]", NO_TAGS, false).unwrap(),
            r#"<div class="bracket"><b>x</b></div>"#
        );
    }

    #[test]
    fn test_call_whitelist_is_per_call() {
        let adapter = adapter();
        assert_eq!(
            adapter.render("[b]x[/b][i]y[/i]", &["i"], false).unwrap(),
            r#"<div class="bracket">x<i>y</i></div>"#
        );
        assert_eq!(
            adapter.render("[b]x[/b]", NO_TAGS, false).unwrap(),
            r#"<div class="bracket"><b>x</b></div>"#
        );
    }

    #[test]
    fn test_render_with_warnings() {
        let adapter = adapter();
        let output = adapter.render_with_warnings("[b]x", NO_TAGS, false).unwrap();
        assert_eq!(output.html, r#"<div class="bracket">[b]x</div>"#);
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("missing closing tag"));

        let clean = adapter.render_with_warnings("[b]x[/b]", NO_TAGS, false).unwrap();
        assert!(clean.warnings.is_empty());
    }

    #[test]
    fn test_strip() {
        assert_eq!(adapter().strip("[b]hi[/b] <i>there</i>", false).unwrap(), "hi <i>there</i>");
        assert_eq!(adapter().strip("[b]hi[/b] <i>there</i>", true).unwrap(), "hi there");
    }

    #[test]
    fn test_before_render_runs_setup() {
        let adapter = AdapterBuilder::new(Config {
            filters: vec!["Default".to_owned()],
            ..Config::default()
        })
        .with_setup(|engine| {
            engine.add_filter(bracket_engine::FilterKind::Url.create());
        })
        .build()
        .unwrap();

        assert_eq!(adapter.filters(), ["Default"]);
        adapter.before_render();
        assert_eq!(adapter.filters(), ["Default", "Url"]);
        // Registering by name again replaces in place
        adapter.before_render();
        assert_eq!(adapter.filters(), ["Default", "Url"]);
    }

    #[test]
    fn test_before_render_without_setup_is_noop() {
        let adapter = adapter();
        let filters = adapter.filters();
        adapter.before_render();
        assert_eq!(adapter.filters(), filters);
    }

    #[test]
    fn test_adapter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkupAdapter>();
    }
}
