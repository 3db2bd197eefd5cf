//! Pipeline construction.

use bracket_config::Config;
use bracket_engine::{
    DEFAULT_EMOTICON_PATH, EmoticonHook, Engine, EngineError, FilterKind, HookKind,
};

use crate::adapter::SetupFn;
use crate::helper::{Helper, HostHelpers, builtin_helpers};
use crate::{AdapterError, MarkupAdapter};

/// Emoticon image extension for the baseline emoticon hook.
const EMOTICON_EXTENSION: &str = "png";

/// Builds a [`MarkupAdapter`] from a normalized [`Config`].
///
/// Construction is all-or-nothing: [`AdapterBuilder::build`] either returns
/// a fully configured adapter or an error, never a partial pipeline.
#[must_use]
pub struct AdapterBuilder {
    config: Config,
    helpers: Vec<Box<dyn Helper>>,
    setup: Option<Box<SetupFn>>,
}

impl AdapterBuilder {
    /// Start from `config` with the built-in helpers available.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            helpers: builtin_helpers(),
            setup: None,
        }
    }

    /// Make `helper` available to the allowlist.
    ///
    /// A helper registered under a built-in name replaces the built-in one.
    pub fn with_helper(mut self, helper: Box<dyn Helper>) -> Self {
        self.helpers.retain(|h| h.name() != helper.name());
        self.helpers.push(helper);
        self
    }

    /// Install a callback that [`MarkupAdapter::before_render`] runs against
    /// the engine, for registrations static configuration cannot express.
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&mut Engine) + Send + Sync + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Construct the engine and wrap it in an adapter.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidConfig` for values the engine rejects,
    /// and `UnknownFilter`, `UnknownHook` or `UnknownHelper` for names with
    /// no implementation.
    pub fn build(self) -> Result<MarkupAdapter, AdapterError> {
        let engine = build_engine(&self.config, self.helpers)?;
        Ok(MarkupAdapter::new(engine, self.config, self.setup))
    }
}

fn build_engine(config: &Config, helpers: Vec<Box<dyn Helper>>) -> Result<Engine, AdapterError> {
    // Resolve every name before touching the engine
    let extensions = resolve_extensions(config)?;
    let output = HostHelpers::select(&config.helpers, helpers)?;

    let mut engine = Engine::new("", config.engine_config()).map_err(|e| match e {
        EngineError::InvalidConfig(message) => AdapterError::InvalidConfig(message),
        other => AdapterError::Engine(other),
    })?;

    // Blacklist after whitelist so it can veto whitelisted tags
    engine.whitelist(&config.whitelist);
    engine.blacklist(&config.blacklist);

    for path in &config.paths {
        engine.add_path(path.clone());
    }

    match extensions {
        None => {
            engine.defaults();
        }
        Some((filters, hooks)) => {
            for filter in filters {
                engine.add_filter(filter.create());
            }
            for hook in hooks {
                engine.add_hook(hook.create());
            }
        }
    }
    engine.add_hook(Box::new(EmoticonHook::new(
        DEFAULT_EMOTICON_PATH,
        EMOTICON_EXTENSION,
    )));

    if let Some(locale) = config.locale {
        engine.set_locale(locale);
    }
    engine.set_output_adapter(Box::new(output));

    tracing::info!(
        filters = ?engine.filters(),
        hooks = ?engine.hooks(),
        locale = %engine.locale(),
        helpers = config.helpers.len(),
        "Built markup pipeline"
    );

    Ok(engine)
}

/// Named extensions, or `None` when both lists are empty and the engine
/// defaults apply.
fn resolve_extensions(
    config: &Config,
) -> Result<Option<(Vec<FilterKind>, Vec<HookKind>)>, AdapterError> {
    if config.filters.is_empty() && config.hooks.is_empty() {
        return Ok(None);
    }
    let filters = config
        .filters
        .iter()
        .map(|name| {
            FilterKind::from_name(name).map_err(|_| AdapterError::UnknownFilter(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let hooks = config
        .hooks
        .iter()
        .map(|name| HookKind::from_name(name).map_err(|_| AdapterError::UnknownHook(name.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some((filters, hooks)))
}

#[cfg(test)]
mod tests {
    use bracket_engine::{HelperError, Locale};
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_defaults_when_no_extensions_named() {
        let engine = build_engine(&Config::default(), builtin_helpers()).unwrap();
        let expected: Vec<&str> = FilterKind::DEFAULTS.iter().map(|k| k.as_str()).collect();
        assert_eq!(engine.filters(), expected);
        assert_eq!(engine.hooks(), ["Censor", "Clickable", "Emoticon"]);
    }

    #[test]
    fn test_named_filters_only() {
        let config = Config {
            filters: names(&["Default"]),
            ..Config::default()
        };
        let engine = build_engine(&config, builtin_helpers()).unwrap();
        assert_eq!(engine.filters(), ["Default"]);
        assert_eq!(engine.hooks(), ["Emoticon"]);
    }

    #[test]
    fn test_named_hooks_only() {
        let config = Config {
            hooks: names(&["Censor"]),
            ..Config::default()
        };
        let engine = build_engine(&config, builtin_helpers()).unwrap();
        assert!(engine.filters().is_empty());
        assert_eq!(engine.hooks(), ["Censor", "Emoticon"]);
    }

    #[test]
    fn test_explicit_emoticon_not_duplicated() {
        let config = Config {
            hooks: names(&["Emoticon", "Clickable"]),
            ..Config::default()
        };
        let engine = build_engine(&config, builtin_helpers()).unwrap();
        assert_eq!(engine.hooks(), ["Emoticon", "Clickable"]);
    }

    #[test]
    fn test_unknown_names_fail() {
        let config = Config {
            filters: names(&["Default", "DoesNotExist"]),
            ..Config::default()
        };
        assert!(matches!(
            build_engine(&config, builtin_helpers()),
            Err(AdapterError::UnknownFilter(name)) if name == "DoesNotExist"
        ));

        let config = Config {
            hooks: names(&["Nope"]),
            ..Config::default()
        };
        assert!(matches!(
            build_engine(&config, builtin_helpers()),
            Err(AdapterError::UnknownHook(name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_engine_range_error_is_invalid_config() {
        let config = Config {
            max_newlines: 0,
            ..Config::default()
        };
        assert!(matches!(
            build_engine(&config, builtin_helpers()),
            Err(AdapterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_locale_applied() {
        let config = Config {
            locale: Some(Locale::SvSe),
            ..Config::default()
        };
        let engine = build_engine(&config, builtin_helpers()).unwrap();
        assert_eq!(engine.locale(), Locale::SvSe);

        let unresolved = Config {
            locale: None,
            ..Config::default()
        };
        let engine = build_engine(&unresolved, builtin_helpers()).unwrap();
        assert_eq!(engine.locale(), Locale::EnUs);
    }

    #[test]
    fn test_output_adapter_installed() {
        let engine = build_engine(&Config::default(), builtin_helpers()).unwrap();
        let output = engine.output_adapter().unwrap();
        assert_eq!(output.helpers(), ["Time", "Html", "Text"]);
    }

    #[test]
    fn test_custom_helper_replaces_builtin() {
        struct FixedTime;

        impl Helper for FixedTime {
            fn name(&self) -> &str {
                "Time"
            }

            fn call(&self, _method: &str, _args: &[&str]) -> Result<String, HelperError> {
                Ok("yesterday".to_owned())
            }
        }

        let builder = AdapterBuilder::new(Config::default()).with_helper(Box::new(FixedTime));
        let engine = build_engine(&builder.config, builder.helpers).unwrap();
        let output = engine.output_adapter().unwrap();
        assert_eq!(output.call("Time", "nice", &["2024-03-01"]).unwrap(), "yesterday");
    }
}
