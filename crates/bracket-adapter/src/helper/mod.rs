//! Host rendering helpers exposed to the engine.
//!
//! Filters reach helpers only through [`HostHelpers`], which implements the
//! engine's [`OutputAdapter`] and refuses every helper name outside the
//! configured allowlist.

mod date;
mod html;
mod text;

use bracket_engine::{HelperError, OutputAdapter};

use crate::AdapterError;

pub use date::TimeHelper;
pub use html::HtmlHelper;
pub use text::TextHelper;

/// A named set of host rendering methods.
///
/// # Example
///
/// ```
/// use bracket_adapter::Helper;
/// use bracket_engine::HelperError;
///
/// struct Shout;
///
/// impl Helper for Shout {
///     fn name(&self) -> &str {
///         "Shout"
///     }
///
///     fn call(&self, method: &str, args: &[&str]) -> Result<String, HelperError> {
///         match method {
///             "upper" => Ok(args.concat().to_uppercase()),
///             _ => Err(HelperError::UnknownMethod {
///                 helper: self.name().to_owned(),
///                 method: method.to_owned(),
///             }),
///         }
///     }
/// }
///
/// assert_eq!(Shout.call("upper", &["hi"]).unwrap(), "HI");
/// ```
pub trait Helper: Send {
    /// Name the helper is allowlisted under (e.g., "Time").
    fn name(&self) -> &str;

    /// Invoke `method` with string arguments.
    fn call(&self, method: &str, args: &[&str]) -> Result<String, HelperError>;
}

/// Built-in helpers, available to every builder.
#[must_use]
pub fn builtin_helpers() -> Vec<Box<dyn Helper>> {
    vec![
        Box::new(TimeHelper),
        Box::new(HtmlHelper),
        Box::new(TextHelper),
    ]
}

/// Output adapter backed by an ordered allowlist of host helpers.
pub struct HostHelpers {
    names: Vec<String>,
    helpers: Vec<Box<dyn Helper>>,
}

impl HostHelpers {
    /// Pick the helpers named in `names` from `available`, keeping the order
    /// of `names`.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::UnknownHelper` for a name with no helper in
    /// `available`.
    pub fn select(
        names: &[String],
        mut available: Vec<Box<dyn Helper>>,
    ) -> Result<Self, AdapterError> {
        let mut selected = Self {
            names: Vec::with_capacity(names.len()),
            helpers: Vec::with_capacity(names.len()),
        };

        for name in names {
            if selected.names.contains(name) {
                tracing::debug!(helper = %name, "Duplicate helper name ignored");
                continue;
            }
            let index = available
                .iter()
                .position(|h| h.name() == name)
                .ok_or_else(|| AdapterError::UnknownHelper(name.clone()))?;
            selected.names.push(name.clone());
            selected.helpers.push(available.remove(index));
        }

        Ok(selected)
    }
}

impl OutputAdapter for HostHelpers {
    fn helpers(&self) -> &[String] {
        &self.names
    }

    fn call(&self, helper: &str, method: &str, args: &[&str]) -> Result<String, HelperError> {
        let target = self
            .helpers
            .iter()
            .find(|h| h.name() == helper)
            .ok_or_else(|| HelperError::NotAllowed(helper.to_owned()))?;
        target.call(method, args)
    }
}

/// Positional argument `index`, or an `InvalidArgument` error naming it.
fn arg<'a>(helper: &str, args: &[&'a str], index: usize) -> Result<&'a str, HelperError> {
    args.get(index).copied().ok_or_else(|| HelperError::InvalidArgument {
        helper: helper.to_owned(),
        message: format!("missing argument {index}"),
    })
}

/// `UnknownMethod` error for `helper`.
fn unknown_method(helper: &str, method: &str) -> HelperError {
    HelperError::UnknownMethod {
        helper: helper.to_owned(),
        method: method.to_owned(),
    }
}
