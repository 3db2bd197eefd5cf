//! Output adapter seam between the engine and host rendering helpers.

use crate::HelperError;

/// Gives filters access to host-side rendering helpers.
///
/// The engine only calls helpers through this trait, and an implementation
/// must refuse any helper outside its allowlist with
/// [`HelperError::NotAllowed`].
///
/// # Example
///
/// ```
/// use bracket_engine::{HelperError, OutputAdapter};
///
/// struct Upper {
///     helpers: Vec<String>,
/// }
///
/// impl OutputAdapter for Upper {
///     fn helpers(&self) -> &[String] {
///         &self.helpers
///     }
///
///     fn call(&self, helper: &str, _method: &str, args: &[&str]) -> Result<String, HelperError> {
///         if !self.helpers.iter().any(|h| h == helper) {
///             return Err(HelperError::NotAllowed(helper.to_owned()));
///         }
///         Ok(args.concat().to_uppercase())
///     }
/// }
///
/// let adapter = Upper { helpers: vec!["Text".to_owned()] };
/// assert_eq!(adapter.call("Text", "upper", &["ab"]).unwrap(), "AB");
/// assert!(adapter.call("Time", "nice", &[]).is_err());
/// ```
pub trait OutputAdapter: Send {
    /// Helper names this adapter allows, in registration order.
    fn helpers(&self) -> &[String];

    /// Invoke `method` on `helper` and return its string output.
    fn call(&self, helper: &str, method: &str, args: &[&str]) -> Result<String, HelperError>;
}
