//! Adapter for the host framework's DOM value hook.
//!
//! Template frameworks call a single hook with `(value, name, kind, node)`
//! for every binding. [`DomValueHook`] implements that calling convention
//! on top of a [`Sanitizer`], running any hook that was installed before it
//! first.

use std::fmt;
use std::sync::Arc;

use crate::dom::DomNode;
use crate::error::Error;
use crate::sanitizer::{BindingKind, Sanitizer, INNOCUOUS_STRING};
use crate::value::BindingValue;

/// A hook in the host's calling convention.
pub type DomValueFn =
    dyn Fn(BindingValue, &str, &str, Option<&dyn DomNode>) -> BindingValue + Send + Sync;

/// Sanitizes values in the host hook's calling convention.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use binding_guard::dom::memory::MemoryDocument;
/// use binding_guard::{BindingValue, DomValueHook, Sanitizer, INNOCUOUS_STRING};
///
/// let document = Arc::new(MemoryDocument::new());
/// let sanitizer = Sanitizer::builder()
///     .disable_reporting()
///     .build(document.clone(), document.clone())
///     .unwrap();
/// let hook = DomValueHook::new(Arc::new(sanitizer));
///
/// let div = document.create_element("div");
/// let value = hook.sanitize_dom_value("color: red", "style", "attribute", Some(&div));
/// assert_eq!(value, Ok(BindingValue::from(INNOCUOUS_STRING)));
/// ```
pub struct DomValueHook {
    sanitizer: Arc<Sanitizer>,
    previous: Option<Arc<DomValueFn>>,
}

impl DomValueHook {
    /// Creates a hook backed by `sanitizer`.
    pub fn new(sanitizer: Arc<Sanitizer>) -> Self {
        Self {
            sanitizer,
            previous: None,
        }
    }

    /// Creates a hook that first runs `previous`, the hook it replaces, and
    /// sanitizes whatever that returns.
    pub fn chained<F>(sanitizer: Arc<Sanitizer>, previous: F) -> Self
    where
        F: Fn(BindingValue, &str, &str, Option<&dyn DomNode>) -> BindingValue + Send + Sync + 'static,
    {
        Self {
            sanitizer,
            previous: Some(Arc::new(previous)),
        }
    }

    /// Returns the value the host may apply.
    ///
    /// A binding without a target node yields [`INNOCUOUS_STRING`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBindingKind`] if `kind` is neither
    /// `"attribute"` nor `"property"`.
    pub fn sanitize_dom_value(
        &self,
        value: impl Into<BindingValue>,
        name: &str,
        kind: &str,
        node: Option<&dyn DomNode>,
    ) -> Result<BindingValue, Error> {
        let mut value = value.into();
        if let Some(previous) = &self.previous {
            value = previous(value, name, kind, node);
        }

        let kind = kind.parse::<BindingKind>()?;
        Ok(match node {
            Some(node) => self.sanitizer.sanitize(node, name, kind, value),
            None => BindingValue::from(INNOCUOUS_STRING),
        })
    }

    /// Returns the sanitizer behind this hook.
    pub fn sanitizer(&self) -> &Arc<Sanitizer> {
        &self.sanitizer
    }
}

impl fmt::Debug for DomValueHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomValueHook")
            .field("sanitizer", &self.sanitizer)
            .field("chained", &self.previous.is_some())
            .finish()
    }
}
