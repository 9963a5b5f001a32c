//! Dynamic binding values and the host's string conversion of them.

use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::trusted::{AnyTrusted, SafetyClass, Trusted, TrustedClass, TypedString};

/// A dynamically computed value offered to a binding.
///
/// Bindings carry whatever the template expression produced, so this enum
/// covers primitives, plain text, branded trusted values and foreign typed
/// strings. The host's falsy-but-present "all" collection gets its own
/// variant because it must not take the falsy short-circuit.
#[derive(Clone)]
pub enum BindingValue {
    /// No value was produced.
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Plain, untrusted text.
    Text(String),
    /// A branded trusted value.
    Trusted(AnyTrusted),
    /// A foreign typed string. Never treated as trusted.
    TypedString(Arc<dyn TypedString>),
    /// The host's legacy "all elements" collection, which is falsy but is
    /// not an empty value.
    AllCollection,
}

impl BindingValue {
    /// Wraps a foreign typed string.
    pub fn typed_string(value: impl TypedString + 'static) -> Self {
        BindingValue::TypedString(Arc::new(value))
    }

    /// Returns `true` for values that clear a binding: undefined, null,
    /// `false`, `0`, `NaN` and the empty string.
    ///
    /// [`BindingValue::AllCollection`] is deliberately not falsy here.
    pub fn is_falsy(&self) -> bool {
        match self {
            BindingValue::Undefined | BindingValue::Null => true,
            BindingValue::Bool(b) => !b,
            BindingValue::Number(n) => *n == 0.0 || n.is_nan(),
            BindingValue::Text(s) => s.is_empty(),
            BindingValue::Trusted(_) | BindingValue::TypedString(_) | BindingValue::AllCollection => {
                false
            }
        }
    }

    /// Returns the branded value, if any.
    pub fn as_trusted(&self) -> Option<&AnyTrusted> {
        match self {
            BindingValue::Trusted(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the string content of text and trusted values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BindingValue::Text(s) => Some(s),
            BindingValue::Trusted(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Reads the content of a value branded as `class`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbrandedAccess`] for anything that is not a branded
    /// value of that class, including foreign typed strings that carry the
    /// same content.
    pub fn unwrap_trusted(&self, class: SafetyClass) -> Result<&str, Error> {
        match self {
            BindingValue::Trusted(t) => t.content_if(class).ok_or(Error::UnbrandedAccess {
                expected: class,
                found: t.class().type_name(),
            }),
            other => Err(Error::UnbrandedAccess {
                expected: class,
                found: other.kind_name(),
            }),
        }
    }

    /// Unwraps typed strings; leaves everything else as plain text using the
    /// host's generic string conversion.
    pub fn to_plain_string(&self) -> String {
        match self {
            BindingValue::Trusted(t) => t.as_str().to_string(),
            BindingValue::TypedString(t) => t.typed_string_value(),
            other => other.coerce_to_string(),
        }
    }

    /// The host's generic string conversion, without unwrapping.
    ///
    /// Trusted values render with their type name so that branded content
    /// is never mistaken for plain text.
    pub fn coerce_to_string(&self) -> String {
        match self {
            BindingValue::Undefined => "undefined".to_string(),
            BindingValue::Null => "null".to_string(),
            BindingValue::Bool(b) => b.to_string(),
            BindingValue::Number(n) => format_number(*n),
            BindingValue::Text(s) => s.clone(),
            BindingValue::Trusted(t) => format!("{:?}", t_debug(t)),
            BindingValue::TypedString(t) => t.typed_string_value(),
            BindingValue::AllCollection => "[object HTMLAllCollection]".to_string(),
        }
    }

    /// A short name for the kind of value, safe to log.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BindingValue::Undefined => "undefined",
            BindingValue::Null => "null",
            BindingValue::Bool(_) => "boolean",
            BindingValue::Number(_) => "number",
            BindingValue::Text(_) => "string",
            BindingValue::Trusted(t) => t.class().type_name(),
            BindingValue::TypedString(_) => "typed string",
            BindingValue::AllCollection => "all collection",
        }
    }
}

struct TrustedDebug<'a>(&'a AnyTrusted);

impl fmt::Debug for TrustedDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            AnyTrusted::Html(v) => v.fmt(f),
            AnyTrusted::Url(v) => v.fmt(f),
            AnyTrusted::ResourceUrl(v) => v.fmt(f),
            AnyTrusted::Script(v) => v.fmt(f),
            AnyTrusted::Style(v) => v.fmt(f),
            AnyTrusted::Constant(v) => v.fmt(f),
        }
    }
}

fn t_debug(t: &AnyTrusted) -> TrustedDebug<'_> {
    TrustedDebug(t)
}

/// Formats a number the way the host prints it: the shortest round-trip
/// digits, positional between `1e-6` and `1e21` and exponential outside.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Also covers -0.
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

impl fmt::Debug for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingValue::Undefined => f.write_str("Undefined"),
            BindingValue::Null => f.write_str("Null"),
            BindingValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            BindingValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            BindingValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            BindingValue::Trusted(t) => f.debug_tuple("Trusted").field(&t_debug(t)).finish(),
            BindingValue::TypedString(t) => f
                .debug_tuple("TypedString")
                .field(&t.typed_string_value())
                .finish(),
            BindingValue::AllCollection => f.write_str("AllCollection"),
        }
    }
}

impl PartialEq for BindingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BindingValue::Undefined, BindingValue::Undefined)
            | (BindingValue::Null, BindingValue::Null)
            | (BindingValue::AllCollection, BindingValue::AllCollection) => true,
            (BindingValue::Bool(a), BindingValue::Bool(b)) => a == b,
            (BindingValue::Number(a), BindingValue::Number(b)) => a == b,
            (BindingValue::Text(a), BindingValue::Text(b)) => a == b,
            (BindingValue::Trusted(a), BindingValue::Trusted(b)) => a == b,
            (BindingValue::TypedString(a), BindingValue::TypedString(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for BindingValue {
    fn from(value: &str) -> Self {
        BindingValue::Text(value.to_string())
    }
}

impl From<String> for BindingValue {
    fn from(value: String) -> Self {
        BindingValue::Text(value)
    }
}

impl From<bool> for BindingValue {
    fn from(value: bool) -> Self {
        BindingValue::Bool(value)
    }
}

impl From<f64> for BindingValue {
    fn from(value: f64) -> Self {
        BindingValue::Number(value)
    }
}

impl From<AnyTrusted> for BindingValue {
    fn from(value: AnyTrusted) -> Self {
        BindingValue::Trusted(value)
    }
}

impl<C: TrustedClass> From<Trusted<C>> for BindingValue {
    fn from(value: Trusted<C>) -> Self {
        BindingValue::Trusted(value.into_any())
    }
}
