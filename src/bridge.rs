//! Safe-type bridges.
//!
//! A bridge is asked "is this value already known to be safe as `ty`?" and
//! answers with the unwrapped string, or `None` when it cannot prove it.
//! Returning `None` lets the engine tell "proved safe" apart from "apply
//! local policy"; a bridge must never substitute its own default.

use std::fmt;

use crate::strings::html_escape;
use crate::trusted::{SafeUrl, SafetyClass};
use crate::value::BindingValue;

/// The kinds of safe value a bridge can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeType {
    /// A compile-time constant.
    Constant,
    /// Safe markup.
    Html,
    /// Safe script.
    Javascript,
    /// A trusted resource URL.
    ResourceUrl,
    /// Any string. Used to coerce values before local filtering.
    String,
    /// Safe CSS.
    Style,
    /// A safe navigation URL.
    Url,
}

impl SafeType {
    /// The safety class whose branded values satisfy this type directly.
    ///
    /// `String` has no class: every value can be coerced to a string.
    pub fn safety_class(self) -> Option<SafetyClass> {
        match self {
            SafeType::Constant => Some(SafetyClass::Constant),
            SafeType::Html => Some(SafetyClass::Html),
            SafeType::Javascript => Some(SafetyClass::Script),
            SafeType::ResourceUrl => Some(SafetyClass::ResourceUrl),
            SafeType::Style => Some(SafetyClass::Style),
            SafeType::Url => Some(SafetyClass::Url),
            SafeType::String => None,
        }
    }
}

impl From<SafetyClass> for SafeType {
    fn from(class: SafetyClass) -> Self {
        match class {
            SafetyClass::Html => SafeType::Html,
            SafetyClass::Url => SafeType::Url,
            SafetyClass::ResourceUrl => SafeType::ResourceUrl,
            SafetyClass::Script => SafeType::Javascript,
            SafetyClass::Style => SafeType::Style,
            SafetyClass::Constant => SafeType::Constant,
        }
    }
}

impl fmt::Display for SafeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SafeType::Constant => "CONSTANT",
            SafeType::Html => "HTML",
            SafeType::Javascript => "JAVASCRIPT",
            SafeType::ResourceUrl => "RESOURCE_URL",
            SafeType::String => "STRING",
            SafeType::Style => "STYLE",
            SafeType::Url => "URL",
        };
        f.write_str(name)
    }
}

/// Recognizes values that are already safe for a requested [`SafeType`].
///
/// Implementations MUST return `None` when they cannot establish that
/// `value` is safe as `ty`.
///
/// Closures of the form `Fn(&BindingValue, SafeType) -> Option<String>`
/// implement this trait.
///
/// # Examples
///
/// ```
/// use binding_guard::{BindingValue, SafeType, SafeTypesBridge};
///
/// let only_strings = |value: &BindingValue, ty: SafeType| match ty {
///     SafeType::String => value.as_str().map(str::to_string),
///     _ => None,
/// };
///
/// assert_eq!(only_strings.bridge(&BindingValue::from("x"), SafeType::String), Some("x".to_string()));
/// assert_eq!(only_strings.bridge(&BindingValue::from("x"), SafeType::Url), None);
/// ```
pub trait SafeTypesBridge: Send + Sync {
    /// Returns the safe string for `value` as `ty`, or `None`.
    fn bridge(&self, value: &BindingValue, ty: SafeType) -> Option<String>;
}

impl<F> SafeTypesBridge for F
where
    F: Fn(&BindingValue, SafeType) -> Option<String> + Send + Sync,
{
    fn bridge(&self, value: &BindingValue, ty: SafeType) -> Option<String> {
        self(value, ty)
    }
}

/// A bridge that never proves anything.
///
/// This is the default. Every contract that requires a safety class falls
/// back to the engine's local filters or its innocuous replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBridge;

impl SafeTypesBridge for NoopBridge {
    fn bridge(&self, _value: &BindingValue, _ty: SafeType) -> Option<String> {
        None
    }
}

/// A bridge that understands this crate's trusted values.
///
/// A branded value whose class matches the request is unwrapped. Otherwise
/// the request type decides:
///
/// | Requested | Unbranded value |
/// |-----------|-----------------|
/// | `Html` | escaped into markup |
/// | `Url` | vetted by [`SafeUrl::sanitize`]; rejected URLs fail |
/// | `String` | coerced, unwrapping typed strings |
/// | anything else | fails |
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedStringBridge;

impl SafeTypesBridge for TypedStringBridge {
    fn bridge(&self, value: &BindingValue, ty: SafeType) -> Option<String> {
        if let (Some(class), BindingValue::Trusted(trusted)) = (ty.safety_class(), value) {
            if let Some(content) = trusted.content_if(class) {
                return Some(content.to_string());
            }
        }

        match ty {
            SafeType::Html => Some(html_escape(&value.to_plain_string())),
            SafeType::Url => {
                let url = SafeUrl::sanitize(&value.to_plain_string());
                (!url.is_innocuous()).then(|| url.into_string())
            }
            SafeType::String => Some(value.to_plain_string()),
            SafeType::Constant
            | SafeType::Javascript
            | SafeType::ResourceUrl
            | SafeType::Style => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trusted::{Const, SafeHtml, TypedString};
    use crate::unchecked;

    fn why() -> Const {
        Const::from_static("bridge test")
    }

    #[test]
    fn noop_bridge_always_falls_back() {
        let value = BindingValue::from(SafeHtml::html_escape("x"));
        for ty in [
            SafeType::Constant,
            SafeType::Html,
            SafeType::Javascript,
            SafeType::ResourceUrl,
            SafeType::String,
            SafeType::Style,
            SafeType::Url,
        ] {
            assert_eq!(NoopBridge.bridge(&value, ty), None);
        }
    }

    #[test]
    fn matching_brand_is_unwrapped() {
        let style = unchecked::safe_style_from_string_known_to_satisfy_type_contract(
            &why(),
            "color: red",
        )
        .unwrap();
        assert_eq!(
            TypedStringBridge.bridge(&style.into(), SafeType::Style),
            Some("color: red".to_string())
        );
    }

    #[test]
    fn mismatched_brand_falls_back_for_strict_types() {
        let url = BindingValue::from(SafeUrl::sanitize("https://example.com/"));
        assert_eq!(TypedStringBridge.bridge(&url, SafeType::ResourceUrl), None);
        assert_eq!(TypedStringBridge.bridge(&url, SafeType::Style), None);
        assert_eq!(TypedStringBridge.bridge(&url, SafeType::Javascript), None);
        assert_eq!(TypedStringBridge.bridge(&url, SafeType::Constant), None);
    }

    #[test]
    fn plain_text_is_escaped_for_html() {
        assert_eq!(
            TypedStringBridge.bridge(&"<i>".into(), SafeType::Html),
            Some("&lt;i&gt;".to_string())
        );
    }

    #[test]
    fn plain_text_urls_are_vetted() {
        assert_eq!(
            TypedStringBridge.bridge(&"/path".into(), SafeType::Url),
            Some("/path".to_string())
        );
        assert_eq!(
            TypedStringBridge.bridge(&"javascript:alert(1)".into(), SafeType::Url),
            None
        );
    }

    #[test]
    fn resource_url_passes_as_url_after_vetting() {
        let resource = unchecked::trusted_resource_url_from_string_known_to_satisfy_type_contract(
            &why(),
            "https://cdn.example.com/app.js",
        )
        .unwrap();
        assert_eq!(
            TypedStringBridge.bridge(&resource.into(), SafeType::Url),
            Some("https://cdn.example.com/app.js".to_string())
        );
    }

    #[test]
    fn string_unwraps_typed_strings() {
        struct Message;
        impl TypedString for Message {
            fn typed_string_value(&self) -> String {
                "Hello".to_string()
            }
        }

        assert_eq!(
            TypedStringBridge.bridge(&BindingValue::typed_string(Message), SafeType::String),
            Some("Hello".to_string())
        );
        assert_eq!(
            TypedStringBridge.bridge(&BindingValue::Number(42.0), SafeType::String),
            Some("42".to_string())
        );
    }

    #[test]
    fn constants_need_a_brand() {
        assert_eq!(TypedStringBridge.bridge(&"id-1".into(), SafeType::Constant), None);
        assert_eq!(
            TypedStringBridge.bridge(&Const::from_static("id-1").into(), SafeType::Constant),
            Some("id-1".to_string())
        );
    }

    #[test]
    fn closures_are_bridges() {
        let bridge = |_: &BindingValue, ty: SafeType| (ty == SafeType::Style).then(|| "x".to_string());
        assert_eq!(bridge.bridge(&BindingValue::Null, SafeType::Style), Some("x".to_string()));
        assert_eq!(bridge.bridge(&BindingValue::Null, SafeType::Html), None);
    }

    #[test]
    fn safety_class_round_trip() {
        for class in SafetyClass::ALL {
            assert_eq!(SafeType::from(class).safety_class(), Some(class));
        }
        assert_eq!(SafeType::String.safety_class(), None);
    }
}
