//! Branded trusted values ("typed strings").
//!
//! A [`Trusted<C>`] wraps content that a producer has vetted for one safety
//! class `C`. The brand is a private zero-sized token, so a `Trusted<C>` can
//! only be produced by the factories in this crate:
//!
//! - [`SafeHtml::html_escape`] and [`SafeHtml::empty`]
//! - [`SafeUrl::sanitize`] and [`SafeUrl::from_trusted_resource_url`]
//! - [`Const::from_static`]
//! - the justification-gated constructors in [`unchecked`](crate::unchecked)
//!
//! Values produced elsewhere can implement [`TypedString`], but they are never
//! branded and therefore never satisfy a class-specific unwrap.
//!
//! # Security Properties
//!
//! - No public constructor that skips vetting
//! - Does NOT implement `Display`, `Deref`, `AsRef<str>` or `From<String>`
//! - Content is immutable after construction
//!
//! ```compile_fail
//! use binding_guard::SafeHtml;
//!
//! // No public constructor taking raw markup:
//! let html = SafeHtml::new("<script>alert(1)</script>");
//! ```
//!
//! ```compile_fail
//! use binding_guard::SafeHtml;
//!
//! // No Display, so trusted content never leaks into `format!("{}")`:
//! let html = SafeHtml::html_escape("<b>");
//! let s = format!("{}", html);
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::strings::html_escape;

/// The safety classes a trusted value can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyClass {
    /// HTML markup safe to parse into a document.
    Html,
    /// A URL safe to navigate to.
    Url,
    /// A URL whose resource may be loaded and executed.
    ResourceUrl,
    /// Script source.
    Script,
    /// CSS declarations.
    Style,
    /// A compile-time constant.
    Constant,
}

impl SafetyClass {
    /// All safety classes in declaration order.
    pub const ALL: [SafetyClass; 6] = [
        SafetyClass::Html,
        SafetyClass::Url,
        SafetyClass::ResourceUrl,
        SafetyClass::Script,
        SafetyClass::Style,
        SafetyClass::Constant,
    ];

    /// The name of the wrapper type for this class.
    pub fn type_name(self) -> &'static str {
        match self {
            SafetyClass::Html => "SafeHtml",
            SafetyClass::Url => "SafeUrl",
            SafetyClass::ResourceUrl => "TrustedResourceUrl",
            SafetyClass::Script => "SafeScript",
            SafetyClass::Style => "SafeStyle",
            SafetyClass::Constant => "Const",
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Marker trait implemented by the six safety class markers.
///
/// Sealed: no other crate can add a class.
pub trait TrustedClass:
    sealed::Sealed + fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// The runtime tag for this class.
    const CLASS: SafetyClass;

    /// Erases the class parameter.
    fn into_any(value: Trusted<Self>) -> AnyTrusted;
}

macro_rules! class_marker {
    ($(#[$doc:meta])* $marker:ident, $class:ident, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $marker {
            _private: (),
        }

        impl sealed::Sealed for $marker {}

        impl TrustedClass for $marker {
            const CLASS: SafetyClass = SafetyClass::$class;

            fn into_any(value: Trusted<Self>) -> AnyTrusted {
                AnyTrusted::$variant(value)
            }
        }
    };
}

class_marker!(
    /// Class marker for [`SafeHtml`].
    Html,
    Html,
    Html
);
class_marker!(
    /// Class marker for [`SafeUrl`].
    Url,
    Url,
    Url
);
class_marker!(
    /// Class marker for [`TrustedResourceUrl`].
    ResourceUrl,
    ResourceUrl,
    ResourceUrl
);
class_marker!(
    /// Class marker for [`SafeScript`].
    Script,
    Script,
    Script
);
class_marker!(
    /// Class marker for [`SafeStyle`].
    Style,
    Style,
    Style
);
class_marker!(
    /// Class marker for [`Const`].
    Constant,
    Constant,
    Constant
);

/// The brand. Only this module can mint one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Brand {
    _private: (),
}

const BRAND: Brand = Brand { _private: () };

/// Content vetted for safety class `C`.
///
/// See the [module documentation](self) for how instances are obtained.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Trusted<C: TrustedClass> {
    // BREAKING CHANGE WARNING: These fields MUST remain private.
    // A public field lets any caller assemble a branded value from raw input.
    content: Arc<str>,
    _brand: Brand,
    _class: PhantomData<C>,
}

/// Markup that is safe to parse into the document.
pub type SafeHtml = Trusted<Html>;
/// A URL that is safe to navigate to.
pub type SafeUrl = Trusted<Url>;
/// A URL whose resource is trusted to be loaded and executed.
pub type TrustedResourceUrl = Trusted<ResourceUrl>;
/// Script source that is safe to evaluate.
pub type SafeScript = Trusted<Script>;
/// CSS declarations that are safe to apply.
pub type SafeStyle = Trusted<Style>;
/// A compile-time constant string.
pub type Const = Trusted<Constant>;

impl<C: TrustedClass> Trusted<C> {
    pub(crate) fn brand(content: impl Into<Arc<str>>) -> Self {
        Self {
            content: content.into(),
            _brand: BRAND,
            _class: PhantomData,
        }
    }

    /// Returns the safety class of this value.
    pub fn class(&self) -> SafetyClass {
        C::CLASS
    }

    /// Returns the trusted content.
    ///
    /// Unwrapping is side-effect free and may be repeated.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consumes the value and returns the trusted content.
    pub fn into_string(self) -> String {
        self.content.to_string()
    }

    /// Erases the class parameter.
    pub fn into_any(self) -> AnyTrusted {
        C::into_any(self)
    }
}

impl<C: TrustedClass> fmt::Debug for Trusted<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{ {} }}", C::CLASS.type_name(), self.content)
    }
}

// BREAKING CHANGE WARNING: Do NOT implement Display, Deref, AsRef<str>, Borrow<str>
// or From<String> for Trusted<C>. Display lets trusted content flow into string
// concatenation unnoticed; the From impls would be a forging path.

impl SafeHtml {
    /// Escapes plain text into markup that parses to an equivalent text node.
    ///
    /// # Examples
    ///
    /// ```
    /// use binding_guard::SafeHtml;
    ///
    /// let html = SafeHtml::html_escape("<script>x</script>");
    /// assert_eq!(html.as_str(), "&lt;script&gt;x&lt;/script&gt;");
    /// ```
    pub fn html_escape(text: &str) -> Self {
        Self::brand(html_escape(text))
    }

    /// Returns empty markup.
    pub fn empty() -> Self {
        Self::brand("")
    }
}

/// Matches URLs whose scheme is `http`, `https`, `mailto` or `ftp`, or that
/// have no scheme at all.
fn safe_url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:(?:https?|mailto|ftp):|[^:/?#]*(?:[/?#]|$))")
            .expect("valid regex")
    })
}

impl SafeUrl {
    /// The URL substituted for rejected URLs.
    pub const INNOCUOUS_STRING: &'static str = "about:invalid#zClosurez";

    /// Returns `true` if `url` uses a permitted scheme or is scheme-relative
    /// or path-relative.
    pub fn is_safe(url: &str) -> bool {
        safe_url_pattern().is_match(url)
    }

    /// Vets a URL.
    ///
    /// Returns the URL itself when [`is_safe`](Self::is_safe) accepts it, and
    /// [`INNOCUOUS_STRING`](Self::INNOCUOUS_STRING) otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use binding_guard::SafeUrl;
    ///
    /// assert_eq!(SafeUrl::sanitize("https://example.com/").as_str(), "https://example.com/");
    /// assert_eq!(SafeUrl::sanitize("javascript:alert(1)").as_str(), SafeUrl::INNOCUOUS_STRING);
    /// ```
    pub fn sanitize(url: &str) -> Self {
        if Self::is_safe(url) {
            Self::brand(url)
        } else {
            Self::brand(Self::INNOCUOUS_STRING)
        }
    }

    /// Every trusted resource URL is also safe to navigate to.
    pub fn from_trusted_resource_url(url: &TrustedResourceUrl) -> Self {
        Self::brand(Arc::clone(&url.content))
    }

    /// Returns `true` if this is the innocuous replacement URL.
    pub fn is_innocuous(&self) -> bool {
        self.as_str() == Self::INNOCUOUS_STRING
    }
}

impl Const {
    /// Wraps a string literal.
    ///
    /// Requiring `&'static str` keeps runtime-assembled strings out.
    pub fn from_static(value: &'static str) -> Self {
        Self::brand(value)
    }
}

/// A trusted value of any class.
///
/// This is the closed set of branded values the sanitizer recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyTrusted {
    /// Safe markup
    Html(SafeHtml),
    /// Safe navigation URL
    Url(SafeUrl),
    /// Trusted resource URL
    ResourceUrl(TrustedResourceUrl),
    /// Safe script
    Script(SafeScript),
    /// Safe style
    Style(SafeStyle),
    /// Compile-time constant
    Constant(Const),
}

impl AnyTrusted {
    /// Returns the safety class of the wrapped value.
    pub fn class(&self) -> SafetyClass {
        match self {
            AnyTrusted::Html(_) => SafetyClass::Html,
            AnyTrusted::Url(_) => SafetyClass::Url,
            AnyTrusted::ResourceUrl(_) => SafetyClass::ResourceUrl,
            AnyTrusted::Script(_) => SafetyClass::Script,
            AnyTrusted::Style(_) => SafetyClass::Style,
            AnyTrusted::Constant(_) => SafetyClass::Constant,
        }
    }

    /// Returns the trusted content.
    pub fn as_str(&self) -> &str {
        match self {
            AnyTrusted::Html(v) => v.as_str(),
            AnyTrusted::Url(v) => v.as_str(),
            AnyTrusted::ResourceUrl(v) => v.as_str(),
            AnyTrusted::Script(v) => v.as_str(),
            AnyTrusted::Style(v) => v.as_str(),
            AnyTrusted::Constant(v) => v.as_str(),
        }
    }

    /// Returns the content only if this value belongs to `class`.
    pub fn content_if(&self, class: SafetyClass) -> Option<&str> {
        (self.class() == class).then(|| self.as_str())
    }
}

impl<C: TrustedClass> From<Trusted<C>> for AnyTrusted {
    fn from(value: Trusted<C>) -> Self {
        value.into_any()
    }
}

/// A value that carries a string with some claimed meaning.
///
/// Implemented by every [`Trusted<C>`] and open to other producers, such as
/// localized message types. Implementing this trait grants no trust: the
/// sanitizer uses it only to coerce a value to plain text.
pub trait TypedString: Send + Sync {
    /// Returns the wrapped string.
    fn typed_string_value(&self) -> String;
}

impl<C: TrustedClass> TypedString for Trusted<C> {
    fn typed_string_value(&self) -> String {
        self.as_str().to_string()
    }
}

impl TypedString for AnyTrusted {
    fn typed_string_value(&self) -> String {
        self.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_factory_brands_escaped_content() {
        let html = SafeHtml::html_escape("<b>bold</b>");
        assert_eq!(html.as_str(), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(html.class(), SafetyClass::Html);
    }

    #[test]
    fn empty_html_is_empty() {
        assert_eq!(SafeHtml::empty().as_str(), "");
    }

    #[test]
    fn url_sanitize_accepts_permitted_schemes() {
        for url in [
            "http://example.com",
            "HTTPS://example.com/path?q=1",
            "mailto:someone@example.com",
            "ftp://files.example.com",
            "//example.com/scheme-relative",
            "/absolute/path",
            "relative/path",
            "page.html#frag",
            "?query",
            "",
        ] {
            let safe = SafeUrl::sanitize(url);
            assert_eq!(safe.as_str(), url, "expected {url:?} to be accepted");
            assert!(!safe.is_innocuous());
        }
    }

    #[test]
    fn url_sanitize_rejects_other_schemes() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "vbscript:msgbox(1)",
            "about:blank",
        ] {
            assert!(SafeUrl::sanitize(url).is_innocuous(), "expected {url:?} rejected");
        }
    }

    #[test]
    fn innocuous_url_is_itself_rejected() {
        // Sanitizing the replacement yields the replacement again.
        let once = SafeUrl::sanitize("javascript:void(0)");
        let twice = SafeUrl::sanitize(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn resource_url_converts_to_safe_url() {
        let resource = crate::unchecked::trusted_resource_url_from_string_known_to_satisfy_type_contract(
            &Const::from_static("test fixture"),
            "https://cdn.example.com/lib.js",
        )
        .unwrap();
        let url = SafeUrl::from_trusted_resource_url(&resource);
        assert_eq!(url.as_str(), "https://cdn.example.com/lib.js");
        assert_eq!(url.class(), SafetyClass::Url);
    }

    #[test]
    fn debug_shows_type_name() {
        let html = SafeHtml::html_escape("x");
        assert_eq!(format!("{:?}", html), "SafeHtml{ x }");
        let constant = Const::from_static("k");
        assert_eq!(format!("{:?}", constant), "Const{ k }");
    }

    #[test]
    fn any_trusted_preserves_class_and_content() {
        let any: AnyTrusted = SafeUrl::sanitize("/x").into();
        assert_eq!(any.class(), SafetyClass::Url);
        assert_eq!(any.as_str(), "/x");
        assert_eq!(any.content_if(SafetyClass::Url), Some("/x"));
        assert_eq!(any.content_if(SafetyClass::ResourceUrl), None);
    }

    #[test]
    fn trusted_values_are_typed_strings() {
        let style = crate::unchecked::safe_style_from_string_known_to_satisfy_type_contract(
            &Const::from_static("test fixture"),
            "color: red",
        )
        .unwrap();
        assert_eq!(style.typed_string_value(), "color: red");
    }

    #[test]
    fn class_type_names() {
        let names: Vec<_> = SafetyClass::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "SafeHtml",
                "SafeUrl",
                "TrustedResourceUrl",
                "SafeScript",
                "SafeStyle",
                "Const"
            ]
        );
    }

    #[test]
    fn clones_share_content() {
        let a = SafeHtml::html_escape("shared");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.into_string(), "shared");
    }
}
