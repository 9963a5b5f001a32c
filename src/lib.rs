//! Runtime sanitization of template data bindings.
//!
//! Template frameworks write dynamically computed values into attributes,
//! properties and text nodes. This crate decides, for every such binding,
//! what value may actually be applied:
//! - **Trusted types**: branded wrappers ([`SafeHtml`], [`SafeUrl`], ...)
//!   that only this crate can mint, so a look-alike cannot pass as safe
//! - **Contracts**: static tables of what each HTML attribute and element
//!   may carry, including contracts that depend on a sibling attribute
//! - **Classification**: builtin, legacy and author-defined elements are
//!   held to different rules
//! - **Reporting**: rejected values are replaced by inert placeholders and
//!   reported, never raised
//!
//! # Core Types
//!
//! - [`Sanitizer`]: the decision engine
//! - [`SanitizerBuilder`]: named configuration options
//! - [`BindingValue`]: what a binding offers
//! - [`SafeTypesBridge`]: recognizes values that are already safe
//! - [`DomValueHook`]: adapter for the host framework's hook
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use binding_guard::dom::memory::{MemoryDocument, MemoryText};
//! use binding_guard::report::ReportTrail;
//! use binding_guard::{BindingKind, BindingValue, Sanitizer, TypedStringBridge, INNOCUOUS_URL};
//!
//! let document = Arc::new(MemoryDocument::new());
//! let trail = ReportTrail::new();
//! let sanitizer = Sanitizer::builder()
//!     .safe_types_bridge(TypedStringBridge)
//!     .report_handler(trail.clone())
//!     .build(document.clone(), document.clone())
//!     .expect("configuration compiles");
//!
//! // Unsafe URLs are replaced
//! let anchor = document.create_element("a");
//! let href = sanitizer.sanitize(&anchor, "href", BindingKind::Attribute, "javascript:alert(1)");
//! assert_eq!(href, BindingValue::from(INNOCUOUS_URL));
//!
//! // Text is escaped
//! let div = Arc::new(document.create_element("div"));
//! let text = sanitizer.sanitize(
//!     &MemoryText::new(div),
//!     "textContent",
//!     BindingKind::Property,
//!     "<script>x</script>",
//! );
//! assert_eq!(text.as_str(), Some("&lt;script&gt;x&lt;/script&gt;"));
//!
//! // The status report plus one violation
//! assert_eq!(trail.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bridge;
pub mod classify;
mod config;
pub mod contracts;
pub mod dom;
mod error;
mod hook;
pub mod names;
pub mod report;
mod sanitizer;
mod strings;
pub mod trusted;
pub mod unchecked;
mod value;

#[cfg(test)]
mod test_utils;

pub use bridge::{NoopBridge, SafeType, SafeTypesBridge, TypedStringBridge};
pub use classify::{Classifier, ElementClassification};
pub use config::{ReportSetting, SanitizerBuilder};
pub use error::Error;
pub use hook::{DomValueFn, DomValueHook};
pub use report::{ReportEvent, ReportHandler, ViolationReport};
pub use sanitizer::{BindingKind, Sanitizer, INNOCUOUS_SCRIPT, INNOCUOUS_STRING, INNOCUOUS_URL};
pub use strings::{html_escape, to_camel_case, to_selector_case};
pub use trusted::{
    AnyTrusted, Const, SafeHtml, SafeScript, SafeStyle, SafeUrl, SafetyClass, Trusted,
    TrustedClass, TrustedResourceUrl, TypedString,
};
pub use value::BindingValue;
