//! The sanitizer engine.
//!
//! Every binding a template makes passes through [`Sanitizer::sanitize`],
//! which returns the value that may actually be applied to the node.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use regex::Regex;

use crate::bridge::{SafeType, SafeTypesBridge};
use crate::classify::{Classifier, ElementClassification};
use crate::config::SanitizerBuilder;
use crate::contracts::{content_contract, enum_allowed, lookup_attribute, AttrType, AttributeLookup};
use crate::dom::{ComponentRegistry, Document, DomElement, DomNode, NodeType, PropertyCatalog};
use crate::error::Error;
use crate::names::{attr_to_property, property_to_attr, special_property_name_worst_case};
use crate::report::{ReportEvent, ReportHandler, ViolationReport};
use crate::trusted::{AnyTrusted, SafeHtml, SafeUrl};
use crate::value::BindingValue;

/// Replacement for rejected values without a more specific replacement.
pub const INNOCUOUS_STRING: &str = "zClosurez";

/// Replacement for rejected URLs.
pub const INNOCUOUS_URL: &str = SafeUrl::INNOCUOUS_STRING;

/// Replacement for rejected script.
pub const INNOCUOUS_SCRIPT: &str = " /*zClosurez*/ ";

/// Whether a binding names an attribute or a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// An HTML attribute, e.g. `tabindex`.
    Attribute,
    /// A DOM property, e.g. `tabIndex`.
    Property,
}

impl FromStr for BindingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attribute" => Ok(BindingKind::Attribute),
            "property" => Ok(BindingKind::Property),
            other => Err(Error::UnknownBindingKind(other.to_string())),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Attribute => write!(f, "attribute"),
            BindingKind::Property => write!(f, "property"),
        }
    }
}

/// How values are checked once the bridge fails to prove them safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    /// Nothing else can make the value safe.
    Reject,
    /// The lowercased value must be a legal keyword.
    Enum,
    /// The value must match the configured identifier prefixes.
    Identifier,
}

#[derive(Debug, Clone, Copy)]
struct ValueHandler {
    safe_type: Option<SafeType>,
    replacement: &'static str,
    filter: Filter,
}

const fn handler(safe_type: Option<SafeType>, replacement: &'static str, filter: Filter) -> ValueHandler {
    ValueHandler {
        safe_type,
        replacement,
        filter,
    }
}

/// Handlers for every contract except [`AttrType::None`], which is the
/// identity.
fn value_handler(contract: AttrType) -> ValueHandler {
    match contract {
        AttrType::SafeHtml => handler(Some(SafeType::Html), INNOCUOUS_STRING, Filter::Reject),
        AttrType::SafeUrl => handler(Some(SafeType::Url), INNOCUOUS_URL, Filter::Reject),
        AttrType::TrustedResourceUrl => {
            handler(Some(SafeType::ResourceUrl), INNOCUOUS_URL, Filter::Reject)
        }
        AttrType::SafeStyle => handler(Some(SafeType::Style), INNOCUOUS_STRING, Filter::Reject),
        AttrType::SafeScript => {
            handler(Some(SafeType::Javascript), INNOCUOUS_SCRIPT, Filter::Reject)
        }
        AttrType::CompileTimeConstant => {
            handler(Some(SafeType::Constant), INNOCUOUS_STRING, Filter::Reject)
        }
        AttrType::Enum => handler(None, INNOCUOUS_STRING, Filter::Enum),
        AttrType::Identifier => {
            handler(Some(SafeType::Constant), INNOCUOUS_STRING, Filter::Identifier)
        }
        AttrType::None => handler(None, INNOCUOUS_STRING, Filter::Reject),
    }
}

/// Decides what value a binding may apply to a node.
///
/// A `Sanitizer` is built once per document by [`SanitizerBuilder`] and is
/// shared by every binding. Decisions never fail: rejected values are
/// replaced by an innocuous value of the right kind and reported to the
/// configured [`ReportHandler`].
///
/// # Security Properties
///
/// - Falsy values are always allowed, since clearing a value is safe
/// - Text is only allowed under elements whose content model is markup or
///   plain text, or under author-defined elements
/// - Attribute and property values must satisfy the contract of the
///   attribute they reflect; only the configured [`SafeTypesBridge`] can
///   prove a value safe for a typed contract
/// - Reflected markup, script text and event handler properties are
///   contract-checked even when no attribute table lists them
/// - Names that a builtin element does not reflect are not examined, so
///   author-defined properties on custom elements pass unchanged
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use binding_guard::dom::memory::MemoryDocument;
/// use binding_guard::{BindingKind, BindingValue, Sanitizer, INNOCUOUS_URL};
///
/// let document = Arc::new(MemoryDocument::new());
/// let sanitizer = Sanitizer::builder()
///     .disable_reporting()
///     .build(document.clone(), document.clone())
///     .unwrap();
///
/// let anchor = document.create_element("a");
/// let safe = sanitizer.sanitize(&anchor, "href", BindingKind::Attribute, "javascript:alert(1)");
/// assert_eq!(safe, BindingValue::from(INNOCUOUS_URL));
/// ```
pub struct Sanitizer {
    document: Arc<dyn Document>,
    classifier: Classifier,
    bridge: Arc<dyn SafeTypesBridge>,
    report_handler: Option<Arc<dyn ReportHandler>>,
    identifier_pattern: Regex,
    pass_through: bool,
    proxies: RwLock<HashMap<String, Arc<dyn PropertyCatalog>>>,
    vanilla: Arc<dyn PropertyCatalog>,
}

impl Sanitizer {
    pub(crate) fn new(
        document: Arc<dyn Document>,
        registry: Arc<dyn ComponentRegistry>,
        bridge: Arc<dyn SafeTypesBridge>,
        report_handler: Option<Arc<dyn ReportHandler>>,
        identifier_pattern: Regex,
        pass_through: bool,
    ) -> Self {
        let vanilla = document.vanilla_element();
        Self {
            document,
            classifier: Classifier::new(registry),
            bridge,
            report_handler,
            identifier_pattern,
            pass_through,
            proxies: RwLock::new(HashMap::new()),
            vanilla,
        }
    }

    /// Starts configuring a sanitizer.
    pub fn builder() -> SanitizerBuilder {
        SanitizerBuilder::new()
    }

    /// Returns the value `node` may receive for the binding `name`.
    ///
    /// With pass-through enabled (debug builds only) the decision is still
    /// made and reported, but `value` is returned unchanged.
    pub fn sanitize(
        &self,
        node: &dyn DomNode,
        name: &str,
        kind: BindingKind,
        value: impl Into<BindingValue>,
    ) -> BindingValue {
        let value = value.into();
        let safe = self.decide(node, name, kind, &value);
        if self.pass_through {
            if safe != value {
                tracing::trace!(
                    node = %node.node_name(),
                    name,
                    kind = %kind,
                    "passing disallowed value through"
                );
            }
            return value;
        }
        safe
    }

    /// Like [`sanitize`](Self::sanitize), with the binding kind spelled as
    /// the host spells it: `"attribute"` or `"property"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBindingKind`] for any other kind. That is an
    /// integration bug, not untrusted input, so nothing is reported.
    pub fn sanitize_with_kind_str(
        &self,
        node: &dyn DomNode,
        name: &str,
        kind: &str,
        value: impl Into<BindingValue>,
    ) -> Result<BindingValue, Error> {
        let kind = kind.parse::<BindingKind>()?;
        Ok(self.sanitize(node, name, kind, value))
    }

    /// Opts into scanning the host's legacy registration log before each
    /// classification.
    pub fn hint_uses_legacy_registration(&self) {
        self.classifier.hint_uses_legacy_registration();
    }

    /// Returns the element classifier.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn decide(
        &self,
        node: &dyn DomNode,
        name: &str,
        kind: BindingKind,
        value: &BindingValue,
    ) -> BindingValue {
        if value.is_falsy() {
            return value.clone();
        }
        match node.as_element() {
            Some(element) => self.sanitize_element_value(element, name, kind, value),
            None => self.sanitize_text(node, value),
        }
    }

    fn sanitize_text(&self, node: &dyn DomNode, value: &BindingValue) -> BindingValue {
        let parent = node.parent_element();
        let allowed = node.node_type() == NodeType::Text
            && parent.map_or(true, |parent| self.allows_text(parent));

        if !allowed {
            self.report(ViolationReport::for_text(
                parent.map(|parent| parent.node_name()),
                node.node_name(),
                value.coerce_to_string(),
            ));
            return BindingValue::from(INNOCUOUS_STRING);
        }

        if let BindingValue::Trusted(AnyTrusted::Html(_)) = value {
            return value.clone();
        }
        let text = self
            .bridge
            .bridge(value, SafeType::String)
            .unwrap_or_else(|| value.coerce_to_string());
        SafeHtml::html_escape(&text).into()
    }

    fn allows_text(&self, parent: &dyn DomElement) -> bool {
        match self.classifier.classify_element(parent) {
            ElementClassification::Builtin | ElementClassification::Legacy => {
                content_contract(parent.local_name()).is_some_and(|content| content.allows_text())
            }
            ElementClassification::Custom | ElementClassification::Customizable => true,
        }
    }

    fn sanitize_element_value(
        &self,
        element: &dyn DomElement,
        name: &str,
        kind: BindingKind,
        value: &BindingValue,
    ) -> BindingValue {
        let element_name = element.local_name();

        // 1. Only names the platform reflects are subject to contracts
        let proxy = self.uncustomized_proxy(element);
        let reflected = match kind {
            BindingKind::Attribute => proxy
                .has_property(&attr_to_property(name))
                .then(|| name.to_lowercase()),
            BindingKind::Property if proxy.has_property(name) => Some(property_to_attr(name)),
            BindingKind::Property => special_property_name_worst_case(name)
                .filter(|worst_case| proxy.has_property(worst_case))
                .map(property_to_attr),
        };
        let Some(attr_name) = reflected else {
            tracing::trace!(
                element = element_name,
                name,
                kind = %kind,
                "name is not reflected; value passed through"
            );
            return value.clone();
        };

        // 2. Resolve the contract of the canonical attribute
        let contract = match lookup_attribute(element_name, &attr_name, |sibling| {
            sibling_value(element, sibling)
        }) {
            AttributeLookup::Known(contract) => contract,
            AttributeLookup::Unlisted => AttrType::None,
            AttributeLookup::Indeterminate | AttributeLookup::Rejected => {
                self.report(ViolationReport::for_attribute(
                    element_name,
                    attr_name,
                    value.coerce_to_string(),
                ));
                return BindingValue::from(INNOCUOUS_STRING);
            }
        };

        // 3. Apply it
        if contract == AttrType::None {
            return value.clone();
        }
        let handler = value_handler(contract);
        match self.apply(handler, element_name, &attr_name, value) {
            Some(safe) => BindingValue::Text(safe),
            None => {
                self.report(
                    ViolationReport::for_attribute(element_name, attr_name, value.coerce_to_string())
                        .with_contract(Some(contract)),
                );
                BindingValue::from(handler.replacement)
            }
        }
    }

    fn apply(
        &self,
        handler: ValueHandler,
        element_name: &str,
        attr_name: &str,
        value: &BindingValue,
    ) -> Option<String> {
        if let Some(proved) = handler
            .safe_type
            .and_then(|safe_type| self.bridge.bridge(value, safe_type))
        {
            return Some(proved);
        }

        let text = || {
            self.bridge
                .bridge(value, SafeType::String)
                .unwrap_or_else(|| value.coerce_to_string())
        };
        match handler.filter {
            Filter::Reject => None,
            Filter::Enum => {
                let keyword = text().to_lowercase();
                enum_allowed(element_name, attr_name, &keyword).then_some(keyword)
            }
            Filter::Identifier => {
                let identifier = text();
                self.identifier_pattern
                    .is_match(&identifier)
                    .then_some(identifier)
            }
        }
    }

    fn uncustomized_proxy(&self, element: &dyn DomElement) -> Arc<dyn PropertyCatalog> {
        let customized_builtin = element
            .get_attribute("is")
            .is_some_and(|is| !is.is_empty());
        if !customized_builtin
            && self.classifier.classify_element(element) == ElementClassification::Custom
        {
            return Arc::clone(&self.vanilla);
        }

        let name = element.local_name();
        if let Some(proxy) = self
            .proxies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(proxy);
        }

        let proxy = self.document.create_uncustomized(name);
        let mut proxies = self.proxies.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(proxies.entry(name.to_string()).or_insert(proxy))
    }

    fn report(&self, violation: ViolationReport) {
        if let Some(handler) = &self.report_handler {
            handler.report(&ReportEvent::Violation(violation));
        }
    }
}

/// Reads a sibling attribute for contingent contracts.
///
/// Empty values and values that still contain binding syntax are unknown.
fn sibling_value(element: &dyn DomElement, name: &str) -> Option<String> {
    element
        .get_attribute(name)
        .filter(|value| !value.is_empty() && !value.contains(['[', '{']))
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("classifier", &self.classifier)
            .field("identifier_pattern", &self.identifier_pattern.as_str())
            .field("reporting", &self.report_handler.is_some())
            .field("pass_through", &self.pass_through)
            .finish_non_exhaustive()
    }
}
