//! An in-memory document.
//!
//! Models just enough of a browser document for the sanitizer: elements
//! with attributes and a constructor kind, text nodes with a parent, a
//! custom-element registry with a legacy registration log, and a catalog of
//! the properties each builtin element type reflects.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use binding_guard::dom::memory::MemoryDocument;
//! use binding_guard::dom::{ConstructorKind, DomElement};
//!
//! let document = Arc::new(MemoryDocument::new());
//! document.define("my-card");
//!
//! let card = document.create_element("my-card");
//! assert_eq!(card.constructor_kind(), ConstructorKind::Author);
//!
//! let link = document.create_element("a").with_attribute("href", "/home");
//! assert_eq!(link.get_attribute("href").as_deref(), Some("/home"));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::classify::is_valid_custom_element_name;
use crate::contracts::content_contract;
use crate::dom::{
    ComponentRegistry, ConstructorKind, Document, DomElement, DomNode, NodeType, PropertyCatalog,
};

/// Properties every HTML element has.
const GLOBAL_PROPERTIES: &[&str] = &[
    "accessKey",
    "autocapitalize",
    "className",
    "contentEditable",
    "dir",
    "draggable",
    "hidden",
    "id",
    "innerHTML",
    "innerText",
    "inputMode",
    "lang",
    "nodeValue",
    "onblur",
    "onchange",
    "onclick",
    "onerror",
    "onfocus",
    "oninput",
    "onkeydown",
    "onload",
    "onmouseover",
    "onsubmit",
    "outerHTML",
    "outerText",
    "role",
    "slot",
    "spellcheck",
    "style",
    "tabIndex",
    "textContent",
    "title",
    "translate",
];

/// Properties specific to builtin element types, by tag.
const ELEMENT_PROPERTIES: &[(&str, &[&str])] = &[
    ("a", &["download", "href", "hreflang", "name", "ping", "rel", "target", "text", "type"]),
    ("abbr", &[]),
    ("address", &[]),
    ("area", &["alt", "coords", "download", "href", "rel", "shape", "target"]),
    ("article", &[]),
    ("aside", &[]),
    (
        "audio",
        &["autoplay", "controls", "crossOrigin", "defaultMuted", "loop", "muted", "preload", "src"],
    ),
    ("b", &[]),
    ("base", &["href", "target"]),
    ("blockquote", &["cite"]),
    ("body", &["aLink", "bgColor", "vLink"]),
    ("br", &[]),
    (
        "button",
        &[
            "autofocus",
            "disabled",
            "formAction",
            "formEnctype",
            "formMethod",
            "formNoValidate",
            "formTarget",
            "name",
            "type",
            "value",
        ],
    ),
    ("canvas", &["height", "width"]),
    ("code", &[]),
    ("del", &["cite", "dateTime"]),
    ("div", &["align"]),
    ("em", &[]),
    ("embed", &["height", "src", "type", "width"]),
    (
        "form",
        &[
            "acceptCharset",
            "action",
            "autocomplete",
            "enctype",
            "method",
            "name",
            "noValidate",
            "target",
        ],
    ),
    ("h1", &["align"]),
    ("h2", &["align"]),
    ("h3", &["align"]),
    ("head", &[]),
    ("html", &[]),
    ("i", &[]),
    (
        "iframe",
        &["allowFullscreen", "frameBorder", "height", "name", "sandbox", "src", "srcdoc", "width"],
    ),
    (
        "img",
        &["alt", "crossOrigin", "height", "isMap", "longDesc", "sizes", "src", "srcset", "useMap", "width"],
    ),
    (
        "input",
        &[
            "accept",
            "alt",
            "autocomplete",
            "checked",
            "defaultChecked",
            "defaultValue",
            "disabled",
            "formAction",
            "formEnctype",
            "formMethod",
            "formNoValidate",
            "formTarget",
            "list",
            "max",
            "maxLength",
            "min",
            "minLength",
            "multiple",
            "name",
            "pattern",
            "placeholder",
            "readOnly",
            "required",
            "size",
            "src",
            "step",
            "type",
            "value",
            "valueAsDate",
            "valueAsNumber",
        ],
    ),
    ("ins", &["cite", "dateTime"]),
    ("label", &["htmlFor"]),
    ("li", &["type", "value"]),
    ("link", &["as", "crossOrigin", "href", "hreflang", "media", "nonce", "rel", "sizes", "type"]),
    ("meta", &["content", "httpEquiv", "name"]),
    ("object", &["codeBase", "codeType", "data", "height", "name", "type", "useMap", "width"]),
    ("ol", &["reversed", "start", "type"]),
    ("option", &["defaultSelected", "disabled", "label", "selected", "text", "value"]),
    ("output", &["htmlFor", "name", "value"]),
    ("p", &["align"]),
    ("pre", &["width"]),
    ("q", &["cite"]),
    ("script", &["async", "crossOrigin", "defer", "nonce", "src", "text", "type"]),
    ("section", &[]),
    ("select", &["disabled", "multiple", "name", "required", "size", "value"]),
    ("source", &["media", "sizes", "src", "srcset", "type"]),
    ("span", &[]),
    ("strong", &[]),
    ("style", &["media", "nonce", "type"]),
    ("table", &["border", "cellPadding", "cellSpacing", "summary", "width"]),
    ("td", &["align", "ch", "chOff", "colSpan", "headers", "noWrap", "rowSpan", "vAlign"]),
    ("template", &["content"]),
    (
        "textarea",
        &[
            "cols",
            "defaultValue",
            "dirName",
            "maxLength",
            "placeholder",
            "readOnly",
            "rows",
            "value",
            "wrap",
        ],
    ),
    ("th", &["align", "ch", "chOff", "colSpan", "headers", "noWrap", "rowSpan", "vAlign"]),
    ("time", &["dateTime"]),
    ("title", &["text"]),
    ("tr", &["align", "ch", "chOff", "vAlign"]),
    ("track", &["default", "kind", "label", "src", "srclang"]),
    ("ul", &["type"]),
    (
        "video",
        &[
            "autoplay",
            "controls",
            "crossOrigin",
            "defaultMuted",
            "height",
            "loop",
            "muted",
            "poster",
            "preload",
            "src",
            "width",
        ],
    ),
];

fn element_properties(local_name: &str) -> Option<&'static [&'static str]> {
    ELEMENT_PROPERTIES
        .iter()
        .find(|(tag, _)| *tag == local_name)
        .map(|(_, properties)| *properties)
}

/// A [`PropertyCatalog`] backed by a fixed property list.
#[derive(Debug, Clone)]
pub struct FixedCatalog {
    properties: HashSet<&'static str>,
}

impl FixedCatalog {
    fn new(extra: &[&'static str]) -> Self {
        Self {
            properties: GLOBAL_PROPERTIES.iter().chain(extra).copied().collect(),
        }
    }
}

impl PropertyCatalog for FixedCatalog {
    fn has_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }
}

/// An in-memory document and custom-element registry.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    defined: RwLock<HashSet<String>>,
    legacy_log: RwLock<Vec<String>>,
}

impl MemoryDocument {
    /// Creates an empty document with no custom definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a custom element.
    pub fn define(&self, name: impl Into<String>) {
        self.defined
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into());
    }

    /// Appends a registration to the deprecated registration log.
    pub fn register_legacy(&self, name: impl Into<String>) {
        self.legacy_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.into());
    }

    /// Creates an element the way the host parser would.
    ///
    /// The constructor kind follows from the tag: defined custom elements
    /// get an author constructor, known HTML tags a builtin one, valid
    /// custom-element names the base type, and anything else the unknown
    /// type. `local_name` is lowercased.
    pub fn create_element(&self, local_name: &str) -> MemoryElement {
        let local_name = local_name.to_lowercase();
        let constructor = if self.is_defined(&local_name) {
            ConstructorKind::Author
        } else if element_properties(&local_name).is_some()
            || content_contract(&local_name).is_some()
        {
            ConstructorKind::Builtin
        } else if is_valid_custom_element_name(&local_name) {
            ConstructorKind::HtmlElement
        } else {
            ConstructorKind::UnknownElement
        };
        MemoryElement {
            local_name,
            constructor,
            attributes: RwLock::new(Vec::new()),
        }
    }
}

impl Document for MemoryDocument {
    fn create_uncustomized(&self, local_name: &str) -> Arc<dyn PropertyCatalog> {
        Arc::new(FixedCatalog::new(element_properties(local_name).unwrap_or(&[])))
    }

    fn vanilla_element(&self) -> Arc<dyn PropertyCatalog> {
        Arc::new(FixedCatalog::new(&[]))
    }
}

impl ComponentRegistry for MemoryDocument {
    fn is_defined(&self, name: &str) -> bool {
        self.defined
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    fn legacy_registrations_from(&self, start: usize) -> Vec<String> {
        let log = self
            .legacy_log
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        log.get(start..).map(<[String]>::to_vec).unwrap_or_default()
    }
}

/// An element in a [`MemoryDocument`].
#[derive(Debug)]
pub struct MemoryElement {
    local_name: String,
    constructor: ConstructorKind,
    attributes: RwLock<Vec<(String, String)>>,
}

impl MemoryElement {
    /// Sets an attribute, builder style.
    pub fn with_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Sets or replaces an attribute. Names are case-insensitive.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let name = name.to_lowercase();
        let value = value.into();
        let mut attributes = self
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => attributes.push((name, value)),
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&self, name: &str) {
        let name = name.to_lowercase();
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != name);
    }
}

impl DomNode for MemoryElement {
    fn node_type(&self) -> NodeType {
        NodeType::Element
    }

    fn node_name(&self) -> String {
        self.local_name.to_uppercase()
    }

    fn as_element(&self) -> Option<&dyn DomElement> {
        Some(self)
    }

    fn parent_element(&self) -> Option<&dyn DomElement> {
        None
    }
}

impl DomElement for MemoryElement {
    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn constructor_kind(&self) -> ConstructorKind {
        self.constructor
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.clone())
    }
}

/// A text node, optionally attached to a parent element.
#[derive(Debug)]
pub struct MemoryText {
    parent: Option<Arc<MemoryElement>>,
}

impl MemoryText {
    /// Creates a text node under `parent`.
    pub fn new(parent: Arc<MemoryElement>) -> Self {
        Self {
            parent: Some(parent),
        }
    }

    /// Creates a detached text node.
    pub fn detached() -> Self {
        Self { parent: None }
    }
}

impl DomNode for MemoryText {
    fn node_type(&self) -> NodeType {
        NodeType::Text
    }

    fn node_name(&self) -> String {
        "#text".to_string()
    }

    fn as_element(&self) -> Option<&dyn DomElement> {
        None
    }

    fn parent_element(&self) -> Option<&dyn DomElement> {
        self.parent.as_deref().map(|parent| parent as &dyn DomElement)
    }
}

/// A comment node. Bindings never legitimately target one.
#[derive(Debug)]
pub struct MemoryComment {
    parent: Option<Arc<MemoryElement>>,
}

impl MemoryComment {
    /// Creates a comment under `parent`.
    pub fn new(parent: Arc<MemoryElement>) -> Self {
        Self {
            parent: Some(parent),
        }
    }
}

impl DomNode for MemoryComment {
    fn node_type(&self) -> NodeType {
        NodeType::Other
    }

    fn node_name(&self) -> String {
        "#comment".to_string()
    }

    fn as_element(&self) -> Option<&dyn DomElement> {
        None
    }

    fn parent_element(&self) -> Option<&dyn DomElement> {
        self.parent.as_deref().map(|parent| parent as &dyn DomElement)
    }
}
