//! The host document, seen through the few capabilities the sanitizer needs.
//!
//! The sanitizer never walks or mutates a tree. It asks a node what it is,
//! asks an element for a sibling attribute value, asks the document for an
//! uncustomized stand-in of a tag to learn which properties that tag
//! reflects, and asks the component registry whether a tag is author-defined.
//!
//! [`memory`] implements all of these for tests and for hosts without a
//! real document.

pub mod memory;

use std::sync::Arc;

/// The kinds of node a binding can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// An element.
    Element,
    /// A text node.
    Text,
    /// Anything else: comments, processing instructions, CDATA.
    Other,
}

/// How the runtime type of an element came to be.
///
/// This replaces comparing constructor display names: the host answers the
/// question directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructorKind {
    /// A platform element type such as an anchor or a table cell.
    Builtin,
    /// The platform's fallback type for unrecognized tags.
    UnknownElement,
    /// The plain base element type. Undefined custom-element names get this
    /// until a definition upgrades them.
    HtmlElement,
    /// An author-defined class.
    Author,
}

/// A node in the host tree.
pub trait DomNode: Send + Sync {
    /// The kind of node.
    fn node_type(&self) -> NodeType;

    /// The host's display name: the uppercase tag for HTML elements,
    /// `#text` for text nodes.
    fn node_name(&self) -> String;

    /// This node as an element, if it is one.
    fn as_element(&self) -> Option<&dyn DomElement>;

    /// The parent, if it is an element.
    fn parent_element(&self) -> Option<&dyn DomElement>;
}

/// An element in the host tree.
pub trait DomElement: DomNode {
    /// The canonical lowercase tag name.
    fn local_name(&self) -> &str;

    /// What kind of constructor created this element.
    fn constructor_kind(&self) -> ConstructorKind;

    /// Reads the current value of an attribute.
    fn get_attribute(&self, name: &str) -> Option<String>;
}

/// Answers whether a property is reflected by some element type.
pub trait PropertyCatalog: Send + Sync {
    /// Returns `true` if `name` is a property of this element, including
    /// inherited ones.
    fn has_property(&self, name: &str) -> bool;
}

/// Creates reference elements for property checks.
pub trait Document: Send + Sync {
    /// Returns an element of type `local_name` that has not been customized
    /// by author code.
    fn create_uncustomized(&self, local_name: &str) -> Arc<dyn PropertyCatalog>;

    /// Returns an element that has only the global element properties.
    fn vanilla_element(&self) -> Arc<dyn PropertyCatalog>;
}

/// The host's registry of author-defined elements.
pub trait ComponentRegistry: Send + Sync {
    /// Returns `true` if `name` has a current definition.
    fn is_defined(&self, name: &str) -> bool;

    /// Returns the names registered through a deprecated registration
    /// mechanism, starting at index `start` of its append-only log.
    ///
    /// Hosts without such a mechanism keep the default, which reports none.
    fn legacy_registrations_from(&self, start: usize) -> Vec<String> {
        let _ = start;
        Vec::new()
    }
}
