//! Report event schema.

use std::fmt;

use super::{format_template, ATTRIBUTE_VIOLATION_TEMPLATE, INITIALIZED, TEXT_VIOLATION_TEMPLATE};
use crate::contracts::AttrType;

/// Where a rejected binding was headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Text content, or another non-element node.
    Text,
    /// An attribute or property of an element.
    Attribute,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Text => write!(f, "text"),
            ViolationKind::Attribute => write!(f, "attribute"),
        }
    }
}

/// A binding the sanitizer refused.
///
/// The offending value is recorded in its host string form so that the
/// report can be logged; it is never applied to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationReport {
    kind: ViolationKind,
    /// Element name, or the parent's node name for text
    element: Option<String>,
    /// Node name of the target, e.g. `#text`
    node_name: String,
    /// Canonical attribute name; `None` for text
    attribute: Option<String>,
    value: String,
    /// The contract that rejected the value; `None` when it was
    /// indeterminate or the node was not an element
    contract: Option<AttrType>,
}

impl ViolationReport {
    pub(crate) fn for_text(
        parent_name: Option<String>,
        node_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: ViolationKind::Text,
            element: parent_name,
            node_name: node_name.into(),
            attribute: None,
            value: value.into(),
            contract: None,
        }
    }

    pub(crate) fn for_attribute(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let element = element.into();
        Self {
            kind: ViolationKind::Attribute,
            node_name: element.clone(),
            element: Some(element),
            attribute: Some(attribute.into()),
            value: value.into(),
            contract: None,
        }
    }

    pub(crate) fn with_contract(mut self, contract: Option<AttrType>) -> Self {
        self.contract = contract;
        self
    }

    /// Returns what the binding targeted.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Returns the element name (for text, the parent's node name).
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Returns the node name of the target.
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Returns the attribute name, for attribute violations.
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the rejected value in string form.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the contract the value failed, if one was resolved.
    pub fn contract(&self) -> Option<AttrType> {
        self.contract
    }
}

/// An event delivered to a [`ReportHandler`](super::ReportHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// The sanitizer was built and is ready.
    Initialized,
    /// A binding was refused.
    Violation(ViolationReport),
}

impl ReportEvent {
    /// Returns `true` for violations, `false` for status messages.
    pub fn is_violation(&self) -> bool {
        matches!(self, ReportEvent::Violation(_))
    }

    /// Returns the violation, if this is one.
    pub fn violation(&self) -> Option<&ViolationReport> {
        match self {
            ReportEvent::Violation(violation) => Some(violation),
            ReportEvent::Initialized => None,
        }
    }

    /// Returns the printf-style template of this event.
    pub fn template(&self) -> &'static str {
        match self {
            ReportEvent::Initialized => INITIALIZED,
            ReportEvent::Violation(v) => match v.kind {
                ViolationKind::Text => TEXT_VIOLATION_TEMPLATE,
                ViolationKind::Attribute => ATTRIBUTE_VIOLATION_TEMPLATE,
            },
        }
    }

    /// Returns the template arguments.
    ///
    /// A text violation without a parent reports `null` as the parent name.
    pub fn args(&self) -> Vec<String> {
        match self {
            ReportEvent::Initialized => Vec::new(),
            ReportEvent::Violation(v) => {
                let element = v.element.clone().unwrap_or_else(|| "null".to_string());
                match v.kind {
                    ViolationKind::Text => vec![
                        element,
                        v.node_name.clone(),
                        String::new(),
                        v.value.clone(),
                    ],
                    ViolationKind::Attribute => vec![
                        element.clone(),
                        element,
                        v.attribute.clone().unwrap_or_default(),
                        v.value.clone(),
                    ],
                }
            }
        }
    }

    /// Returns the template with its arguments substituted.
    pub fn message(&self) -> String {
        format_template(self.template(), &self.args())
    }
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_violation_message() {
        let event = ReportEvent::Violation(
            ViolationReport::for_attribute("a", "href", "javascript:alert(1)")
                .with_contract(Some(AttrType::SafeUrl)),
        );
        assert!(event.is_violation());
        assert_eq!(event.template(), ATTRIBUTE_VIOLATION_TEMPLATE);
        assert_eq!(
            event.message(),
            "Failed to sanitize attribute of <a>: <a href=\"javascript:alert(1)\">"
        );
        assert_eq!(event.violation().and_then(|v| v.contract()), Some(AttrType::SafeUrl));
    }

    #[test]
    fn text_violation_message() {
        let event = ReportEvent::Violation(ViolationReport::for_text(
            Some("SCRIPT".to_string()),
            "#text",
            "alert(1)",
        ));
        assert_eq!(event.args(), vec!["SCRIPT", "#text", "", "alert(1)"]);
        assert_eq!(
            event.to_string(),
            "Failed to sanitize SCRIPT #text node to value alert(1)"
        );
    }

    #[test]
    fn parentless_text_reports_null() {
        let event = ReportEvent::Violation(ViolationReport::for_text(None, "#comment", "x"));
        assert_eq!(event.args()[0], "null");
    }

    #[test]
    fn initialized_is_not_a_violation() {
        let event = ReportEvent::Initialized;
        assert!(!event.is_violation());
        assert!(event.violation().is_none());
        assert_eq!(event.message(), "initialized");
        assert!(event.args().is_empty());
    }

    #[test]
    fn accessors() {
        let report = ViolationReport::for_attribute("link", "href", "x");
        assert_eq!(report.kind(), ViolationKind::Attribute);
        assert_eq!(report.element(), Some("link"));
        assert_eq!(report.node_name(), "link");
        assert_eq!(report.attribute(), Some("href"));
        assert_eq!(report.value(), "x");
        assert_eq!(report.contract(), None);
    }
}
