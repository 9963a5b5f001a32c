//! The contract registry: what each HTML attribute and element may carry.
//!
//! All data is immutable and lives in [`tables`]. The functions here answer
//! three questions:
//!
//! - [`lookup_attribute`]: which [`AttrType`] governs an attribute on an
//!   element, taking contingent contracts into account
//! - [`content_contract`]: what text children of an element may contain
//! - [`enum_allowed`]: whether a keyword is legal for an enumerated attribute

mod tables;

use std::fmt;

/// The safety contract of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    /// Any string.
    None,
    /// Safe markup.
    SafeHtml,
    /// A URL safe to navigate to.
    SafeUrl,
    /// A URL whose resource is loaded and executed.
    TrustedResourceUrl,
    /// Safe CSS declarations.
    SafeStyle,
    /// Safe script source.
    SafeScript,
    /// One of a fixed set of keywords.
    Enum,
    /// A compile-time constant.
    CompileTimeConstant,
    /// A constant prefix followed by a variable suffix.
    Identifier,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttrType::None => "NONE",
            AttrType::SafeHtml => "SAFE_HTML",
            AttrType::SafeUrl => "SAFE_URL",
            AttrType::TrustedResourceUrl => "TRUSTED_RESOURCE_URL",
            AttrType::SafeStyle => "SAFE_STYLE",
            AttrType::SafeScript => "SAFE_SCRIPT",
            AttrType::Enum => "ENUM",
            AttrType::CompileTimeConstant => "COMPILE_TIME_CONSTANT",
            AttrType::Identifier => "IDENTIFIER",
        };
        f.write_str(name)
    }
}

/// What text children of an element may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementContentType {
    /// No contract was specified.
    Unspecified,
    /// Markup. The common case.
    SafeHtml,
    /// A stylesheet.
    SafeStylesheet,
    /// Script source.
    SafeScript,
    /// The element is disallowed entirely.
    Blacklist,
    /// A void element: attributes only, no content.
    Void,
    /// Text in an RCDATA context.
    StringRcdata,
}

impl ElementContentType {
    /// Returns `true` if interpolated text may appear inside such an element.
    pub fn allows_text(self) -> bool {
        matches!(
            self,
            ElementContentType::SafeHtml | ElementContentType::StringRcdata
        )
    }
}

/// A sibling attribute value that an [`AttributeContract`] depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contingency {
    attribute: &'static str,
    value: &'static str,
}

impl Contingency {
    /// The sibling attribute that is consulted.
    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    /// The exact value the sibling must have.
    pub fn value(&self) -> &'static str {
        self.value
    }
}

/// One entry of an element-specific contract list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeContract {
    contract: AttrType,
    contingency: Option<Contingency>,
}

impl AttributeContract {
    /// The contract that applies when this entry matches.
    pub fn contract(&self) -> AttrType {
        self.contract
    }

    /// The sibling value this entry depends on, if any.
    pub fn contingency(&self) -> Option<Contingency> {
        self.contingency
    }
}

/// The outcome of resolving an attribute contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeLookup {
    /// A contract applies.
    Known(AttrType),
    /// The attribute appears in no table. Treated as [`AttrType::None`].
    Unlisted,
    /// Element-specific contracts depend on a sibling value that is not yet
    /// known, so neither they nor the global default can be trusted.
    Indeterminate,
    /// No contract admits any value: an event handler missing from the
    /// tables, or element text written through a property where text is not
    /// allowed.
    Rejected,
}

impl AttributeLookup {
    /// Collapses the lookup to a contract, `None` meaning unknown.
    pub fn known(self) -> Option<AttrType> {
        match self {
            AttributeLookup::Known(contract) => Some(contract),
            AttributeLookup::Unlisted
            | AttributeLookup::Indeterminate
            | AttributeLookup::Rejected => None,
        }
    }
}

fn search<'a, T>(rows: &'a [(&'static str, T)], key: &str) -> Option<&'a T> {
    rows.binary_search_by(|(name, _)| (*name).cmp(key))
        .ok()
        .map(|index| &rows[index].1)
}

/// Returns the element-specific contract list for `(element, attribute)`.
///
/// Both names must be canonical lowercase.
pub fn element_contracts(element: &str, attribute: &str) -> Option<&'static [AttributeContract]> {
    search(tables::ELEMENT_CONTRACTS, element)
        .and_then(|attributes| search(attributes, attribute))
        .copied()
}

/// Returns the global contract for `attribute`, ignoring the element.
pub fn global_contract(attribute: &str) -> Option<AttrType> {
    search(tables::GLOBAL_ATTRIBUTES, attribute).copied()
}

/// Resolves the contract for `attribute` on `element`.
///
/// Element-specific entries are tried in declared order. An unconditional
/// entry wins immediately; a contingent entry wins when `sibling_value`
/// returns exactly its required value. Each sibling is read at most once.
///
/// When no entry matches and some sibling value was unknown (`None`), the
/// result is [`AttributeLookup::Indeterminate`] and the global table is not
/// consulted. Otherwise the global table decides.
///
/// Some names missing from the global table are still sinks. `innerhtml` and
/// `outerhtml` carry markup. The text sinks (`text`, `textcontent`,
/// `innertext`, `outertext`) follow the element's [`content_contract`]:
/// script on `<script>`, anything where text is allowed or the element is
/// unlisted, and nothing elsewhere. Event handlers (`on...`) missing from the
/// tables are [`AttributeLookup::Rejected`]. Any other name is
/// [`AttributeLookup::Unlisted`].
///
/// # Examples
///
/// ```
/// use binding_guard::contracts::{lookup_attribute, AttrType, AttributeLookup};
///
/// let rel = |value: &'static str| move |name: &str| (name == "rel").then(|| value.to_string());
///
/// assert_eq!(
///     lookup_attribute("link", "href", rel("icon")),
///     AttributeLookup::Known(AttrType::SafeUrl)
/// );
/// assert_eq!(
///     lookup_attribute("link", "href", |_: &str| None),
///     AttributeLookup::Indeterminate
/// );
/// assert_eq!(
///     lookup_attribute("div", "data-x", |_: &str| None),
///     AttributeLookup::Unlisted
/// );
/// assert_eq!(
///     lookup_attribute("div", "innerhtml", |_: &str| None),
///     AttributeLookup::Known(AttrType::SafeHtml)
/// );
/// ```
pub fn lookup_attribute<F>(element: &str, attribute: &str, mut sibling_value: F) -> AttributeLookup
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(contracts) = element_contracts(element, attribute) {
        let mut cache: Vec<(&'static str, Option<String>)> = Vec::new();
        let mut value_unknown = false;

        for entry in contracts {
            let Some(contingency) = entry.contingency else {
                return AttributeLookup::Known(entry.contract);
            };

            let index = match cache.iter().position(|(name, _)| *name == contingency.attribute) {
                Some(index) => index,
                None => {
                    cache.push((contingency.attribute, sibling_value(contingency.attribute)));
                    cache.len() - 1
                }
            };

            match cache[index].1.as_deref() {
                Some(actual) if actual == contingency.value => {
                    return AttributeLookup::Known(entry.contract);
                }
                Some(_) => {}
                None => value_unknown = true,
            }
        }

        if value_unknown {
            return AttributeLookup::Indeterminate;
        }
    }

    match global_contract(attribute) {
        Some(contract) => AttributeLookup::Known(contract),
        None => unlisted_sink(element, attribute),
    }
}

const MARKUP_SINKS: &[&str] = &["innerhtml", "outerhtml"];

const TEXT_SINKS: &[&str] = &["innertext", "outertext", "text", "textcontent"];

fn unlisted_sink(element: &str, attribute: &str) -> AttributeLookup {
    if MARKUP_SINKS.contains(&attribute) {
        return AttributeLookup::Known(AttrType::SafeHtml);
    }
    if TEXT_SINKS.contains(&attribute) {
        return match content_contract(element) {
            None => AttributeLookup::Unlisted,
            Some(ElementContentType::SafeScript) => AttributeLookup::Known(AttrType::SafeScript),
            Some(content) if content.allows_text() => AttributeLookup::Unlisted,
            Some(_) => AttributeLookup::Rejected,
        };
    }
    if is_event_handler(attribute) {
        return AttributeLookup::Rejected;
    }
    AttributeLookup::Unlisted
}

/// `on` followed by at least one ASCII letter: `onclick`, `onerror`, ...
fn is_event_handler(attribute: &str) -> bool {
    attribute
        .strip_prefix("on")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_lowercase()))
}

/// Like [`lookup_attribute`], but collapses unlisted, indeterminate and
/// rejected results to `None`.
pub fn attribute_contract<F>(element: &str, attribute: &str, sibling_value: F) -> Option<AttrType>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup_attribute(element, attribute, sibling_value).known()
}

/// Returns what text children of `element` may contain, if the element is
/// listed.
pub fn content_contract(element: &str) -> Option<ElementContentType> {
    search(tables::ELEMENT_CONTENT_TYPES, element).copied()
}

fn enum_set_index(element: &str, attribute: &str) -> Option<usize> {
    search(tables::ENUM_VALUE_SET_BY_ATTR, element)
        .and_then(|attributes| search(attributes, attribute))
        .copied()
}

/// Returns `true` if `value` is a legal keyword for the enumerated
/// `attribute` on `element`.
///
/// The element-specific set is consulted first, then the `*` set. Values
/// compare case-insensitively. Any lookup miss yields `false`, including
/// attributes that are not enumerated at all.
///
/// # Examples
///
/// ```
/// use binding_guard::contracts::enum_allowed;
///
/// assert!(enum_allowed("a", "target", "_BLANK"));
/// assert!(!enum_allowed("a", "target", "_top"));
/// assert!(!enum_allowed("a", "href", "_blank"));
/// ```
pub fn enum_allowed(element: &str, attribute: &str, value: &str) -> bool {
    let Some(index) = enum_set_index(element, attribute).or_else(|| enum_set_index("*", attribute))
    else {
        return false;
    };
    let value = value.to_lowercase();
    tables::ENUM_VALUE_SETS
        .get(index)
        .is_some_and(|set| set.contains(&value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_siblings(_: &str) -> Option<String> {
        None
    }

    fn rel(value: &'static str) -> impl FnMut(&str) -> Option<String> {
        move |name| (name == "rel").then(|| value.to_string())
    }

    #[test]
    fn element_contract_beats_global() {
        assert_eq!(
            lookup_attribute("a", "href", no_siblings),
            AttributeLookup::Known(AttrType::SafeUrl)
        );
        assert_eq!(
            lookup_attribute("div", "href", no_siblings),
            AttributeLookup::Known(AttrType::TrustedResourceUrl)
        );
    }

    #[test]
    fn global_contracts() {
        assert_eq!(global_contract("style"), Some(AttrType::SafeStyle));
        assert_eq!(global_contract("src"), Some(AttrType::TrustedResourceUrl));
        assert_eq!(global_contract("id"), Some(AttrType::Identifier));
        assert_eq!(global_contract("dir"), Some(AttrType::Enum));
        assert_eq!(global_contract("title"), Some(AttrType::None));
        assert_eq!(global_contract("onclick"), None);
    }

    #[test]
    fn iframe_srcdoc_needs_html() {
        assert_eq!(
            attribute_contract("iframe", "srcdoc", no_siblings),
            Some(AttrType::SafeHtml)
        );
    }

    #[test]
    fn matching_contingency_wins() {
        for value in ["alternate", "icon", "search", "subresource"] {
            assert_eq!(
                lookup_attribute("link", "href", rel(value)),
                AttributeLookup::Known(AttrType::SafeUrl),
                "rel={value}"
            );
        }
    }

    #[test]
    fn known_mismatch_falls_back_to_global() {
        assert_eq!(
            lookup_attribute("link", "href", rel("stylesheet")),
            AttributeLookup::Known(AttrType::TrustedResourceUrl)
        );
    }

    #[test]
    fn contingency_comparison_is_exact() {
        assert_eq!(
            lookup_attribute("link", "href", rel("Icon")),
            AttributeLookup::Known(AttrType::TrustedResourceUrl)
        );
    }

    #[test]
    fn unknown_sibling_is_indeterminate() {
        assert_eq!(
            lookup_attribute("link", "href", no_siblings),
            AttributeLookup::Indeterminate
        );
        assert_eq!(attribute_contract("link", "href", no_siblings), None);
    }

    #[test]
    fn sibling_is_read_once() {
        let mut calls = 0;
        let result = lookup_attribute("link", "href", |name: &str| {
            calls += 1;
            (name == "rel").then(|| "stylesheet".to_string())
        });
        assert_eq!(result, AttributeLookup::Known(AttrType::TrustedResourceUrl));
        assert_eq!(calls, 1);
    }

    #[test]
    fn unconditional_entries_ignore_siblings() {
        let mut calls = 0;
        let result = lookup_attribute("link", "media", |_: &str| {
            calls += 1;
            None
        });
        assert_eq!(result, AttributeLookup::Known(AttrType::None));
        assert_eq!(calls, 0);
    }

    #[test]
    fn unlisted_attributes() {
        assert_eq!(
            lookup_attribute("div", "data-anything", no_siblings),
            AttributeLookup::Unlisted
        );
        assert_eq!(
            lookup_attribute("my-element", "one-way", no_siblings),
            AttributeLookup::Unlisted
        );
    }

    #[test]
    fn unlisted_event_handlers_are_rejected() {
        for name in ["onclick", "onerror", "onmouseover"] {
            assert_eq!(
                lookup_attribute("img", name, no_siblings),
                AttributeLookup::Rejected,
                "{name}"
            );
            assert_eq!(attribute_contract("img", name, no_siblings), None);
        }
        assert_eq!(
            lookup_attribute("div", "on", no_siblings),
            AttributeLookup::Unlisted
        );
    }

    #[test]
    fn markup_sinks_carry_html() {
        for element in ["div", "span", "my-element", "script"] {
            for name in ["innerhtml", "outerhtml"] {
                assert_eq!(
                    lookup_attribute(element, name, no_siblings),
                    AttributeLookup::Known(AttrType::SafeHtml),
                    "<{element} {name}>"
                );
            }
        }
    }

    #[test]
    fn text_sinks_follow_element_content() {
        for name in ["text", "textcontent", "innertext", "outertext"] {
            assert_eq!(
                lookup_attribute("script", name, no_siblings),
                AttributeLookup::Known(AttrType::SafeScript),
                "<script {name}>"
            );
            assert_eq!(
                lookup_attribute("style", name, no_siblings),
                AttributeLookup::Rejected,
                "<style {name}>"
            );
            assert_eq!(
                lookup_attribute("template", name, no_siblings),
                AttributeLookup::Rejected,
                "<template {name}>"
            );
            assert_eq!(
                lookup_attribute("div", name, no_siblings),
                AttributeLookup::Unlisted,
                "<div {name}>"
            );
            assert_eq!(
                lookup_attribute("textarea", name, no_siblings),
                AttributeLookup::Unlisted,
                "<textarea {name}>"
            );
            assert_eq!(
                lookup_attribute("my-element", name, no_siblings),
                AttributeLookup::Unlisted,
                "<my-element {name}>"
            );
        }
    }

    #[test]
    fn content_contracts() {
        assert_eq!(content_contract("div"), Some(ElementContentType::SafeHtml));
        assert_eq!(content_contract("script"), Some(ElementContentType::SafeScript));
        assert_eq!(content_contract("style"), Some(ElementContentType::SafeStylesheet));
        assert_eq!(content_contract("template"), Some(ElementContentType::Blacklist));
        assert_eq!(content_contract("title"), Some(ElementContentType::StringRcdata));
        assert_eq!(content_contract("br"), Some(ElementContentType::Void));
        assert_eq!(content_contract("my-element"), None);
    }

    #[test]
    fn only_html_and_rcdata_allow_text() {
        assert!(ElementContentType::SafeHtml.allows_text());
        assert!(ElementContentType::StringRcdata.allows_text());
        for denied in [
            ElementContentType::Unspecified,
            ElementContentType::SafeStylesheet,
            ElementContentType::SafeScript,
            ElementContentType::Blacklist,
            ElementContentType::Void,
        ] {
            assert!(!denied.allows_text());
        }
    }

    #[test]
    fn enum_values() {
        assert!(enum_allowed("div", "dir", "RTL"));
        assert!(enum_allowed("span", "dir", "auto"));
        assert!(!enum_allowed("span", "dir", "up"));
        assert!(enum_allowed("form", "target", "_self"));
        assert!(!enum_allowed("form", "target", "_parent"));
    }

    #[test]
    fn enum_rejects_inherited_looking_names() {
        assert!(!enum_allowed("div", "dir", "constructor"));
        assert!(!enum_allowed("div", "__proto__", "auto"));
        assert!(!enum_allowed("div", "toString", "auto"));
    }

    #[test]
    fn display_uses_contract_names() {
        assert_eq!(AttrType::TrustedResourceUrl.to_string(), "TRUSTED_RESOURCE_URL");
        assert_eq!(AttrType::None.to_string(), "NONE");
    }
}
