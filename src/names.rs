//! Mapping between HTML attribute names and DOM property names.
//!
//! Most reflected properties are the camel-case form of their attribute, but
//! some are not: `class` reflects as `className`, and several properties
//! keep internal capitals (`tabIndex`) that a lowercase attribute name
//! cannot recover. Those exceptions live in fixed tables; everything else
//! uses the generic case conversions.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::strings::{to_camel_case, to_selector_case};

/// Attributes whose property name is not derived from the attribute name.
const ODD_ATTR_TO_PROP: &[(&str, &str)] = &[
    ("accept_charset", "acceptCharset"),
    ("char", "ch"),
    ("charoff", "chOff"),
    ("checked", "defaultChecked"),
    ("class", "className"),
    ("for", "htmlFor"),
    ("http_equiv", "httpEquiv"),
    ("muted", "defaultMuted"),
    ("selected", "defaultSelected"),
    ("value", "defaultValue"),
];

/// Properties with internal capitals whose attribute is all lowercase.
const NONCANON_PROPS: &[&str] = &[
    "aLink",
    "accessKey",
    "allowFullscreen",
    "bgColor",
    "cellPadding",
    "cellSpacing",
    "codeBase",
    "codeType",
    "contentEditable",
    "crossOrigin",
    "dateTime",
    "dirName",
    "formAction",
    "formEnctype",
    "formMethod",
    "formNoValidate",
    "formTarget",
    "frameBorder",
    "innerHTML",
    "innerText",
    "inputMode",
    "isMap",
    "longDesc",
    "marginHeight",
    "marginWidth",
    "maxLength",
    "mediaGroup",
    "minLength",
    "noHref",
    "noResize",
    "noShade",
    "noValidate",
    "noWrap",
    "nodeValue",
    "outerHTML",
    "outerText",
    "readOnly",
    "tabIndex",
    "textContent",
    "trueSpeed",
    "useMap",
    "vAlign",
    "vLink",
    "valueAsDate",
    "valueAsNumber",
    "valueType",
];

fn attr_to_prop() -> &'static HashMap<String, &'static str> {
    static MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map: HashMap<String, &'static str> = ODD_ATTR_TO_PROP
            .iter()
            .map(|(attr, prop)| (attr.to_string(), *prop))
            .collect();
        for prop in NONCANON_PROPS {
            map.insert(prop.to_lowercase(), *prop);
        }
        map
    })
}

fn prop_to_attr() -> &'static HashMap<&'static str, String> {
    static MAP: OnceLock<HashMap<&'static str, String>> = OnceLock::new();
    MAP.get_or_init(|| {
        attr_to_prop()
            .iter()
            .map(|(attr, prop)| (*prop, attr.clone()))
            .collect()
    })
}

/// Maps an attribute name to the property that reflects it.
///
/// # Examples
///
/// ```
/// use binding_guard::names::attr_to_property;
///
/// assert_eq!(attr_to_property("class"), "className");
/// assert_eq!(attr_to_property("TABINDEX"), "tabIndex");
/// assert_eq!(attr_to_property("aria-label"), "ariaLabel");
/// ```
pub fn attr_to_property(attr: &str) -> String {
    let canonical = attr.to_lowercase();
    match attr_to_prop().get(&canonical) {
        Some(prop) => (*prop).to_string(),
        None => to_camel_case(&canonical),
    }
}

/// Maps a property name to the attribute it reflects.
///
/// The inverse of [`attr_to_property`] for every name that function
/// produces.
///
/// # Examples
///
/// ```
/// use binding_guard::names::property_to_attr;
///
/// assert_eq!(property_to_attr("htmlFor"), "for");
/// assert_eq!(property_to_attr("innerHTML"), "innerhtml");
/// assert_eq!(property_to_attr("ariaLabel"), "aria-label");
/// ```
pub fn property_to_attr(prop: &str) -> String {
    match prop_to_attr().get(prop) {
        Some(attr) => attr.clone(),
        None => to_selector_case(prop),
    }
}

/// The property a mis-cased property name could end up reaching.
///
/// A binding to `tabindex` may reach `tabIndex` on some hosts, so the
/// sanitizer checks both. Returns `None` when the name has no special
/// spelling.
pub fn special_property_name_worst_case(name: &str) -> Option<&'static str> {
    attr_to_prop().get(&name.to_lowercase()).copied()
}
