//! Static contract data.
//!
//! Every table is sorted by its key so lookups can binary search. The
//! `tables_are_sorted` test guards that.

use super::{AttrType, AttributeContract, ElementContentType};

const fn always(contract: AttrType) -> AttributeContract {
    AttributeContract {
        contract,
        contingency: None,
    }
}

const fn when_rel(value: &'static str) -> AttributeContract {
    AttributeContract {
        contract: AttrType::SafeUrl,
        contingency: Some(super::Contingency {
            attribute: "rel",
            value,
        }),
    }
}

const NONE: &[AttributeContract] = &[always(AttrType::None)];
const SAFE_URL: &[AttributeContract] = &[always(AttrType::SafeUrl)];
const SAFE_HTML: &[AttributeContract] = &[always(AttrType::SafeHtml)];

/// `<link href>` navigates for these link types. Any other `rel` loads a
/// resource and falls through to the global `href` contract.
const LINK_HREF: &[AttributeContract] = &[
    when_rel("alternate"),
    when_rel("author"),
    when_rel("bookmark"),
    when_rel("canonical"),
    when_rel("cite"),
    when_rel("help"),
    when_rel("icon"),
    when_rel("license"),
    when_rel("next"),
    when_rel("prefetch"),
    when_rel("prerender"),
    when_rel("preconnect"),
    when_rel("preload"),
    when_rel("prev"),
    when_rel("search"),
    when_rel("subresource"),
];

/// Contracts that apply on every element without a more specific entry.
pub(super) static GLOBAL_ATTRIBUTES: &[(&str, AttrType)] = &[
    ("align", AttrType::None),
    ("alt", AttrType::None),
    ("aria-activedescendant", AttrType::Identifier),
    ("aria-atomic", AttrType::None),
    ("aria-autocomplete", AttrType::None),
    ("aria-busy", AttrType::None),
    ("aria-checked", AttrType::None),
    ("aria-disabled", AttrType::None),
    ("aria-dropeffect", AttrType::None),
    ("aria-expanded", AttrType::None),
    ("aria-haspopup", AttrType::None),
    ("aria-hidden", AttrType::None),
    ("aria-invalid", AttrType::None),
    ("aria-label", AttrType::None),
    ("aria-level", AttrType::None),
    ("aria-live", AttrType::None),
    ("aria-multiline", AttrType::None),
    ("aria-multiselectable", AttrType::None),
    ("aria-orientation", AttrType::None),
    ("aria-posinset", AttrType::None),
    ("aria-pressed", AttrType::None),
    ("aria-readonly", AttrType::None),
    ("aria-relevant", AttrType::None),
    ("aria-required", AttrType::None),
    ("aria-selected", AttrType::None),
    ("aria-setsize", AttrType::None),
    ("aria-sort", AttrType::None),
    ("aria-valuemax", AttrType::None),
    ("aria-valuemin", AttrType::None),
    ("aria-valuenow", AttrType::None),
    ("aria-valuetext", AttrType::None),
    ("autocapitalize", AttrType::None),
    ("autocomplete", AttrType::None),
    ("autocorrect", AttrType::None),
    ("autofocus", AttrType::None),
    ("bgcolor", AttrType::None),
    ("border", AttrType::None),
    ("checked", AttrType::None),
    ("class", AttrType::None),
    ("color", AttrType::None),
    ("cols", AttrType::None),
    ("colspan", AttrType::None),
    ("dir", AttrType::Enum),
    ("disabled", AttrType::None),
    ("draggable", AttrType::None),
    ("face", AttrType::None),
    ("for", AttrType::Identifier),
    ("frameborder", AttrType::None),
    ("height", AttrType::None),
    ("hidden", AttrType::None),
    ("href", AttrType::TrustedResourceUrl),
    ("hreflang", AttrType::None),
    ("id", AttrType::Identifier),
    ("ismap", AttrType::None),
    ("label", AttrType::None),
    ("lang", AttrType::None),
    ("list", AttrType::Identifier),
    ("loop", AttrType::None),
    ("max", AttrType::None),
    ("maxlength", AttrType::None),
    ("min", AttrType::None),
    ("multiple", AttrType::None),
    ("muted", AttrType::None),
    ("name", AttrType::Identifier),
    ("placeholder", AttrType::None),
    ("preload", AttrType::None),
    ("rel", AttrType::None),
    ("required", AttrType::None),
    ("reversed", AttrType::None),
    ("role", AttrType::None),
    ("rows", AttrType::None),
    ("rowspan", AttrType::None),
    ("selected", AttrType::None),
    ("shape", AttrType::None),
    ("size", AttrType::None),
    ("sizes", AttrType::None),
    ("span", AttrType::None),
    ("spellcheck", AttrType::None),
    ("src", AttrType::TrustedResourceUrl),
    ("start", AttrType::None),
    ("step", AttrType::None),
    ("style", AttrType::SafeStyle),
    ("summary", AttrType::None),
    ("tabindex", AttrType::None),
    ("target", AttrType::Enum),
    ("title", AttrType::None),
    ("translate", AttrType::None),
    ("valign", AttrType::None),
    ("value", AttrType::None),
    ("width", AttrType::None),
    ("wrap", AttrType::None),
];

/// Per-element attribute contracts, keyed by element then attribute.
pub(super) static ELEMENT_CONTRACTS: &[(&str, &[(&str, &[AttributeContract])])] = &[
    ("a", &[("href", SAFE_URL)]),
    ("area", &[("href", SAFE_URL)]),
    ("audio", &[("src", SAFE_URL)]),
    ("blockquote", &[("cite", SAFE_URL)]),
    (
        "button",
        &[("formaction", SAFE_URL), ("formmethod", NONE), ("type", NONE)],
    ),
    ("command", &[("type", NONE)]),
    ("del", &[("cite", SAFE_URL)]),
    ("form", &[("action", SAFE_URL), ("method", NONE)]),
    ("iframe", &[("srcdoc", SAFE_HTML)]),
    ("img", &[("src", SAFE_URL)]),
    (
        "input",
        &[
            ("formaction", SAFE_URL),
            ("formmethod", NONE),
            ("pattern", NONE),
            ("readonly", NONE),
            ("src", SAFE_URL),
            ("type", NONE),
        ],
    ),
    ("ins", &[("cite", SAFE_URL)]),
    ("li", &[("type", NONE)]),
    (
        "link",
        &[
            ("href", LINK_HREF),
            ("media", NONE),
            ("nonce", NONE),
            ("type", NONE),
        ],
    ),
    ("menuitem", &[("icon", SAFE_URL)]),
    ("ol", &[("type", NONE)]),
    ("q", &[("cite", SAFE_URL)]),
    ("script", &[("nonce", NONE)]),
    ("source", &[("media", NONE), ("src", SAFE_URL)]),
    ("style", &[("media", NONE), ("nonce", NONE)]),
    ("time", &[("datetime", NONE)]),
    (
        "video",
        &[
            ("autoplay", NONE),
            ("controls", NONE),
            ("poster", SAFE_URL),
            ("src", SAFE_URL),
        ],
    ),
];

/// What text children of each element may contain.
pub(super) static ELEMENT_CONTENT_TYPES: &[(&str, ElementContentType)] = &[
    ("a", ElementContentType::SafeHtml),
    ("abbr", ElementContentType::SafeHtml),
    ("address", ElementContentType::SafeHtml),
    ("applet", ElementContentType::Blacklist),
    ("area", ElementContentType::Void),
    ("article", ElementContentType::SafeHtml),
    ("aside", ElementContentType::SafeHtml),
    ("audio", ElementContentType::SafeHtml),
    ("b", ElementContentType::SafeHtml),
    ("base", ElementContentType::Blacklist),
    ("bdi", ElementContentType::SafeHtml),
    ("bdo", ElementContentType::SafeHtml),
    ("blockquote", ElementContentType::SafeHtml),
    ("body", ElementContentType::SafeHtml),
    ("br", ElementContentType::Void),
    ("button", ElementContentType::SafeHtml),
    ("canvas", ElementContentType::SafeHtml),
    ("caption", ElementContentType::SafeHtml),
    ("cite", ElementContentType::SafeHtml),
    ("code", ElementContentType::SafeHtml),
    ("col", ElementContentType::Void),
    ("colgroup", ElementContentType::SafeHtml),
    ("command", ElementContentType::SafeHtml),
    ("data", ElementContentType::SafeHtml),
    ("datalist", ElementContentType::SafeHtml),
    ("dd", ElementContentType::SafeHtml),
    ("del", ElementContentType::SafeHtml),
    ("details", ElementContentType::SafeHtml),
    ("dfn", ElementContentType::SafeHtml),
    ("dialog", ElementContentType::SafeHtml),
    ("div", ElementContentType::SafeHtml),
    ("dl", ElementContentType::SafeHtml),
    ("dt", ElementContentType::SafeHtml),
    ("em", ElementContentType::SafeHtml),
    ("embed", ElementContentType::Blacklist),
    ("fieldset", ElementContentType::SafeHtml),
    ("figcaption", ElementContentType::SafeHtml),
    ("figure", ElementContentType::SafeHtml),
    ("font", ElementContentType::SafeHtml),
    ("footer", ElementContentType::SafeHtml),
    ("form", ElementContentType::SafeHtml),
    ("frame", ElementContentType::SafeHtml),
    ("frameset", ElementContentType::SafeHtml),
    ("h1", ElementContentType::SafeHtml),
    ("h2", ElementContentType::SafeHtml),
    ("h3", ElementContentType::SafeHtml),
    ("h4", ElementContentType::SafeHtml),
    ("h5", ElementContentType::SafeHtml),
    ("h6", ElementContentType::SafeHtml),
    ("head", ElementContentType::SafeHtml),
    ("header", ElementContentType::SafeHtml),
    ("hr", ElementContentType::Void),
    ("html", ElementContentType::SafeHtml),
    ("i", ElementContentType::SafeHtml),
    ("iframe", ElementContentType::SafeHtml),
    ("img", ElementContentType::Void),
    ("input", ElementContentType::Void),
    ("ins", ElementContentType::SafeHtml),
    ("kbd", ElementContentType::SafeHtml),
    ("keygen", ElementContentType::Void),
    ("label", ElementContentType::SafeHtml),
    ("legend", ElementContentType::SafeHtml),
    ("li", ElementContentType::SafeHtml),
    ("link", ElementContentType::Void),
    ("main", ElementContentType::SafeHtml),
    ("map", ElementContentType::SafeHtml),
    ("mark", ElementContentType::SafeHtml),
    ("math", ElementContentType::Blacklist),
    ("menu", ElementContentType::SafeHtml),
    ("menuitem", ElementContentType::SafeHtml),
    ("meta", ElementContentType::Blacklist),
    ("meter", ElementContentType::SafeHtml),
    ("nav", ElementContentType::SafeHtml),
    ("noscript", ElementContentType::SafeHtml),
    ("object", ElementContentType::Blacklist),
    ("ol", ElementContentType::SafeHtml),
    ("optgroup", ElementContentType::SafeHtml),
    ("option", ElementContentType::SafeHtml),
    ("output", ElementContentType::SafeHtml),
    ("p", ElementContentType::SafeHtml),
    ("param", ElementContentType::Void),
    ("picture", ElementContentType::SafeHtml),
    ("pre", ElementContentType::SafeHtml),
    ("progress", ElementContentType::SafeHtml),
    ("q", ElementContentType::SafeHtml),
    ("rb", ElementContentType::SafeHtml),
    ("rp", ElementContentType::SafeHtml),
    ("rt", ElementContentType::SafeHtml),
    ("rtc", ElementContentType::SafeHtml),
    ("ruby", ElementContentType::SafeHtml),
    ("s", ElementContentType::SafeHtml),
    ("samp", ElementContentType::SafeHtml),
    ("script", ElementContentType::SafeScript),
    ("section", ElementContentType::SafeHtml),
    ("select", ElementContentType::SafeHtml),
    ("slot", ElementContentType::SafeHtml),
    ("small", ElementContentType::SafeHtml),
    ("source", ElementContentType::Void),
    ("span", ElementContentType::SafeHtml),
    ("strong", ElementContentType::SafeHtml),
    ("style", ElementContentType::SafeStylesheet),
    ("sub", ElementContentType::SafeHtml),
    ("summary", ElementContentType::SafeHtml),
    ("sup", ElementContentType::SafeHtml),
    ("svg", ElementContentType::Blacklist),
    ("table", ElementContentType::SafeHtml),
    ("tbody", ElementContentType::SafeHtml),
    ("td", ElementContentType::SafeHtml),
    ("template", ElementContentType::Blacklist),
    ("textarea", ElementContentType::StringRcdata),
    ("tfoot", ElementContentType::SafeHtml),
    ("th", ElementContentType::SafeHtml),
    ("thead", ElementContentType::SafeHtml),
    ("time", ElementContentType::SafeHtml),
    ("title", ElementContentType::StringRcdata),
    ("tr", ElementContentType::SafeHtml),
    ("track", ElementContentType::Void),
    ("u", ElementContentType::SafeHtml),
    ("ul", ElementContentType::SafeHtml),
    ("var", ElementContentType::SafeHtml),
    ("video", ElementContentType::SafeHtml),
    ("wbr", ElementContentType::Void),
];

/// Legal keyword sets for enumerated attributes. Values are lowercase.
pub(super) static ENUM_VALUE_SETS: &[&[&str]] = &[&["auto", "ltr", "rtl"], &["_self", "_blank"]];

/// Element name (or `*` for any element) to attribute to index into
/// [`ENUM_VALUE_SETS`].
pub(super) static ENUM_VALUE_SET_BY_ATTR: &[(&str, &[(&str, usize)])] =
    &[("*", &[("dir", 0), ("target", 1)])];
