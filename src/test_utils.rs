//! Shared proptest strategies.

use proptest::prelude::*;

/// URLs whose scheme is not allowed for navigation.
pub(crate) fn arb_unsafe_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("javascript:"),
            Just("JavaScript:"),
            Just("data:text/html,"),
            Just("vbscript:"),
            Just("about:"),
        ],
        "[a-z0-9()]{1,20}",
    )
        .prop_map(|(scheme, payload)| format!("{scheme}{payload}"))
}

/// URLs with an allowed scheme, or relative URLs.
pub(crate) fn arb_safe_url() -> impl Strategy<Value = String> {
    let path = "[a-z0-9/._-]{0,20}";
    prop_oneof![
        path.prop_map(|p| format!("https://example.com/{p}")),
        path.prop_map(|p| format!("http://example.com/{p}")),
        "[a-z]{1,8}".prop_map(|user| format!("mailto:{user}@example.com")),
        path.prop_map(|p| format!("ftp://files.example.com/{p}")),
        path.prop_map(|p| format!("/{p}")),
        "[a-z0-9._-]{1,20}",
    ]
}

/// Non-empty text, markup characters included.
pub(crate) fn arb_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[a-zA-Z0-9 <>&\"'/=]{{1,{max_len}}}"))
        .expect("valid regex")
}

/// Builtin elements whose text children may hold markup.
pub(crate) fn arb_markup_parent() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("div"),
        Just("span"),
        Just("p"),
        Just("a"),
        Just("li"),
        Just("section"),
    ]
}

/// Builtin elements whose text children are rejected.
pub(crate) fn arb_opaque_parent() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("script"),
        Just("style"),
        Just("template"),
        Just("applet"),
        Just("img"),
    ]
}
