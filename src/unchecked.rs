//! Justified construction of trusted values from arbitrary strings.
//!
//! These are the "trust me" factories. They perform no vetting: the caller
//! asserts that `content` satisfies the class contract and records why in a
//! compile-time constant justification, which makes every call site easy to
//! find in review.
//!
//! # Errors
//!
//! Every function returns [`Error::MissingJustification`] if the
//! justification is empty or whitespace.
//!
//! # Examples
//!
//! ```
//! use binding_guard::{unchecked, Const};
//!
//! let html = unchecked::safe_html_from_string_known_to_satisfy_type_contract(
//!     &Const::from_static("output of the server-side template compiler"),
//!     "<b>hello</b>",
//! )
//! .unwrap();
//! assert_eq!(html.as_str(), "<b>hello</b>");
//! ```

use crate::error::Error;
use crate::trusted::{
    Const, SafeHtml, SafeScript, SafeStyle, SafeUrl, Trusted, TrustedClass, TrustedResourceUrl,
};

/// Brands `content` as class `C`.
///
/// Prefer the class-specific functions below; this generic form exists for
/// code that is itself generic over the class.
pub fn trusted_from_string_known_to_satisfy_type_contract<C: TrustedClass>(
    justification: &Const,
    content: impl Into<String>,
) -> Result<Trusted<C>, Error> {
    if justification.as_str().trim().is_empty() {
        return Err(Error::MissingJustification { class: C::CLASS });
    }
    let content: String = content.into();
    tracing::trace!(
        class = %C::CLASS,
        justification = justification.as_str(),
        "blessing unchecked content"
    );
    Ok(Trusted::brand(content))
}

/// Brands `content` as [`SafeHtml`].
pub fn safe_html_from_string_known_to_satisfy_type_contract(
    justification: &Const,
    content: impl Into<String>,
) -> Result<SafeHtml, Error> {
    trusted_from_string_known_to_satisfy_type_contract(justification, content)
}

/// Brands `content` as [`SafeUrl`].
pub fn safe_url_from_string_known_to_satisfy_type_contract(
    justification: &Const,
    content: impl Into<String>,
) -> Result<SafeUrl, Error> {
    trusted_from_string_known_to_satisfy_type_contract(justification, content)
}

/// Brands `content` as [`TrustedResourceUrl`].
pub fn trusted_resource_url_from_string_known_to_satisfy_type_contract(
    justification: &Const,
    content: impl Into<String>,
) -> Result<TrustedResourceUrl, Error> {
    trusted_from_string_known_to_satisfy_type_contract(justification, content)
}

/// Brands `content` as [`SafeScript`].
pub fn safe_script_from_string_known_to_satisfy_type_contract(
    justification: &Const,
    content: impl Into<String>,
) -> Result<SafeScript, Error> {
    trusted_from_string_known_to_satisfy_type_contract(justification, content)
}

/// Brands `content` as [`SafeStyle`].
pub fn safe_style_from_string_known_to_satisfy_type_contract(
    justification: &Const,
    content: impl Into<String>,
) -> Result<SafeStyle, Error> {
    trusted_from_string_known_to_satisfy_type_contract(justification, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trusted::{Script, SafetyClass};

    fn why() -> Const {
        Const::from_static("unit test fixture")
    }

    #[test]
    fn blessed_content_round_trips() {
        let script =
            safe_script_from_string_known_to_satisfy_type_contract(&why(), "init();").unwrap();
        assert_eq!(script.as_str(), "init();");
        assert_eq!(script.class(), SafetyClass::Script);
    }

    #[test]
    fn generic_form_matches_specific_form() {
        let a: Trusted<Script> =
            trusted_from_string_known_to_satisfy_type_contract(&why(), "x").unwrap();
        let b = safe_script_from_string_known_to_satisfy_type_contract(&why(), "x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn url_blessing_skips_scheme_check() {
        let url = safe_url_from_string_known_to_satisfy_type_contract(&why(), "javascript:void(0)")
            .unwrap();
        assert_eq!(url.as_str(), "javascript:void(0)");
    }

    #[test]
    fn blank_justification_is_refused() {
        let result = safe_html_from_string_known_to_satisfy_type_contract(
            &Const::from_static("  "),
            "<b>",
        );
        assert_eq!(
            result,
            Err(Error::MissingJustification {
                class: SafetyClass::Html
            })
        );
    }
}
