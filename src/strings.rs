//! Small string utilities shared by the trusted types and the name tables.

/// Escapes text so that it parses as a single HTML text node with the same
/// content.
///
/// Escapes `&`, `<`, `>`, `"`, `'` and NUL.
///
/// # Examples
///
/// ```
/// use binding_guard::html_escape;
///
/// assert_eq!(html_escape("<b>&'\""), "&lt;b&gt;&amp;&#39;&quot;");
/// ```
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\0' => out.push_str("&#0;"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts a hyphenated name to camel case: `aria-label` becomes `ariaLabel`.
///
/// Only a hyphen followed by a lowercase ASCII letter is folded.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Converts a camel case name to hyphenated lower case: `ariaLabel` becomes
/// `aria-label`.
pub fn to_selector_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(
            html_escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"q\""), "&quot;q&quot;");
        assert_eq!(html_escape("nul\0"), "nul&#0;");
    }

    #[test]
    fn html_escape_leaves_plain_text_alone() {
        assert_eq!(html_escape("Hello 世界"), "Hello 世界");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn camel_case_folds_hyphen_letter_pairs() {
        assert_eq!(to_camel_case("aria-label"), "ariaLabel");
        assert_eq!(to_camel_case("data-foo-bar"), "dataFooBar");
        assert_eq!(to_camel_case("href"), "href");
        assert_eq!(to_camel_case("x-1"), "x-1");
        assert_eq!(to_camel_case("trailing-"), "trailing-");
    }

    #[test]
    fn selector_case_inverts_camel_case() {
        assert_eq!(to_selector_case("ariaLabel"), "aria-label");
        assert_eq!(to_selector_case("dataFooBar"), "data-foo-bar");
        assert_eq!(to_selector_case("href"), "href");
        assert_eq!(to_selector_case(&to_camel_case("font-size")), "font-size");
    }
}
