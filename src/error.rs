use std::fmt;

use crate::trusted::SafetyClass;

/// Errors that can occur in the binding sanitization crate.
///
/// Every variant indicates a programming or integration bug rather than
/// hostile input. Hostile input never produces an `Error`; it produces a
/// [`ViolationReport`](crate::ViolationReport) and an innocuous replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value was unwrapped as a trusted class it was never branded with.
    UnbrandedAccess {
        /// The class the caller asked for
        expected: SafetyClass,
        /// A short description of what was actually offered
        found: &'static str,
    },
    /// A binding kind other than `"attribute"` or `"property"` was supplied.
    UnknownBindingKind(String),
    /// The sanitizer configuration could not be compiled.
    Configuration(String),
    /// An unchecked factory was called without a justification.
    MissingJustification {
        /// The class that was to be branded
        class: SafetyClass,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnbrandedAccess { expected, found } => {
                write!(f, "Unbranded access: expected {}, found {}", expected, found)
            }
            Error::UnknownBindingKind(kind) => {
                write!(f, "Unknown binding kind: {:?}", kind)
            }
            Error::Configuration(reason) => {
                write!(f, "Invalid sanitizer configuration: {}", reason)
            }
            Error::MissingJustification { class } => {
                write!(f, "A justification is required to bless a {}", class)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbranded_access_display() {
        let err = Error::UnbrandedAccess {
            expected: SafetyClass::Html,
            found: "typed string",
        };
        let output = err.to_string();
        assert!(output.contains("Unbranded access"));
        assert!(output.contains("SafeHtml"));
        assert!(output.contains("typed string"));
    }

    #[test]
    fn unknown_binding_kind_display_quotes_input() {
        let err = Error::UnknownBindingKind("style".to_string());
        assert_eq!(err.to_string(), "Unknown binding kind: \"style\"");
    }

    #[test]
    fn configuration_display() {
        let err = Error::Configuration("pattern too large".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid sanitizer configuration: pattern too large"
        );
    }

    #[test]
    fn missing_justification_display_names_class() {
        let err = Error::MissingJustification {
            class: SafetyClass::Script,
        };
        assert_eq!(err.to_string(), "A justification is required to bless a SafeScript");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&Error::UnknownBindingKind(String::new()));
    }
}
