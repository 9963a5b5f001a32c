//! Reporting of sanitizer decisions.
//!
//! This module provides:
//! - `ReportEvent`: a status message or a `ViolationReport`
//! - `ReportHandler`: the sink the sanitizer delivers events to
//! - `TracingReportHandler`: emits events as structured `tracing` events
//! - `ReportTrail`: in-memory recorder for tests and telemetry
//!
//! Violations are never errors. The sanitizer substitutes an innocuous value
//! and reports; integrators observe attacks and misconfiguration only here.

mod event;
mod tracing_handler;
mod trail;

pub use event::{ReportEvent, ViolationKind, ViolationReport};
pub use tracing_handler::TracingReportHandler;
pub use trail::ReportTrail;

/// Template for a rejected text or other non-element binding.
///
/// Arguments: parent node name, node name, an empty string, the value.
pub const TEXT_VIOLATION_TEMPLATE: &str = "Failed to sanitize %s %s%s node to value %O";

/// Template for a rejected attribute or property binding.
///
/// Arguments: element name, element name, attribute name, the value.
pub const ATTRIBUTE_VIOLATION_TEMPLATE: &str = "Failed to sanitize attribute of <%s>: <%s %s=\"%O\">";

/// Status message emitted once a sanitizer is built.
pub const INITIALIZED: &str = "initialized";

/// Receives sanitizer reports.
///
/// Closures of the form `Fn(&ReportEvent)` implement this trait.
///
/// # Examples
///
/// ```
/// use binding_guard::report::{ReportEvent, ReportHandler};
///
/// let count_violations = |event: &ReportEvent| {
///     if event.is_violation() {
///         eprintln!("{}", event.message());
///     }
/// };
/// count_violations.report(&ReportEvent::Initialized);
/// ```
pub trait ReportHandler: Send + Sync {
    /// Handles one report.
    fn report(&self, event: &ReportEvent);
}

impl<F> ReportHandler for F
where
    F: Fn(&ReportEvent) + Send + Sync,
{
    fn report(&self, event: &ReportEvent) {
        self(event)
    }
}

/// Substitutes `%s` and `%O` placeholders in order.
pub(crate) fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(index) = rest.find('%') {
        out.push_str(&rest[..index]);
        let directive = &rest[index..];
        if directive.starts_with("%s") || directive.starts_with("%O") {
            if let Some(arg) = args.next() {
                out.push_str(arg);
            }
            rest = &directive[2..];
        } else {
            out.push('%');
            rest = &directive[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_substitutes_in_order() {
        let args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_template("%s then %O", &args), "a then b");
    }

    #[test]
    fn format_keeps_unknown_directives() {
        assert_eq!(format_template("100% %d", &[]), "100% %d");
    }

    #[test]
    fn format_tolerates_missing_arguments() {
        assert_eq!(format_template("<%s>", &[]), "<>");
    }

    #[test]
    fn closures_are_handlers() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let seen = AtomicUsize::new(0);
        let handler = |_: &ReportEvent| {
            seen.fetch_add(1, Ordering::Relaxed);
        };
        handler.report(&ReportEvent::Initialized);
        assert_eq!(seen.load(Ordering::Relaxed), 1);
    }
}
