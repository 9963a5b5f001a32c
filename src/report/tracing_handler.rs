//! Report handler that emits through the tracing infrastructure.

use super::{ReportEvent, ReportHandler};

/// Emits reports as structured `tracing` events under the
/// `binding_guard::report` target.
///
/// Violations are logged at `WARN` with the element, node, attribute, value
/// and contract as fields. Status messages are logged at `INFO`.
///
/// This is the handler debug builds install when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReportHandler;

impl ReportHandler for TracingReportHandler {
    fn report(&self, event: &ReportEvent) {
        match event {
            ReportEvent::Violation(violation) => {
                tracing::warn!(
                    target: "binding_guard::report",
                    kind = %violation.kind(),
                    element = ?violation.element(),
                    node = violation.node_name(),
                    attribute = ?violation.attribute(),
                    value = violation.value(),
                    contract = ?violation.contract(),
                    "{}",
                    event.message()
                );
            }
            ReportEvent::Initialized => {
                tracing::info!(target: "binding_guard::report", "{}", event.message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ViolationReport;

    #[test]
    fn reporting_does_not_panic() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        TracingReportHandler.report(&ReportEvent::Initialized);
        TracingReportHandler.report(&ReportEvent::Violation(ViolationReport::for_attribute(
            "a",
            "href",
            "javascript:alert(1)",
        )));
    }

    #[test]
    fn reporting_without_subscriber_does_not_panic() {
        TracingReportHandler.report(&ReportEvent::Violation(ViolationReport::for_text(
            None, "#text", "x",
        )));
    }
}
