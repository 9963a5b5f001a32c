//! In-memory report recorder.

use std::sync::{Arc, Mutex, PoisonError};

use super::{ReportEvent, ReportHandler, ViolationReport};

/// In-memory recorder for report events.
///
/// Clones share the same storage, so a trail can be handed to a
/// [`SanitizerBuilder`](crate::SanitizerBuilder) and inspected afterwards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use binding_guard::dom::memory::MemoryDocument;
/// use binding_guard::report::ReportTrail;
/// use binding_guard::SanitizerBuilder;
///
/// let document = Arc::new(MemoryDocument::new());
/// let trail = ReportTrail::new();
/// let _sanitizer = SanitizerBuilder::new()
///     .report_handler(trail.clone())
///     .build(document.clone(), document)
///     .unwrap();
///
/// // Building reports that the sanitizer is ready.
/// assert_eq!(trail.len(), 1);
/// assert!(trail.violations().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportTrail {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl ReportTrail {
    /// Creates a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event.
    pub fn record(&self, event: ReportEvent) {
        self.lock().push(event);
    }

    /// Returns a snapshot of all recorded events in order.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Returns a snapshot of the recorded violations.
    pub fn violations(&self) -> Vec<ViolationReport> {
        self.lock()
            .iter()
            .filter_map(|event| event.violation().cloned())
            .collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReportHandler for ReportTrail {
    fn report(&self, event: &ReportEvent) {
        self.record(event.clone());
    }
}
