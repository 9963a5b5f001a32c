use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::bridge::{NoopBridge, SafeTypesBridge, TypedStringBridge};
use crate::dom::{ComponentRegistry, Document};
use crate::error::Error;
use crate::report::{ReportEvent, ReportHandler, TracingReportHandler};
use crate::sanitizer::Sanitizer;

/// Where a sanitizer sends its reports.
#[derive(Clone, Default)]
pub enum ReportSetting {
    /// Log through [`TracingReportHandler`] in debug builds; report nothing
    /// in release builds.
    #[default]
    Default,
    /// Report nothing.
    Disabled,
    /// Report to this handler.
    Custom(Arc<dyn ReportHandler>),
}

impl ReportSetting {
    fn resolve(self) -> Option<Arc<dyn ReportHandler>> {
        match self {
            ReportSetting::Default if cfg!(debug_assertions) => Some(Arc::new(TracingReportHandler)),
            ReportSetting::Default | ReportSetting::Disabled => None,
            ReportSetting::Custom(handler) => Some(handler),
        }
    }
}

impl fmt::Debug for ReportSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSetting::Default => write!(f, "Default"),
            ReportSetting::Disabled => write!(f, "Disabled"),
            ReportSetting::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Configures and builds a [`Sanitizer`].
///
/// Every option is optional. The defaults grant no authority: only the
/// empty identifier is allowed, no value is proved safe by the bridge, and
/// reports go to `tracing` only in debug builds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use binding_guard::dom::memory::MemoryDocument;
/// use binding_guard::{SanitizerBuilder, TypedStringBridge};
///
/// let document = Arc::new(MemoryDocument::new());
/// let sanitizer = SanitizerBuilder::new()
///     .allow_identifier_prefix("app-")
///     .safe_types_bridge(TypedStringBridge)
///     .disable_reporting()
///     .build(document.clone(), document)
///     .expect("configuration should compile");
/// ```
pub struct SanitizerBuilder {
    identifier_prefixes: Vec<String>,
    bridge: Arc<dyn SafeTypesBridge>,
    report: ReportSetting,
    pass_through_disallowed_values: bool,
}

impl SanitizerBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            identifier_prefixes: Vec::new(),
            bridge: Arc::new(NoopBridge),
            report: ReportSetting::Default,
            pass_through_disallowed_values: false,
        }
    }

    /// A permissive, chatty configuration for development: every identifier
    /// is allowed, trusted values are recognized through
    /// [`TypedStringBridge`], and every report is logged through
    /// [`TracingReportHandler`], in release builds too.
    pub fn logging_preset() -> Self {
        Self::new()
            .allow_identifier_prefix("")
            .safe_types_bridge(TypedStringBridge)
            .report_handler(TracingReportHandler)
    }

    /// Allows identifier values (`id`, `for`, `name`, ...) that start with
    /// `prefix`. Duplicate prefixes are ignored.
    ///
    /// The empty prefix allows every identifier.
    pub fn allow_identifier_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !self.identifier_prefixes.contains(&prefix) {
            self.identifier_prefixes.push(prefix);
        }
        self
    }

    /// Allows identifier values starting with any of `prefixes`.
    pub fn allowed_identifier_prefixes<I, S>(self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prefixes
            .into_iter()
            .fold(self, |builder, prefix| builder.allow_identifier_prefix(prefix))
    }

    /// Sets the bridge that recognizes already-safe values.
    pub fn safe_types_bridge(mut self, bridge: impl SafeTypesBridge + 'static) -> Self {
        self.bridge = Arc::new(bridge);
        self
    }

    /// Sends reports to `handler`, in every build profile.
    pub fn report_handler(mut self, handler: impl ReportHandler + 'static) -> Self {
        self.report = ReportSetting::Custom(Arc::new(handler));
        self
    }

    /// Replaces the report setting.
    pub fn report_setting(mut self, setting: ReportSetting) -> Self {
        self.report = setting;
        self
    }

    /// Turns reporting off entirely.
    pub fn disable_reporting(self) -> Self {
        self.report_setting(ReportSetting::Disabled)
    }

    /// Returns original values instead of their innocuous replacements.
    ///
    /// Decisions are still computed and reported, which helps find false
    /// positives while migrating an application. This MUST NOT be enabled
    /// for end users or from attacker-influenced state.
    ///
    /// Ignored in release builds.
    pub fn pass_through_disallowed_values(mut self, enabled: bool) -> Self {
        self.pass_through_disallowed_values = enabled;
        self
    }

    /// Builds the sanitizer and emits the [`ReportEvent::Initialized`]
    /// status report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the identifier prefixes do not
    /// compile into a pattern, which only happens when they exceed the
    /// regex size limit.
    pub fn build(
        self,
        document: Arc<dyn Document>,
        registry: Arc<dyn ComponentRegistry>,
    ) -> Result<Sanitizer, Error> {
        // 1. Compile the identifier allow-list
        let identifier_pattern = compile_identifier_pattern(&self.identifier_prefixes)?;

        // 2. Resolve profile-dependent settings
        let report_handler = self.report.resolve();
        let pass_through = cfg!(debug_assertions) && self.pass_through_disallowed_values;
        if pass_through {
            tracing::warn!("disallowed values will be passed through unchanged");
        }

        // 3. Announce readiness
        if let Some(handler) = &report_handler {
            handler.report(&ReportEvent::Initialized);
        }

        Ok(Sanitizer::new(
            document,
            registry,
            self.bridge,
            report_handler,
            identifier_pattern,
            pass_through,
        ))
    }
}

impl Default for SanitizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SanitizerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerBuilder")
            .field("identifier_prefixes", &self.identifier_prefixes)
            .field("report", &self.report)
            .field(
                "pass_through_disallowed_values",
                &self.pass_through_disallowed_values,
            )
            .finish_non_exhaustive()
    }
}

/// Compiles `^$|^prefix1|^prefix2...`. The empty identifier is always allowed.
fn compile_identifier_pattern(prefixes: &[String]) -> Result<Regex, Error> {
    let mut source = String::from("^$");
    for prefix in prefixes {
        source.push_str("|^");
        source.push_str(&regex::escape(prefix));
    }
    Regex::new(&source).map_err(|e| Error::Configuration(e.to_string()))
}
