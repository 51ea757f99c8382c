use std::sync::Arc;

/// Destination for a reporter's operational events (init trouble, files
/// written). Injected at construction so tests can capture what a reporter
/// said instead of scraping ambient logger state.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Routes diagnostics to the process-wide `tracing` subscriber.
#[derive(Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "tsreport::reporter", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "tsreport::reporter", "{message}");
    }
}

pub fn default_diagnostics() -> Arc<dyn Diagnostics> {
    Arc::new(LogDiagnostics)
}
