use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::context::ReportContext;
use crate::core::result::FetchResult;

/// Key/value configuration handed to a reporter once at `init`.
///
/// Every recognized key is optional; reporters document their own keys and
/// defaults. Values are plain strings, so boolean flags go through [`flag`].
///
/// [`flag`]: ReporterConfig::flag
#[derive(Debug, Clone, Default)]
pub struct ReporterConfig {
    values: HashMap<String, String>,
}

impl ReporterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Boolean flags are the literal text `"true"`, case-insensitively.
    /// Anything else, including an absent key, reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

impl From<HashMap<String, String>> for ReporterConfig {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Failure raised by `publish`, split by the layer that broke so the
/// orchestrator can tell a bad result apart from a bad disk.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The fetch result could not be rendered at all. Nothing was written
    /// to the context or to disk.
    #[error("could not serialize fetch result to JSON")]
    Serialization(#[source] serde_json::Error),

    /// The artifact was rendered but the durable write failed. The context
    /// entry was already stored, so the in-memory report is still usable.
    #[error(
        "problem writing report file {path}; if the file is not needed, enable silent mode to go on"
    )]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A reporter renders a completed [`FetchResult`] into some output medium.
///
/// Lifecycle: the orchestrator calls `init` exactly once, then `publish` once
/// per fetched result, on one reporter at a time. Publishing before `init` is
/// a sequencing bug the orchestrator owns; implementations are not required
/// to guard against it.
pub trait Reporter: Send + Sync {
    /// Identifier used for config sections and logs. Constant for the
    /// reporter's lifetime and never drives behavior.
    fn name(&self) -> &str;

    /// Resolves configuration and any eager resources. I/O trouble here must
    /// not escape: the reporter records it through its diagnostics and runs
    /// in-memory-only for the rest of its lifetime, so one bad path never
    /// takes the whole chain down at startup.
    fn init(&mut self, config: &ReporterConfig);

    /// Renders `result` and records the artifact in `context` under a key of
    /// the reporter's own. Safe to call repeatedly; each call replaces the
    /// reporter's context entry.
    fn publish(&self, result: &FetchResult, context: &mut ReportContext)
        -> Result<(), ReportError>;
}
