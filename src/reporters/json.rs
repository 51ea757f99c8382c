use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::core::context::ReportContext;
use crate::core::result::FetchResult;
use crate::reporters::diag::{default_diagnostics, Diagnostics};
use crate::reporters::traits::{ReportError, Reporter, ReporterConfig};

/// Context key under which the serialized report is published.
pub const JSON_CONTEXT_KEY: &str = "JSON";

const CONFIG_LOCATION: &str = "location";
const CONFIG_SILENT: &str = "silent";

/// Reference reporter: serializes the fetch result to pretty-printed JSON,
/// stores it in the context for the reporters further down the chain, and
/// appends it to a timestamped file unless running silent.
///
/// Configuration keys: `location` (output directory, defaults to the current
/// working directory) and `silent` (suppresses all file output).
pub struct JsonReporter {
    diagnostics: Arc<dyn Diagnostics>,
    silent: bool,
    report_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::with_diagnostics(default_diagnostics())
    }

    pub fn with_diagnostics(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            diagnostics,
            silent: false,
            report_path: None,
        }
    }

    /// Path of the report file, if `init` managed to create one.
    pub fn report_path(&self) -> Option<&std::path::Path> {
        self.report_path.as_deref()
    }

    fn save(&self, json: &str) -> Result<(), ReportError> {
        if let Some(path) = &self.report_path {
            let mut file = OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(|source| ReportError::Output {
                    path: path.clone(),
                    source,
                })?;
            file.write_all(json.as_bytes())
                .map_err(|source| ReportError::Output {
                    path: path.clone(),
                    source,
                })?;
            let written = path.canonicalize().unwrap_or_else(|_| path.clone());
            self.diagnostics
                .info(&format!("report written to {}", written.display()));
        }
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn init(&mut self, config: &ReporterConfig) {
        let location = resolve_location(config);
        self.silent = config.flag(CONFIG_SILENT);

        if self.silent {
            return;
        }

        let path = location.join(format!("ts-{}.json", file_stamp(Local::now())));
        match File::create(&path) {
            Ok(_) => self.report_path = Some(path),
            Err(e) => {
                // Degrade to in-memory output for the rest of the lifetime;
                // no re-attempt on later publishes.
                self.diagnostics.warn(&format!(
                    "problem creating report file {}: {}",
                    path.display(),
                    e
                ));
                self.diagnostics.warn(
                    "resuming with the in-memory report in the context \
                     for the next reporters in the chain",
                );
            }
        }
    }

    fn publish(
        &self,
        result: &FetchResult,
        context: &mut ReportContext,
    ) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(result).map_err(ReportError::Serialization)?;
        // Context first: on an output failure the in-memory report is still
        // there for the reporters behind us.
        context.insert(JSON_CONTEXT_KEY, json.clone());
        self.save(&json)
    }
}

fn resolve_location(config: &ReporterConfig) -> PathBuf {
    match config.get(CONFIG_LOCATION) {
        Some(location) if !location.is_empty() => PathBuf::from(location),
        _ => PathBuf::from("."),
    }
}

/// Filename stamp: year, month, day, minute, second. The hour is absent;
/// downstream consumers match on this exact filename shape.
fn file_stamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::diag::capture::CapturedDiagnostics;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_result(source: &str) -> FetchResult {
        FetchResult {
            source: source.to_string(),
            fetched_at: Utc.with_ymd_and_hms(2026, 8, 6, 14, 3, 27).unwrap(),
            days: vec![crate::core::result::DayRecord {
                date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
                worked_minutes: 480,
                note: None,
            }],
            extra: serde_json::Map::new(),
        }
    }

    fn reporter_with_capture() -> (JsonReporter, Arc<CapturedDiagnostics>) {
        let capture = Arc::new(CapturedDiagnostics::default());
        (JsonReporter::with_diagnostics(capture.clone()), capture)
    }

    fn report_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_name() {
        assert_eq!(JsonReporter::new().name(), "JSON");
    }

    #[test]
    fn test_init_creates_empty_timestamped_file() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("location", tmp.path().to_str().unwrap()));

        let files = report_files(tmp.path());
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("ts-"));
        assert!(name.ends_with(".json"));
        let stamp = &name[3..name.len() - 5];
        assert_eq!(stamp.len(), 12);
        assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(fs::metadata(&files[0]).unwrap().len(), 0);
        assert_eq!(reporter.report_path(), Some(files[0].as_path()));
    }

    #[test]
    fn test_publish_sets_context_and_writes_file() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, capture) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("location", tmp.path().to_str().unwrap()));

        let mut context = ReportContext::new();
        reporter.publish(&make_result("intranet"), &mut context).unwrap();

        let json = context.get(JSON_CONTEXT_KEY).unwrap();
        let on_disk = fs::read_to_string(reporter.report_path().unwrap()).unwrap();
        assert_eq!(json, on_disk);
        assert!(capture
            .infos()
            .iter()
            .any(|m| m.starts_with("report written to ")));
    }

    #[test]
    fn test_two_publishes_append_in_call_order() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("location", tmp.path().to_str().unwrap()));

        let mut context = ReportContext::new();
        reporter.publish(&make_result("first"), &mut context).unwrap();
        let first = context.get(JSON_CONTEXT_KEY).unwrap().to_string();
        reporter.publish(&make_result("second"), &mut context).unwrap();
        let second = context.get(JSON_CONTEXT_KEY).unwrap().to_string();

        // Context holds only the latest report; the file holds both,
        // back to back.
        assert_ne!(first, second);
        assert!(second.contains("\"second\""));
        let on_disk = fs::read_to_string(reporter.report_path().unwrap()).unwrap();
        assert_eq!(on_disk, format!("{first}{second}"));
    }

    #[test]
    fn test_silent_mode_creates_no_file() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(
            &ReporterConfig::new()
                .set("location", tmp.path().to_str().unwrap())
                .set("silent", "true"),
        );

        let mut context = ReportContext::new();
        reporter.publish(&make_result("first"), &mut context).unwrap();
        reporter.publish(&make_result("second"), &mut context).unwrap();

        assert!(report_files(tmp.path()).is_empty());
        assert!(reporter.report_path().is_none());
        assert!(context.get(JSON_CONTEXT_KEY).unwrap().contains("\"second\""));
    }

    #[test]
    fn test_silent_flag_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(
            &ReporterConfig::new()
                .set("location", tmp.path().to_str().unwrap())
                .set("silent", "TRUE"),
        );
        assert!(report_files(tmp.path()).is_empty());
    }

    #[test]
    fn test_init_degrades_when_location_is_unwritable() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing").join("nested");
        let (mut reporter, capture) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("location", missing.to_str().unwrap()));

        let warnings = capture.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("problem creating report file"));
        assert!(warnings[1].contains("in-memory report"));
        assert!(reporter.report_path().is_none());

        // Publishing still works, in memory only, and never re-attempts
        // file creation.
        let mut context = ReportContext::new();
        reporter.publish(&make_result("intranet"), &mut context).unwrap();
        assert!(context.contains(JSON_CONTEXT_KEY));
        assert!(!missing.exists());
    }

    #[test]
    fn test_output_failure_advises_silent_mode_and_keeps_context() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("location", tmp.path().to_str().unwrap()));

        // Invalidate the report path after init: a directory where the file
        // used to be makes every append fail.
        let path = reporter.report_path().unwrap().to_path_buf();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let mut context = ReportContext::new();
        let err = reporter
            .publish(&make_result("intranet"), &mut context)
            .unwrap_err();

        assert!(matches!(err, ReportError::Output { .. }));
        assert!(err.to_string().contains("enable silent mode"));
        assert!(context.contains(JSON_CONTEXT_KEY));
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(
            &ReporterConfig::new()
                .set("location", tmp.path().to_str().unwrap())
                .set("silent", "true"),
        );

        let result = make_result("intranet");
        let mut first = ReportContext::new();
        let mut second = ReportContext::new();
        reporter.publish(&result, &mut first).unwrap();
        reporter.publish(&result, &mut second).unwrap();
        assert_eq!(first.get(JSON_CONTEXT_KEY), second.get(JSON_CONTEXT_KEY));
    }

    #[test]
    fn test_report_is_pretty_printed_and_round_trips() {
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("silent", "true"));

        let result = make_result("intranet");
        let mut context = ReportContext::new();
        reporter.publish(&result, &mut context).unwrap();

        let json = context.get(JSON_CONTEXT_KEY).unwrap();
        assert!(json.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, serde_json::to_value(&result).unwrap());
        assert_eq!(parsed["fetched_at"], "2026-08-06T14:03:27Z");
    }

    #[test]
    fn test_structureless_nested_values_render_as_empty_objects() {
        let (mut reporter, _) = reporter_with_capture();
        reporter.init(&ReporterConfig::new().set("silent", "true"));

        let mut result = make_result("intranet");
        result
            .extra
            .insert("marker".to_string(), serde_json::json!({}));

        let mut context = ReportContext::new();
        reporter.publish(&result, &mut context).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(context.get(JSON_CONTEXT_KEY).unwrap()).unwrap();
        assert_eq!(parsed["extra"]["marker"], serde_json::json!({}));
    }

    #[test]
    fn test_location_defaults_to_current_directory() {
        assert_eq!(resolve_location(&ReporterConfig::new()), PathBuf::from("."));
        assert_eq!(
            resolve_location(&ReporterConfig::new().set("location", "")),
            PathBuf::from(".")
        );
        assert_eq!(
            resolve_location(&ReporterConfig::new().set("location", "/tmp/reports")),
            PathBuf::from("/tmp/reports")
        );
    }

    #[test]
    fn test_file_stamp_has_no_hour_component() {
        let stamp = file_stamp(
            Local
                .with_ymd_and_hms(2026, 8, 6, 14, 3, 27)
                .single()
                .unwrap(),
        );
        assert_eq!(stamp, "202608060327");
    }
}
