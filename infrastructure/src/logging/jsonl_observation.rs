//! JSONL file writer for observation updates.
//!
//! Each update is serialized as a single JSON line with `type`, `name` and
//! `timestamp` fields, appended to the file via a buffered writer.

use super::OBSERVATION_TYPE;
use bridge_application::TelemetryReporter;
use bridge_domain::ObservationUpdate;
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Observation reporter that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlTelemetryReporter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTelemetryReporter {
    /// Open `path` for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create telemetry directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open telemetry file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the telemetry file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(observation: &str, update: ObservationUpdate) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = json!({
            "type": OBSERVATION_TYPE,
            "name": observation,
            "timestamp": timestamp,
        });
        if let (Value::Object(map), Ok(Value::Object(fields))) =
            (&mut record, serde_json::to_value(update))
        {
            map.extend(fields);
        }
        record
    }
}

impl TelemetryReporter for JsonlTelemetryReporter {
    fn update_observation(&self, observation: &'static str, update: ObservationUpdate) {
        let record = Self::record(observation, update);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlTelemetryReporter {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::{CHAT_OBSERVATION, PromptRef, TOOL_USE_OBSERVATION, TokenUsage};
    use serde_json::Map;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observations.jsonl");
        let reporter = JsonlTelemetryReporter::new(&path).unwrap();

        reporter.update_observation(
            CHAT_OBSERVATION,
            ObservationUpdate::started(
                json!([{"role": "user", "content": "hi"}]),
                "us.amazon.nova-pro-v1:0",
                Map::new(),
                Some(PromptRef::new("greeting", Some(2))),
            ),
        );
        reporter.update_observation(
            CHAT_OBSERVATION,
            ObservationUpdate::completed(json!("hello"), TokenUsage::new(3, 1, 4), Map::new()),
        );
        drop(reporter);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line["type"], "generation");
            assert_eq!(line["name"], "Bedrock Converse");
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["model"], "us.amazon.nova-pro-v1:0");
        assert_eq!(lines[0]["prompt"]["name"], "greeting");
        assert!(lines[0].get("output").is_none());
        assert_eq!(lines[1]["output"], "hello");
        assert_eq!(lines[1]["usage"]["total"], 4);
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/observations.jsonl");

        for _ in 0..2 {
            let reporter = JsonlTelemetryReporter::new(&path).unwrap();
            reporter.update_observation(TOOL_USE_OBSERVATION, ObservationUpdate::failed("boom"));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["name"], "Bedrock Converse Tool Use");
        assert_eq!(lines[1]["level"], "ERROR");
        assert_eq!(lines[1]["status_message"], "boom");
    }

    #[test]
    fn test_returns_none_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlTelemetryReporter::new(blocker.join("observations.jsonl")).is_none());
    }
}
