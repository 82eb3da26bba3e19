use std::fs;
use std::io::Write;
use std::path::Path;

pub fn event_log_line(level: &str, event: &str, message: &str) -> Option<String> {
    let payload = serde_json::json!({
        "timestamp": chrono::Utc::now().timestamp(),
        "level": level,
        "event": event,
        "message": message,
    });
    serde_json::to_string(&payload).ok()
}

/// Appends one JSON line to the event log. Failures are swallowed; the log never blocks a wizard.
pub fn append_event_log(path: &Path, level: &str, event: &str, message: &str) {
    let Some(line) = event_log_line(level, event, message) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn append_event_log_writes_one_json_object_per_line() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("logs/events.log");

        append_event_log(&path, "info", "plan_built", "2 steps");
        append_event_log(&path, "error", "commit_failed", "disk full");

        let raw = fs::read_to_string(&path).expect("read log");
        let lines = raw.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("parse line");
        assert_eq!(first["event"], "plan_built");
        assert_eq!(first["level"], "info");
        assert!(first["timestamp"].as_i64().is_some());
        let second: serde_json::Value = serde_json::from_str(lines[1]).expect("parse line");
        assert_eq!(second["message"], "disk full");
    }
}
