//! Serializable projection of the tracker state for WebSocket and REST
//! transport.
//!
//! [`FormSnapshot`] combines the freshly read history view with the form's
//! input domain and the most recent captured log lines.

use kcal_rs::KcalConfig;
use kcal_rs::config::{InputBounds, MEAL_COUNT};
use kcal_rs::form::{FormView, load_view};
use kcal_rs::summary::Summary;
use kcal_rs::ui::tracing::LogBuffer;
use kcal_rs::ui::{LogLine, Notice};
use serde::Serialize;

/// Maximum number of log lines included in a snapshot.
const SNAPSHOT_MAX_LOGS: usize = 50;

/// Serializable view of the tracker sent over WebSocket or REST.
#[derive(Debug, Serialize)]
pub struct FormSnapshot {
    // ── History ──
    pub summary: Summary,
    pub notices: Vec<Notice>,
    pub history_file: String,

    // ── Form domain ──
    pub bounds: InputBounds,
    pub meal_count: usize,
    pub low_limit_threshold: f64,

    // ── Logs (capped) ──
    pub logs: Vec<LogLine>,
}

impl FormSnapshot {
    /// Read the history and build a snapshot.
    pub fn load(config: &KcalConfig, logs: &LogBuffer) -> Self {
        Self::from_view(&load_view(config), config, logs)
    }

    /// Build a snapshot from an already loaded view.
    pub fn from_view(view: &FormView, config: &KcalConfig, logs: &LogBuffer) -> Self {
        Self {
            summary: view.summary,
            notices: view.notices.clone(),
            history_file: config.history_path.display().to_string(),
            bounds: config.bounds,
            meal_count: MEAL_COUNT,
            low_limit_threshold: config.low_limit_threshold,
            logs: logs.recent(SNAPSHOT_MAX_LOGS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcal_rs::ui::{LogLevel, NoticeLevel};

    #[test]
    fn snapshot_of_missing_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = KcalConfig::default().with_history_path(dir.path().join("h.txt"));
        let snap = FormSnapshot::load(&config, &LogBuffer::default());

        assert_eq!(snap.summary.count, 0);
        assert_eq!(snap.notices.len(), 1);
        assert_eq!(snap.notices[0].level, NoticeLevel::Info);
        assert_eq!(snap.meal_count, 5);
        assert!(snap.logs.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.txt");
        std::fs::write(
            &path,
            "limite:2000.0kcal, Consumo:1800.0 kcal\nlimite:1800.0kcal, Consumo:1900.0 kcal\n",
        )
        .unwrap();
        let config = KcalConfig::default().with_history_path(&path);

        let json = serde_json::to_value(FormSnapshot::load(&config, &LogBuffer::default())).unwrap();
        assert_eq!(json["summary"]["count"], 2);
        assert_eq!(json["summary"]["avg_limit"], 1900.0);
        assert_eq!(json["summary"]["avg_consumption"], 1850.0);
        assert_eq!(json["bounds"]["limit_default"], 2000.0);
        assert!(json["notices"].as_array().unwrap().is_empty());
    }

    #[test]
    fn snapshot_caps_logs() {
        let logs = LogBuffer::default();
        for i in 0..120 {
            logs.push(LogLine {
                time: format!("{i:03}"),
                level: LogLevel::Info,
                message: format!("msg {i}"),
            });
        }

        let dir = tempfile::tempdir().unwrap();
        let config = KcalConfig::default().with_history_path(dir.path().join("h.txt"));
        let snap = FormSnapshot::load(&config, &logs);
        assert_eq!(snap.logs.len(), 50);
        // Should contain the *last* 50 entries.
        assert_eq!(snap.logs[0].time, "070");
        assert_eq!(snap.logs[49].time, "119");
    }
}
