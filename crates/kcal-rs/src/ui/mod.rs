//! Presentation-neutral UI types.
//!
//! This module provides the data model any frontend (web page, JSON API,
//! terminal) uses to show the state of the tracker. It contains no rendering
//! dependencies — just notices, log lines, and the conversions that produce
//! them from history and diagnosis results.

pub mod tracing;

use serde::{Deserialize, Serialize};

use crate::daily::{Diagnosis, Outcome};
use crate::history::LoadStatus;

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 500;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 300;

// ── Notices ───────────────────────────────────────────────────────────

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS class variant for styling.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message shown to the user alongside the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Notice for a history read, if the read needs one.
    pub fn from_load_status(status: &LoadStatus) -> Option<Self> {
        match status {
            LoadStatus::Loaded => None,
            LoadStatus::Missing => Some(Self::info("History: no previous record was found.")),
            LoadStatus::Failed(e) => Some(Self::error(format!("Failed to read the history: {e}"))),
        }
    }

    /// Advisory for a limit below the healthy threshold.
    pub fn low_limit() -> Self {
        Self::warning(
            "Your daily limit is very low. Consult a health professional \
             before starting such a restrictive diet.",
        )
    }

    /// Notices describing a diagnosis: the over/under outcome and, when it
    /// fires, the low-limit warning.
    pub fn from_diagnosis(diagnosis: &Diagnosis) -> Vec<Self> {
        let mut notices = Vec::with_capacity(2);
        if diagnosis.low_limit_warning {
            notices.push(Self::low_limit());
        }
        notices.push(match diagnosis.outcome {
            Outcome::UnderLimit { surplus } => Self::success(format!(
                "Congratulations! You are {surplus:.1} kcal under your limit."
            )),
            Outcome::OverLimit { excess } => {
                Self::error(format!("You went over your limit by {excess:.1} kcal."))
            }
        });
        notices
    }
}

// ── Log Types ─────────────────────────────────────────────────────────

/// A single log line captured from tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::diagnose;

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
        assert_eq!(LogLevel::Debug.label(), "DEBUG");
        assert_eq!(LogLevel::Trace.label(), "TRACE");
        assert_eq!(LogLevel::Warn.label(), "WARN ");
    }

    #[test]
    fn load_status_notices() {
        assert!(Notice::from_load_status(&LoadStatus::Loaded).is_none());

        let missing = Notice::from_load_status(&LoadStatus::Missing).unwrap();
        assert_eq!(missing.level, NoticeLevel::Info);

        let failed = Notice::from_load_status(&LoadStatus::Failed("disk gone".into())).unwrap();
        assert_eq!(failed.level, NoticeLevel::Error);
        assert!(failed.message.contains("disk gone"));
    }

    #[test]
    fn under_limit_is_single_success() {
        let notices = Notice::from_diagnosis(&diagnose(2000.0, 1800.0));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert!(notices[0].message.contains("200.0 kcal"));
    }

    #[test]
    fn over_low_limit_fires_both() {
        let notices = Notice::from_diagnosis(&diagnose(1100.0, 1500.0));
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[1].level, NoticeLevel::Error);
        assert!(notices[1].message.contains("400.0 kcal"));
    }

    #[test]
    fn notice_level_serializes_snake_case() {
        let json = serde_json::to_value(Notice::success("ok")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(NoticeLevel::Warning.css_class(), "warning");
    }
}
