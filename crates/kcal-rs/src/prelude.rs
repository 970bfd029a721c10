//! Convenience re-exports for common `kcal-rs` types.
//!
//! Meant to be glob-imported by frontends:
//!
//! ```ignore
//! use kcal_rs::prelude::*;
//! ```

// ── Data model ──────────────────────────────────────────────────────
pub use crate::record::Record;
pub use crate::summary::Summary;

// ── History store ───────────────────────────────────────────────────
pub use crate::history::{HistoryError, HistoryLoad, LoadStatus, append_record, read_history};

// ── Daily calculation ───────────────────────────────────────────────
pub use crate::daily::{DailyInput, Diagnosis, InputError, Outcome, diagnose};

// ── Form handling ───────────────────────────────────────────────────
pub use crate::config::{InputBounds, KcalConfig, MEAL_COUNT};
pub use crate::form::{FormView, SaveOutcome, Submission, load_view, submit};

// ── UI types ────────────────────────────────────────────────────────
pub use crate::ui::tracing::{LogBuffer, UiTracingLayer};
pub use crate::ui::{LogLevel, LogLine, Notice, NoticeLevel};
