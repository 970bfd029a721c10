//! Stateless form handler.
//!
//! Each interaction is a complete cycle computed from the submitted input and
//! a fresh read of the history file. Nothing is kept between calls.
//!
//! ```text
//! load_view: history file ──read──▶ records ──▶ Summary + notices
//! submit:    input ──validate──▶ diagnose ──append──▶ load_view (refresh)
//! ```

use serde::Serialize;
use tracing::{info, warn};

use crate::config::KcalConfig;
use crate::daily::{DailyInput, Diagnosis, InputError, diagnose_with_threshold};
use crate::history::{self, LoadStatus};
use crate::record::Record;
use crate::summary::Summary;
use crate::ui::Notice;

/// Everything a frontend needs to render the history side of the page.
#[derive(Clone, Debug, Serialize)]
pub struct FormView {
    pub summary: Summary,
    pub records: Vec<Record>,
    /// Informational or error notices from reading the history.
    pub notices: Vec<Notice>,
}

/// How the append of a submitted day ended.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved { record: Record },
    Failed { error: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn notice(&self, history_name: &str) -> Notice {
        match self {
            Self::Saved { .. } => Notice::success(format!("Record saved to '{history_name}'.")),
            Self::Failed { error } => Notice::error(format!("The record was not saved: {error}")),
        }
    }
}

/// Result of one submission.
#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub diagnosis: Diagnosis,
    pub save: SaveOutcome,
    /// Diagnosis notices followed by the save notice.
    pub notices: Vec<Notice>,
    /// The history as re-read after the append.
    pub view: FormView,
}

/// Read the history and build the view.
pub fn load_view(config: &KcalConfig) -> FormView {
    let load = history::read_history(&config.history_path);
    let notices = Notice::from_load_status(&load.status).into_iter().collect();
    if let LoadStatus::Failed(ref e) = load.status {
        warn!("Showing partial history ({} records): {e}", load.records.len());
    }
    FormView {
        summary: Summary::from_records(&load.records),
        records: load.records,
        notices,
    }
}

/// Validate, diagnose and persist one day, then reload the history.
///
/// Invalid input is rejected before anything is written. A failed append is
/// reported in [`Submission::save`] rather than as an error so the diagnosis
/// can still be shown.
pub fn submit(config: &KcalConfig, input: &DailyInput) -> Result<Submission, InputError> {
    input.validate(&config.bounds)?;

    let total = input.total_consumption();
    let diagnosis = diagnose_with_threshold(input.limit, total, config.low_limit_threshold);
    info!(
        limit = input.limit,
        total,
        difference = diagnosis.difference,
        over_limit = diagnosis.is_over_limit(),
        "Day submitted"
    );

    let save = match history::append_record(&config.history_path, input.limit, total) {
        Ok(record) => SaveOutcome::Saved { record },
        Err(e) => {
            warn!("{e}");
            SaveOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let history_name = config
        .history_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.history_path.display().to_string());

    let mut notices = Notice::from_diagnosis(&diagnosis);
    notices.push(save.notice(&history_name));

    Ok(Submission {
        diagnosis,
        save,
        notices,
        view: load_view(config),
    })
}
