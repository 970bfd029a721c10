//! REST API endpoint handlers.
//!
//! JSON counterparts of the HTML form, for scripts and for frontends that
//! render the page themselves.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kcal_rs::KcalConfig;
use kcal_rs::daily::DailyInput;
use kcal_rs::form::{self, SaveOutcome};
use kcal_rs::history::read_history;
use kcal_rs::record::Record;
use kcal_rs::ui::tracing::LogBuffer;
use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::broadcast::{WsMessage, broadcast_saved};
use crate::snapshot::FormSnapshot;

/// Shared application state passed to all handlers via axum's `State` extractor.
///
/// Holds no per-user data: every request re-reads the history.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<KcalConfig>,
    pub broadcast_tx: broadcast::Sender<WsMessage>,
    pub logs: LogBuffer,
}

impl AppState {
    /// Run history file I/O on Tokio's blocking pool.
    ///
    /// A panicked task maps to 500.
    pub async fn run_blocking<T, F>(&self, f: F) -> Result<T, StatusCode>
    where
        F: FnOnce(&KcalConfig, &LogBuffer) -> T + Send + 'static,
        T: Send + 'static,
    {
        let config = Arc::clone(&self.config);
        let logs = self.logs.clone();
        tokio::task::spawn_blocking(move || f(&config, &logs))
            .await
            .map_err(|e| {
                error!("History task failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}

/// GET /api/state — Full state snapshot.
pub async fn get_state(State(app): State<AppState>) -> Result<Json<FormSnapshot>, StatusCode> {
    app.run_blocking(FormSnapshot::load).await.map(Json)
}

/// GET /api/history — Parsed records in file order.
///
/// Malformed lines are skipped; a read failure returns the records parsed
/// before it.
pub async fn get_history(State(app): State<AppState>) -> Result<Json<Vec<Record>>, StatusCode> {
    app.run_blocking(|config, _| read_history(&config.history_path).records)
        .await
        .map(Json)
}

/// POST /api/submit — Diagnose and save one day.
///
/// Returns 200 with the submission when saved, 500 with the submission
/// (diagnosis included) when the append failed, and 422 when the input is
/// outside the form's domain.
pub async fn post_submit(State(app): State<AppState>, Json(input): Json<DailyInput>) -> Response {
    let result = match app
        .run_blocking(move |config, _| form::submit(config, &input))
        .await
    {
        Ok(result) => result,
        Err(status) => return status.into_response(),
    };
    let submission = match result {
        Ok(s) => s,
        Err(e) => {
            debug!("Rejected submission: {e}");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let status = match &submission.save {
        SaveOutcome::Saved { record } => {
            let snapshot = FormSnapshot::from_view(&submission.view, &app.config, &app.logs);
            broadcast_saved(&app.broadcast_tx, *record, submission.diagnosis, &snapshot);
            StatusCode::OK
        }
        SaveOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(submission)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_deserializes() {
        let json = r#"{"limit":2000,"meals":[300,450.5]}"#;
        let input: DailyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.limit, 2000.0);
        assert_eq!(input.meals, vec![300.0, 450.5]);
    }

    #[tokio::test]
    async fn run_blocking_passes_config() {
        let dir = tempfile::tempdir().unwrap();
        let history = dir.path().join("h.txt");
        std::fs::write(&history, "limite:2000.0kcal, Consumo:1800.0 kcal\n").unwrap();
        let (broadcast_tx, _) = broadcast::channel(4);
        let app = AppState {
            config: Arc::new(KcalConfig::default().with_history_path(&history)),
            broadcast_tx,
            logs: LogBuffer::default(),
        };

        let records = app
            .run_blocking(|config, _| read_history(&config.history_path).records)
            .await
            .unwrap();
        assert_eq!(records, vec![Record::new(2000.0, 1800.0)]);
    }

    #[test]
    fn submit_request_meals_default_to_empty() {
        let input: DailyInput = serde_json::from_str(r#"{"limit":1500}"#).unwrap();
        assert!(input.meals.is_empty());
    }
}
