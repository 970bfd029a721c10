//! Server-rendered HTML form.
//!
//! `GET /` renders the page from a fresh history read. `POST /submit` takes
//! the urlencoded form, runs one submission cycle and renders the same page
//! with the day's result and the refreshed history analysis.

use std::collections::HashMap;
use std::fmt::Write;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use kcal_rs::KcalConfig;
use kcal_rs::config::MEAL_COUNT;
use kcal_rs::daily::DailyInput;
use kcal_rs::form::{self, FormView, SaveOutcome, Submission};
use kcal_rs::ui::{Notice, NoticeLevel};

use crate::api::AppState;
use crate::broadcast::broadcast_saved;
use crate::snapshot::FormSnapshot;

/// Values to pre-fill the form with.
struct FormValues {
    limit: f64,
    meals: [f64; MEAL_COUNT],
}

impl FormValues {
    fn defaults(config: &KcalConfig) -> Self {
        Self {
            limit: config.bounds.limit_default,
            meals: [0.0; MEAL_COUNT],
        }
    }
}

/// GET / — The tracker page.
pub async fn get_index(State(app): State<AppState>) -> Result<Html<String>, StatusCode> {
    let view = app.run_blocking(|config, _| form::load_view(config)).await?;
    Ok(Html(render_page(
        &app.config,
        &view,
        &FormValues::defaults(&app.config),
        &[],
        None,
    )))
}

/// POST /submit — Analyze and save the day, then render the page.
///
/// Unparseable or out-of-range values re-render the form with an error
/// notice and status 422; nothing is saved.
pub async fn post_submit(
    State(app): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<(StatusCode, Html<String>), StatusCode> {
    let input = match parse_fields(&fields, &app.config) {
        Ok(input) => input,
        Err(message) => return reject(&app, &fields, message).await,
    };

    let submitted = input.clone();
    let submission = match app
        .run_blocking(move |config, _| form::submit(config, &submitted))
        .await?
    {
        Ok(s) => s,
        Err(e) => return reject(&app, &fields, e.to_string()).await,
    };

    let status = match &submission.save {
        SaveOutcome::Saved { record } => {
            let snapshot = FormSnapshot::from_view(&submission.view, &app.config, &app.logs);
            broadcast_saved(&app.broadcast_tx, *record, submission.diagnosis, &snapshot);
            StatusCode::OK
        }
        SaveOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut values = FormValues::defaults(&app.config);
    values.limit = input.limit;
    for (slot, meal) in values.meals.iter_mut().zip(&input.meals) {
        *slot = *meal;
    }

    let html = render_page(
        &app.config,
        &submission.view,
        &values,
        &[],
        Some(&submission),
    );
    Ok((status, Html(html)))
}

/// Re-render the form with an input error.
async fn reject(
    app: &AppState,
    fields: &HashMap<String, String>,
    message: String,
) -> Result<(StatusCode, Html<String>), StatusCode> {
    let view = app.run_blocking(|config, _| form::load_view(config)).await?;
    let mut values = FormValues::defaults(&app.config);
    if let Some(limit) = fields.get("limit").and_then(|v| v.trim().parse().ok()) {
        values.limit = limit;
    }
    for (i, slot) in values.meals.iter_mut().enumerate() {
        if let Some(meal) = fields
            .get(&meal_field(i))
            .and_then(|v| v.trim().parse().ok())
        {
            *slot = meal;
        }
    }
    let html = render_page(
        &app.config,
        &view,
        &values,
        &[Notice::error(message)],
        None,
    );
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)))
}

fn meal_field(index: usize) -> String {
    format!("meal{}", index + 1)
}

/// Read `limit` and `meal1`..`mealN` from the submitted form.
///
/// A missing or blank limit falls back to the default; missing or blank meals
/// count as zero.
fn parse_fields(
    fields: &HashMap<String, String>,
    config: &KcalConfig,
) -> Result<DailyInput, String> {
    let parse = |name: &str, default: f64| -> Result<f64, String> {
        match fields.get(name).map(|v| v.trim()) {
            None | Some("") => Ok(default),
            Some(v) => v
                .parse::<f64>()
                .map_err(|_| format!("'{v}' is not a valid number for {name}")),
        }
    };

    let limit = parse("limit", config.bounds.limit_default)?;
    let meals = (0..MEAL_COUNT)
        .map(|i| parse(&meal_field(i), 0.0))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DailyInput::new(limit, meals))
}

// ── Rendering ─────────────────────────────────────────────────────────

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;display:flex;color:#222}\
aside{width:16rem;padding:1.5rem;background:#f4f5f7;min-height:100vh}\
main{flex:1;max-width:44rem;padding:1.5rem 2.5rem}\
.metric{margin:.8rem 0}.metric .label{font-size:.85rem;color:#666}\
.metric .value{font-size:1.6rem}\
.notice{padding:.6rem .9rem;border-radius:.4rem;margin:.6rem 0}\
.info{background:#e7f1fb}.success{background:#e6f6ea}\
.warning{background:#fff6dd}.error{background:#fde8e8}\
.columns{display:flex;gap:2rem}.columns>div{flex:1}\
label{display:block;margin:.6rem 0 .2rem}input{width:100%;padding:.3rem}\
button{margin-top:1rem;padding:.5rem 1rem}";

/// Escape text for inclusion in HTML content or attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_notice(out: &mut String, notice: &Notice) {
    let _ = write!(
        out,
        r#"<div class="notice {}">{}</div>"#,
        notice.level.css_class(),
        escape_html(&notice.message)
    );
}

fn render_sidebar(out: &mut String, view: &FormView) {
    out.push_str("<aside><h2>History analysis</h2>");
    for notice in &view.notices {
        render_notice(out, notice);
    }
    if view.summary.is_empty() {
        render_notice(out, &Notice::warning("Not enough data for an analysis."));
    } else {
        let s = &view.summary;
        for (label, value) in [
            ("Days recorded", s.count.to_string()),
            (
                "Average consumption",
                format!("{:.2} kcal", s.avg_consumption),
            ),
            ("Average limit", format!("{:.2} kcal", s.avg_limit)),
        ] {
            let _ = write!(
                out,
                r#"<div class="metric"><div class="label">{label}</div><div class="value">{value}</div></div>"#
            );
        }
    }
    out.push_str("</aside>");
}

fn render_form(out: &mut String, config: &KcalConfig, values: &FormValues) {
    let b = &config.bounds;
    let _ = write!(
        out,
        r#"<form method="post" action="/submit"><div class="columns"><div>
<label for="limit">Daily calorie limit (kcal)</label>
<input id="limit" name="limit" type="number" min="{}" max="{}" step="{}" value="{}" required>"#,
        b.limit_min, b.limit_max, b.limit_step, values.limit
    );
    if values.limit < config.low_limit_threshold {
        render_notice(out, &Notice::low_limit());
    }
    out.push_str("</div><div><h3>Daily consumption</h3>");
    for (i, meal) in values.meals.iter().enumerate() {
        let name = meal_field(i);
        let _ = write!(
            out,
            r#"<label for="{name}">Calories consumed (meal {n})</label>
<input id="{name}" name="{name}" type="number" min="0" step="{step}" value="{meal}">"#,
            n = i + 1,
            step = b.meal_step,
        );
    }
    let total: f64 = values.meals.iter().sum();
    render_notice(
        out,
        &Notice::info(format!("Total consumed so far: {total:.1} kcal")),
    );
    out.push_str(
        r#"</div></div><button type="submit">Analyze and save</button></form>"#,
    );
}

fn render_result(out: &mut String, submission: &Submission) {
    let d = &submission.diagnosis;
    let _ = write!(
        out,
        "<hr><h2>Result of the day</h2>\
         <p><strong>Daily limit:</strong> {:.1} kcal</p>\
         <p><strong>Total consumed:</strong> {:.1} kcal</p>",
        d.limit, d.total_consumption
    );
    // The low-limit advisory is already shown next to the limit input.
    for notice in submission
        .notices
        .iter()
        .filter(|n| n.level != NoticeLevel::Warning)
    {
        render_notice(out, notice);
    }
}

/// Render the whole page.
fn render_page(
    config: &KcalConfig,
    view: &FormView,
    values: &FormValues,
    errors: &[Notice],
    submission: Option<&Submission>,
) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Calorie Tracker</title><style>{STYLE}</style></head><body>"#
    );
    render_sidebar(&mut out, view);
    out.push_str(
        "<main><h1>Daily Calorie Control</h1>\
         <p>Monitor your history of caloric limits and consumption.</p>",
    );
    for notice in errors {
        render_notice(&mut out, notice);
    }
    render_form(&mut out, config, values);
    if let Some(submission) = submission {
        render_result(&mut out, submission);
    }
    out.push_str("</main></body></html>");
    out
}
