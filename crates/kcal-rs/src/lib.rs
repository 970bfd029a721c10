//! Single-user daily calorie tracking.
//!
//! `kcal-rs` is the core of a small calorie tracker: the user declares a
//! daily caloric limit and up to five meal entries, gets a diagnosis of how
//! the day compares to the limit, and the day is appended to a flat-file
//! history. Running averages over the whole history are recomputed on every
//! read.
//!
//! # Getting started
//!
//! ```no_run
//! use kcal_rs::prelude::*;
//!
//! let config = KcalConfig::default().with_history_path("registro_calorias.txt");
//!
//! // Read path: history → averages.
//! let view = load_view(&config);
//! println!("{} days, {:.2} kcal average", view.summary.count, view.summary.avg_consumption);
//!
//! // Write path: input → diagnosis → append → refreshed view.
//! let input = DailyInput::new(2000.0, vec![450.0, 700.0, 650.0]);
//! let submission = submit(&config, &input)?;
//! for notice in &submission.notices {
//!     println!("{}", notice.message);
//! }
//! # Ok::<(), InputError>(())
//! ```
//!
//! # Where to find things
//!
//! - **History file format:** [`history`] reads and appends lines of the
//!   form `limite:<limit>kcal, Consumo:<consumption> kcal`. Reading is
//!   lenient; any line with exactly two numbers is a record.
//! - **Averages:** [`Summary`](summary::Summary).
//! - **Diagnosis:** [`daily::diagnose`] and [`DailyInput`](daily::DailyInput)
//!   validation.
//! - **Per-request handling:** [`form::load_view`] and [`form::submit`].
//! - **User-facing messages and log capture:** [`ui`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | [`Record`](record::Record) — one day's limit/consumption pair |
//! | [`history`] | Flat-file reader/writer |
//! | [`summary`] | Count, sums and averages |
//! | [`daily`] | Surplus/deficit classification and low-limit advisory |
//! | [`config`] | [`KcalConfig`](config::KcalConfig) and input bounds |
//! | [`form`] | Stateless read/submit cycle |
//! | [`ui`] | Notices, log lines, tracing capture layer |

pub mod config;
pub mod daily;
pub mod form;
pub mod history;
pub mod prelude;
pub mod record;
pub mod summary;
pub mod ui;

pub use config::KcalConfig;
pub use record::Record;
pub use summary::Summary;
