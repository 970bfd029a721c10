//! Tracker configuration with sensible defaults.
//!
//! [`KcalConfig`] holds everything the form handler needs: where the history
//! lives, the accepted input domain, and the advisory threshold.

use std::path::PathBuf;

use serde::Serialize;

use crate::history::DEFAULT_HISTORY_FILE;

/// Limits below this trigger the low-limit health warning.
pub const LOW_LIMIT_THRESHOLD: f64 = 1200.0;

/// Number of meal entries on the form.
pub const MEAL_COUNT: usize = 5;

/// Accepted domain of the form inputs.
///
/// The step values are rendering hints for the form widgets and are not
/// enforced on submitted values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBounds {
    /// Default: `500.0`.
    pub limit_min: f64,
    /// Default: `10000.0`.
    pub limit_max: f64,
    /// Pre-filled limit. Default: `2000.0`.
    pub limit_default: f64,
    /// Default: `50.0`.
    pub limit_step: f64,
    /// Default: `10.0`.
    pub meal_step: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            limit_min: 500.0,
            limit_max: 10000.0,
            limit_default: 2000.0,
            limit_step: 50.0,
            meal_step: 10.0,
        }
    }
}

/// Configuration for a tracker instance.
#[derive(Debug, Clone)]
pub struct KcalConfig {
    /// History file. Default: `"registro_calorias.txt"`.
    pub history_path: PathBuf,
    pub bounds: InputBounds,
    /// Default: `1200.0`.
    pub low_limit_threshold: f64,
}

impl Default for KcalConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            bounds: InputBounds::default(),
            low_limit_threshold: LOW_LIMIT_THRESHOLD,
        }
    }
}

impl KcalConfig {
    /// Use a different history file, keeping the other defaults.
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }
}
