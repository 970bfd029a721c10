//! A single day's limit/consumption pair.

use serde::{Deserialize, Serialize};

/// One historical day: the declared caloric limit and what was consumed.
///
/// Records carry no id or timestamp. Their order is the order in which they
/// were appended to the history file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Daily caloric ceiling in kcal.
    pub limit: f64,
    /// Sum of the day's meal entries in kcal.
    pub consumption: f64,
}

impl Record {
    pub fn new(limit: f64, consumption: f64) -> Self {
        Self { limit, consumption }
    }
}
