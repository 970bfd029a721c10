//! Daily calculation: surplus or deficit against the declared limit.

use serde::{Deserialize, Serialize};

use crate::config::{InputBounds, LOW_LIMIT_THRESHOLD, MEAL_COUNT};

/// Where the day ended up relative to the limit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Consumption stayed at or below the limit by `surplus` kcal.
    UnderLimit { surplus: f64 },
    /// Consumption went over the limit by `excess` kcal.
    OverLimit { excess: f64 },
}

/// Result of comparing a day's consumption against its limit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Diagnosis {
    pub limit: f64,
    pub total_consumption: f64,
    /// `limit - total_consumption`.
    pub difference: f64,
    pub outcome: Outcome,
    /// The limit itself is below the healthy threshold. Fires regardless of
    /// the outcome.
    pub low_limit_warning: bool,
}

impl Diagnosis {
    pub fn is_over_limit(&self) -> bool {
        matches!(self.outcome, Outcome::OverLimit { .. })
    }
}

/// Diagnose a day using the default low-limit threshold.
pub fn diagnose(limit: f64, total_consumption: f64) -> Diagnosis {
    diagnose_with_threshold(limit, total_consumption, LOW_LIMIT_THRESHOLD)
}

/// Diagnose a day, warning when `limit < low_limit_threshold`.
pub fn diagnose_with_threshold(
    limit: f64,
    total_consumption: f64,
    low_limit_threshold: f64,
) -> Diagnosis {
    let difference = limit - total_consumption;
    let outcome = if difference >= 0.0 {
        Outcome::UnderLimit {
            surplus: difference,
        }
    } else {
        Outcome::OverLimit {
            excess: -difference,
        }
    };

    Diagnosis {
        limit,
        total_consumption,
        difference,
        outcome,
        low_limit_warning: limit < low_limit_threshold,
    }
}

/// Invalid form input. Nothing is saved when this is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("limit {value} kcal is outside the accepted range {min}–{max} kcal")]
    LimitOutOfRange { value: f64, min: f64, max: f64 },
    #[error("meal {index} must be a non-negative number of kcal, got {value}")]
    InvalidMeal { index: usize, value: f64 },
    #[error("at most {max} meals can be entered, got {count}")]
    TooManyMeals { count: usize, max: usize },
    #[error("total consumption {total} kcal is not a finite number")]
    TotalNotFinite { total: f64 },
}

/// One form submission: the declared limit and up to five meal entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyInput {
    pub limit: f64,
    #[serde(default)]
    pub meals: Vec<f64>,
}

impl DailyInput {
    pub fn new(limit: f64, meals: Vec<f64>) -> Self {
        Self { limit, meals }
    }

    /// Check the input against the form's domain.
    pub fn validate(&self, bounds: &InputBounds) -> Result<(), InputError> {
        if !self.limit.is_finite()
            || self.limit < bounds.limit_min
            || self.limit > bounds.limit_max
        {
            return Err(InputError::LimitOutOfRange {
                value: self.limit,
                min: bounds.limit_min,
                max: bounds.limit_max,
            });
        }
        if self.meals.len() > MEAL_COUNT {
            return Err(InputError::TooManyMeals {
                count: self.meals.len(),
                max: MEAL_COUNT,
            });
        }
        if let Some((i, &value)) = self
            .meals
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_finite() || **m < 0.0)
        {
            return Err(InputError::InvalidMeal {
                index: i + 1,
                value,
            });
        }
        let total = self.total_consumption();
        if !total.is_finite() {
            return Err(InputError::TotalNotFinite { total });
        }
        Ok(())
    }

    /// Sum of the meal entries.
    pub fn total_consumption(&self) -> f64 {
        self.meals.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_limit_without_warning() {
        let d = diagnose(2000.0, 1800.0);
        assert_eq!(d.difference, 200.0);
        assert_eq!(d.outcome, Outcome::UnderLimit { surplus: 200.0 });
        assert!(!d.low_limit_warning);
        assert!(!d.is_over_limit());
    }

    #[test]
    fn over_limit_with_low_limit_warning() {
        let d = diagnose(1100.0, 1500.0);
        assert_eq!(d.difference, -400.0);
        assert_eq!(d.outcome, Outcome::OverLimit { excess: 400.0 });
        assert!(d.low_limit_warning);
        assert!(d.is_over_limit());
    }

    #[test]
    fn exactly_at_limit_is_under() {
        let d = diagnose(1800.0, 1800.0);
        assert_eq!(d.outcome, Outcome::UnderLimit { surplus: 0.0 });
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!diagnose(1200.0, 0.0).low_limit_warning);
        assert!(diagnose(1199.5, 0.0).low_limit_warning);
        assert!(!diagnose_with_threshold(1199.5, 0.0, 1000.0).low_limit_warning);
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(diagnose(1100.0, 1500.0)).unwrap();
        assert_eq!(json["outcome"]["kind"], "over_limit");
        assert_eq!(json["outcome"]["excess"], 400.0);
        assert_eq!(json["low_limit_warning"], true);
    }

    #[test]
    fn total_sums_meals() {
        let input = DailyInput::new(2000.0, vec![300.0, 450.5, 0.0, 600.0, 120.0]);
        assert_eq!(input.total_consumption(), 1470.5);
        assert_eq!(DailyInput::new(2000.0, vec![]).total_consumption(), 0.0);
    }

    #[test]
    fn validate_accepts_form_domain() {
        let bounds = InputBounds::default();
        assert!(DailyInput::new(500.0, vec![0.0; 5]).validate(&bounds).is_ok());
        assert!(DailyInput::new(10000.0, vec![]).validate(&bounds).is_ok());
    }

    #[test]
    fn validate_rejects_limit_out_of_range() {
        let bounds = InputBounds::default();
        let err = DailyInput::new(499.0, vec![]).validate(&bounds).unwrap_err();
        assert!(matches!(err, InputError::LimitOutOfRange { .. }));
        assert!(
            DailyInput::new(f64::NAN, vec![])
                .validate(&bounds)
                .is_err()
        );
    }

    #[test]
    fn validate_rejects_negative_meal() {
        let bounds = InputBounds::default();
        let err = DailyInput::new(2000.0, vec![100.0, -1.0])
            .validate(&bounds)
            .unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidMeal {
                index: 2,
                value: -1.0
            }
        );
    }

    #[test]
    fn validate_rejects_sixth_meal() {
        let bounds = InputBounds::default();
        let err = DailyInput::new(2000.0, vec![1.0; 6])
            .validate(&bounds)
            .unwrap_err();
        assert_eq!(err, InputError::TooManyMeals { count: 6, max: 5 });
    }

    #[test]
    fn validate_rejects_overflowing_total() {
        let bounds = InputBounds::default();
        let input = DailyInput::new(2000.0, vec![1e308, 1e308]);
        assert!(input.meals.iter().all(|m| m.is_finite()));

        let err = input.validate(&bounds).unwrap_err();
        assert_eq!(
            err,
            InputError::TotalNotFinite {
                total: f64::INFINITY
            }
        );
    }
}
