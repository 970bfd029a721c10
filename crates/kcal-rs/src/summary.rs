//! Running totals and averages over the whole history.

use serde::Serialize;

use crate::record::Record;

/// Aggregate view of a history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub sum_limit: f64,
    pub sum_consumption: f64,
    /// `0.0` for an empty history.
    pub avg_limit: f64,
    /// `0.0` for an empty history.
    pub avg_consumption: f64,
}

impl Summary {
    pub fn from_records(records: &[Record]) -> Self {
        let count = records.len();
        let (sum_limit, sum_consumption) = records
            .iter()
            .fold((0.0, 0.0), |(l, c), r| (l + r.limit, c + r.consumption));

        let (avg_limit, avg_consumption) = if count == 0 {
            (0.0, 0.0)
        } else {
            (sum_limit / count as f64, sum_consumption / count as f64)
        };

        Self {
            count,
            sum_limit,
            sum_consumption,
            avg_limit,
            avg_consumption,
        }
    }

    /// Whether there is anything to average.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_averages_to_zero() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_limit, 0.0);
        assert_eq!(summary.avg_consumption, 0.0);
        assert!(summary.is_empty());
    }

    #[test]
    fn two_records() {
        let records = [Record::new(2000.0, 1800.0), Record::new(1800.0, 1900.0)];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.sum_limit, 3800.0);
        assert_eq!(summary.sum_consumption, 3700.0);
        assert_eq!(summary.avg_limit, 1900.0);
        assert_eq!(summary.avg_consumption, 1850.0);
        assert!(!summary.is_empty());
    }

    #[test]
    fn single_record_is_its_own_average() {
        let summary = Summary::from_records(&[Record::new(1500.0, 1234.5)]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_limit, 1500.0);
        assert_eq!(summary.avg_consumption, 1234.5);
    }
}
