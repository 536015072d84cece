//! Derived display values computed from the stepper value.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effort::{EffortTable, REFERENCE_LEVEL, REFERENCE_REPS};
use crate::math::{pad_display, round_to_i64};

/// Warm-up range as fractions of the estimated one-rep max.
const WARMUP_LOW: f64 = 0.60;
const WARMUP_HIGH: f64 = 0.75;

/// A fixed multiplier shown next to the value, e.g. `1 / 0.85` labelled "100%".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    pub multiplier: f64,
    pub label: String,
}

impl Percentage {
    pub fn new(multiplier: f64, label: impl Into<String>) -> Self {
        Self {
            multiplier,
            label: label.into(),
        }
    }
}

/// One labelled number derived from the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedValue {
    pub label: String,
    pub value: i64,
}

impl DerivedValue {
    /// The value padded to display width with non-breaking spaces.
    pub fn formatted(&self) -> String {
        pad_display(self.value)
    }
}

/// How the derived row is computed.
#[derive(Debug, Clone)]
pub enum DisplayMode {
    /// `round(value * multiplier)` for each entry.
    Percentages(Vec<Percentage>),
    /// One-rep-max estimate and warm-up range for the current effort level.
    Effort {
        table: Arc<EffortTable>,
        fixed_reps: u8,
    },
}

impl DisplayMode {
    pub fn compute(&self, value: i64, effort: Option<u8>) -> Vec<DerivedValue> {
        match self {
            DisplayMode::Percentages(percentages) => percentages
                .iter()
                .map(|p| DerivedValue {
                    label: p.label.clone(),
                    value: round_to_i64(value as f64 * p.multiplier),
                })
                .collect(),
            DisplayMode::Effort { table, fixed_reps } => {
                let lookup = effort.and_then(|level| {
                    let current = table.factor(level, *fixed_reps)?;
                    let reference = table.factor(REFERENCE_LEVEL, REFERENCE_REPS)?;
                    Some((current, reference))
                });
                let Some((current, reference)) = lookup else {
                    return Vec::new();
                };
                let v = value as f64;
                vec![
                    DerivedValue {
                        label: "1RM".to_string(),
                        value: round_to_i64(v * reference / current),
                    },
                    DerivedValue {
                        label: "warm-up from".to_string(),
                        value: round_to_i64(v * WARMUP_LOW / current),
                    },
                    DerivedValue {
                        label: "warm-up to".to_string(),
                        value: round_to_i64(v * WARMUP_HIGH / current),
                    },
                ]
            }
        }
    }

    pub fn effort_table(&self) -> Option<(&EffortTable, u8)> {
        match self {
            DisplayMode::Percentages(_) => None,
            DisplayMode::Effort { table, fixed_reps } => Some((table.as_ref(), *fixed_reps)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(derived: &[DerivedValue]) -> Vec<i64> {
        derived.iter().map(|d| d.value).collect()
    }

    #[test]
    fn percentages_round_each_multiplier() {
        let mode = DisplayMode::Percentages(vec![
            Percentage::new(1.0 / 0.85, "100%"),
            Percentage::new(0.65 / 0.85, "65%"),
        ]);
        let derived = mode.compute(100, None);
        assert_eq!(values(&derived), vec![118, 76]);
        assert_eq!(derived[0].label, "100%");
        assert_eq!(derived[1].formatted(), "\u{a0}76");
    }

    #[test]
    fn effort_mode_estimates_max_and_warmup() {
        let mode = DisplayMode::Effort {
            table: Arc::new(EffortTable::rpe_chart()),
            fixed_reps: 1,
        };
        // 100 at RPE 8 for a single: factor 0.922.
        let derived = mode.compute(100, Some(8));
        assert_eq!(values(&derived), vec![108, 65, 81]);
        assert_eq!(derived[0].label, "1RM");
    }

    #[test]
    fn effort_mode_at_reference_is_identity() {
        let mode = DisplayMode::Effort {
            table: Arc::new(EffortTable::rpe_chart()),
            fixed_reps: 1,
        };
        assert_eq!(values(&mode.compute(140, Some(10))), vec![140, 84, 105]);
    }

    #[test]
    fn effort_mode_without_level_is_empty() {
        let mode = DisplayMode::Effort {
            table: Arc::new(EffortTable::rpe_chart()),
            fixed_reps: 1,
        };
        assert!(mode.compute(100, None).is_empty());
        assert!(mode.compute(100, Some(3)).is_empty());
    }
}
