//! Effort table: intensity factors keyed by effort level (RPE) and rep count.
//!
//! An intensity factor is the fraction of an estimated one-rep max that can
//! be lifted for a given number of reps at a given effort.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Effort level that anchors the one-rep-max estimate.
pub const REFERENCE_LEVEL: u8 = 10;
/// Rep count that anchors the one-rep-max estimate.
pub const REFERENCE_REPS: u8 = 1;

// Each whole RPE below 10 behaves like one extra rep at RPE 10.
const RPE_CURVE: [f64; 17] = [
    1.000, 0.955, 0.922, 0.892, 0.863, 0.837, 0.811, 0.786, 0.762, 0.739, 0.707, 0.680, 0.653,
    0.626, 0.599, 0.574, 0.550,
];
const CHART_MAX_REPS: u8 = 12;

/// One row of a table as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortRow {
    pub level: u8,
    /// Factors for 1, 2, 3, ... reps.
    pub factors: Vec<f64>,
}

/// Validated, read-only effort table.
#[derive(Debug, Clone, PartialEq)]
pub struct EffortTable {
    rows: BTreeMap<u8, Vec<f64>>,
}

impl EffortTable {
    /// Build a table, rejecting empty tables and factors outside `(0, 1]`.
    pub fn new(rows: impl IntoIterator<Item = EffortRow>) -> Result<Self, ConfigError> {
        let mut table = BTreeMap::new();
        for row in rows {
            for (i, &factor) in row.factors.iter().enumerate() {
                if !(factor > 0.0 && factor <= 1.0) {
                    return Err(ConfigError::InvalidIntensity {
                        level: row.level,
                        reps: u8::try_from(i + 1).unwrap_or(u8::MAX),
                        factor,
                    });
                }
            }
            table.insert(row.level, row.factors);
        }
        if table.is_empty() {
            return Err(ConfigError::EmptyEffortTable);
        }
        Ok(Self { rows: table })
    }

    /// The standard RPE chart for efforts 5 through 10 and 1 through 12 reps.
    pub fn rpe_chart() -> Self {
        let rows = (5..=REFERENCE_LEVEL)
            .map(|level| {
                let offset = usize::from(REFERENCE_LEVEL - level);
                let factors: Vec<f64> = RPE_CURVE
                    .iter()
                    .skip(offset)
                    .take(usize::from(CHART_MAX_REPS))
                    .copied()
                    .collect();
                (level, factors)
            })
            .collect();
        Self { rows }
    }

    pub fn factor(&self, level: u8, reps: u8) -> Option<f64> {
        let index = usize::from(reps).checked_sub(1)?;
        self.rows.get(&level)?.get(index).copied()
    }

    pub fn contains(&self, level: u8) -> bool {
        self.rows.contains_key(&level)
    }

    /// Effort levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.keys().copied()
    }

    /// Check that every level can be looked up at `fixed_reps` and that the
    /// one-rep-max reference entry exists.
    pub fn check_reps(&self, fixed_reps: u8) -> Result<(), ConfigError> {
        for level in self.levels() {
            if self.factor(level, fixed_reps).is_none() {
                return Err(ConfigError::MissingRepCount {
                    level,
                    reps: fixed_reps,
                });
            }
        }
        if self.factor(REFERENCE_LEVEL, REFERENCE_REPS).is_none() {
            return Err(ConfigError::MissingRepCount {
                level: REFERENCE_LEVEL,
                reps: REFERENCE_REPS,
            });
        }
        Ok(())
    }

    /// Rescale a load lifted at `from` effort to the equivalent load at `to`
    /// effort for the same rep count. Returns `None` if either lookup misses.
    pub(crate) fn rescale(&self, load: i64, from: u8, to: u8, reps: u8) -> Option<f64> {
        let old = self.factor(from, reps)?;
        let new = self.factor(to, reps)?;
        Some(load as f64 / old * new)
    }
}

impl Default for EffortTable {
    fn default() -> Self {
        Self::rpe_chart()
    }
}
