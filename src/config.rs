//! Stepper configuration and its validation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::display::{DisplayMode, Percentage};
use crate::effort::{EffortRow, EffortTable};
use crate::error::ConfigError;

/// Pixels of vertical drag per step.
pub const DEFAULT_TOUCH_THRESHOLD: f64 = 30.0;
/// Accumulated wheel delta per step. Larger is less sensitive.
pub const DEFAULT_WHEEL_THRESHOLD: f64 = 17.0;

/// Everything needed to build a [`Stepper`](crate::Stepper).
///
/// Missing fields take the defaults of a squat-load selector: 20–160 kg in
/// 1 kg steps with 100% and 65% conversions from an 85% working set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub label: String,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub storage_key: String,
    /// Key for the effort level. Only used in effort mode.
    pub effort_storage_key: String,
    /// Overrides the persisted value when set.
    pub initial: Option<i64>,
    pub display: DisplayConfig,
    pub touch_threshold: f64,
    pub wheel_threshold: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            label: "SQUAT".to_string(),
            min: 20,
            max: 160,
            step: 1,
            storage_key: "number-selector-value".to_string(),
            effort_storage_key: "number-selector-rpe".to_string(),
            initial: None,
            display: DisplayConfig::default(),
            touch_threshold: DEFAULT_TOUCH_THRESHOLD,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
        }
    }
}

/// Derived-row configuration, tagged by `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayConfig {
    Percentages {
        #[serde(default = "default_percentages")]
        percentages: Vec<Percentage>,
    },
    Effort {
        /// Custom table; the standard RPE chart when absent.
        #[serde(default)]
        table: Option<Vec<EffortRow>>,
        #[serde(default = "default_fixed_reps")]
        fixed_reps: u8,
        #[serde(default = "default_effort")]
        default_effort: u8,
    },
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig::Percentages {
            percentages: default_percentages(),
        }
    }
}

impl DisplayConfig {
    /// Effort mode with the standard RPE chart for singles at RPE 8.
    pub fn effort() -> Self {
        DisplayConfig::Effort {
            table: None,
            fixed_reps: default_fixed_reps(),
            default_effort: default_effort(),
        }
    }
}

fn default_percentages() -> Vec<Percentage> {
    vec![
        Percentage::new(1.0 / 0.85, "100%"),
        Percentage::new(0.65 / 0.85, "65%"),
    ]
}

fn default_fixed_reps() -> u8 {
    1
}

fn default_effort() -> u8 {
    8
}

/// A configuration that passed every check.
#[derive(Debug, Clone)]
pub(crate) struct Validated {
    pub bounds: Bounds,
    pub display: DisplayMode,
    pub default_effort: Option<u8>,
}

impl StepperConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Check bounds, thresholds, and the effort table without building a
    /// stepper.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated().map(|_| ())
    }

    pub(crate) fn validated(&self) -> Result<Validated, ConfigError> {
        let bounds = Bounds::new(self.min, self.max, self.step)?;
        check_threshold("touch", self.touch_threshold)?;
        check_threshold("wheel", self.wheel_threshold)?;

        let (display, default_effort) = match &self.display {
            DisplayConfig::Percentages { percentages } => {
                (DisplayMode::Percentages(percentages.clone()), None)
            }
            DisplayConfig::Effort {
                table,
                fixed_reps,
                default_effort,
            } => {
                let table = match table {
                    Some(rows) => EffortTable::new(rows.iter().cloned())?,
                    None => EffortTable::rpe_chart(),
                };
                if !table.contains(*default_effort) {
                    return Err(ConfigError::UnknownEffort(*default_effort));
                }
                table.check_reps(*fixed_reps)?;
                let mode = DisplayMode::Effort {
                    table: Arc::new(table),
                    fixed_reps: *fixed_reps,
                };
                (mode, Some(*default_effort))
            }
        };

        Ok(Validated {
            bounds,
            display,
            default_effort,
        })
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_squat_selector() {
        let config = StepperConfig::default();
        assert_eq!((config.min, config.max, config.step), (20, 160, 1));
        assert_eq!(config.storage_key, "number-selector-value");
        assert!(config.validate().is_ok());
        match config.display {
            DisplayConfig::Percentages { percentages } => {
                assert_eq!(percentages.len(), 2);
                assert_eq!(percentages[1].label, "65%");
            }
            other => panic!("unexpected display {other:?}"),
        }
    }

    #[test]
    fn parses_partial_toml() {
        let config = StepperConfig::from_toml_str(
            r#"
            label = "BENCH"
            min = 40
            max = 200
            step = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.label, "BENCH");
        assert_eq!(config.step, 2);
        assert_eq!(config.wheel_threshold, DEFAULT_WHEEL_THRESHOLD);
    }

    #[test]
    fn parses_effort_mode() {
        let config = StepperConfig::from_toml_str(
            r#"
            [display]
            mode = "effort"
            fixed_reps = 3
            "#,
        )
        .unwrap();
        assert_eq!(
            config.display,
            DisplayConfig::Effort {
                table: None,
                fixed_reps: 3,
                default_effort: 8,
            }
        );
        let validated = config.validated().unwrap();
        assert_eq!(validated.default_effort, Some(8));
    }

    #[test]
    fn parses_custom_table() {
        let config = StepperConfig::from_toml_str(
            r#"
            [display]
            mode = "effort"
            default_effort = 9

            [[display.table]]
            level = 10
            factors = [1.0, 0.95]

            [[display.table]]
            level = 9
            factors = [0.95, 0.92]
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            StepperConfig::from_toml_str("min = \"low\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_bad_bounds_and_thresholds() {
        let inverted = StepperConfig {
            min: 100,
            max: 50,
            ..StepperConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));

        let no_wheel = StepperConfig {
            wheel_threshold: 0.0,
            ..StepperConfig::default()
        };
        assert!(matches!(
            no_wheel.validate(),
            Err(ConfigError::NonPositiveThreshold { name: "wheel", .. })
        ));
    }

    #[test]
    fn rejects_default_effort_outside_table() {
        let config = StepperConfig {
            display: DisplayConfig::Effort {
                table: None,
                fixed_reps: 1,
                default_effort: 11,
            },
            ..StepperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnknownEffort(11))));
    }

    #[test]
    fn rejects_fixed_reps_outside_table() {
        let config = StepperConfig {
            display: DisplayConfig::Effort {
                table: None,
                fixed_reps: 20,
                default_effort: 8,
            },
            ..StepperConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRepCount { reps: 20, .. })
        ));
    }
}
