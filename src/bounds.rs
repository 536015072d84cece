//! Bounds policy: the `[min, max]` range and step size of a stepper.

use crate::error::ConfigError;

/// Immutable range and step for a stepper value.
///
/// Construction guarantees `min < max` and `step > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: i64,
    max: i64,
    step: i64,
}

impl Bounds {
    pub fn new(min: i64, max: i64, step: i64) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if step <= 0 {
            return Err(ConfigError::NonPositiveStep(step));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Saturate `v` into `[min, max]`. Total over all of `i64`.
    pub fn clamp(&self, v: i64) -> i64 {
        v.clamp(self.min, self.max)
    }

    /// Apply `steps` step units to `value` and clamp the result.
    pub fn offset(&self, value: i64, steps: i64) -> i64 {
        self.clamp(value.saturating_add(steps.saturating_mul(self.step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn squat() -> Bounds {
        Bounds::new(20, 160, 1).unwrap()
    }

    #[test]
    fn rejects_inverted_or_empty_range() {
        assert!(matches!(
            Bounds::new(10, 10, 1),
            Err(ConfigError::InvalidBounds { min: 10, max: 10 })
        ));
        assert!(Bounds::new(11, 10, 1).is_err());
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(matches!(Bounds::new(0, 10, 0), Err(ConfigError::NonPositiveStep(0))));
        assert!(Bounds::new(0, 10, -2).is_err());
    }

    #[test]
    fn clamp_saturates_both_ends() {
        let b = squat();
        assert_eq!(b.clamp(5), 20);
        assert_eq!(b.clamp(500), 160);
        assert_eq!(b.clamp(100), 100);
        assert_eq!(b.clamp(i64::MIN), 20);
        assert_eq!(b.clamp(i64::MAX), 160);
    }

    #[test]
    fn offset_scales_by_step() {
        let b = Bounds::new(0, 100, 5).unwrap();
        assert_eq!(b.offset(50, 2), 60);
        assert_eq!(b.offset(50, -3), 35);
        assert_eq!(b.offset(95, 4), 100);
        assert_eq!(b.offset(0, i64::MIN), 0);
    }

    proptest! {
        #[test]
        fn clamp_is_idempotent_and_in_range(v in any::<i64>()) {
            let b = squat();
            let once = b.clamp(v);
            prop_assert_eq!(b.clamp(once), once);
            prop_assert!(once >= b.min() && once <= b.max());
        }
    }
}
