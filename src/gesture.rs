//! Gesture interpretation: turning continuous pointer and wheel input into
//! whole step counts.
//!
//! Each channel is a small state machine that knows nothing about bounds.
//! It only reports signed step counts; the stepper applies and clamps them.

/// Vertical drag/swipe tracker.
///
/// Steps are `floor(displacement / threshold)`, with moving the pointer up
/// counting as positive displacement. The anchor advances by exactly the
/// distance consumed, so the non-negative remainder carries into the next
/// movement.
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f64,
    anchor: Option<f64>,
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            anchor: None,
        }
    }

    pub fn start(&mut self, y: f64) {
        self.anchor = Some(y);
    }

    /// Feed the current pointer position and return the steps it produces.
    ///
    /// Returns 0 when no drag is active or the displacement lies in
    /// `[0, threshold)`.
    pub fn update(&mut self, y: f64) -> i64 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        // Up the screen is toward larger values.
        let displacement = anchor - y;
        let steps = (displacement / self.threshold).floor();
        if steps == 0.0 {
            return 0;
        }
        self.anchor = Some(anchor - steps * self.threshold);
        steps as i64
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Accumulates wheel deltas and fires one step per threshold crossed.
///
/// `feed` takes amounts oriented so that positive means "increase". Firing in
/// either direction resets the accumulator to zero.
#[derive(Debug, Clone)]
pub struct WheelAccumulator {
    threshold: f64,
    accumulated: f64,
}

impl WheelAccumulator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            accumulated: 0.0,
        }
    }

    pub fn feed(&mut self, amount: f64) -> i64 {
        self.accumulated += amount;
        if self.accumulated >= self.threshold {
            self.accumulated = 0.0;
            1
        } else if self.accumulated <= -self.threshold {
            self.accumulated = 0.0;
            -1
        } else {
            0
        }
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

/// A discrete keyboard action on the stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Increment,
    Decrement,
}

impl KeyCommand {
    pub fn steps(self) -> i64 {
        match self {
            KeyCommand::Increment => 1,
            KeyCommand::Decrement => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drag_without_start_emits_nothing() {
        let mut drag = DragTracker::new(30.0);
        assert_eq!(drag.update(0.0), 0);
        assert!(!drag.is_active());
    }

    #[test]
    fn drag_exact_multiple_leaves_no_residual() {
        let mut drag = DragTracker::new(30.0);
        drag.start(200.0);
        assert_eq!(drag.update(110.0), 3);
        // A further 29px is still below one step.
        assert_eq!(drag.update(81.0), 0);
        assert_eq!(drag.update(80.0), 1);
    }

    #[test]
    fn drag_remainder_carries_forward() {
        let mut drag = DragTracker::new(30.0);
        drag.start(200.0);
        assert_eq!(drag.update(155.0), 1);
        // 15px left over; another 15px completes a step.
        assert_eq!(drag.update(140.0), 1);
    }

    #[test]
    fn drag_down_floors_and_keeps_positive_remainder() {
        let mut drag = DragTracker::new(30.0);
        drag.start(100.0);
        // -45 = -2 * 30 + 15
        assert_eq!(drag.update(145.0), -2);
        // Anchor sits at 160; 15px of upward credit remains.
        assert_eq!(drag.update(160.0), 0);
        assert_eq!(drag.update(190.0), -1);
        assert_eq!(drag.update(130.0), 2);
    }

    #[test]
    fn drag_small_downward_move_is_one_step_down() {
        let mut drag = DragTracker::new(30.0);
        drag.start(100.0);
        assert_eq!(drag.update(110.0), -1);
        // Anchor moved to 130; returning to the start recovers the step.
        assert_eq!(drag.update(100.0), 1);
        assert_eq!(drag.update(80.0), 0);
    }

    #[test]
    fn drag_end_stops_emission() {
        let mut drag = DragTracker::new(30.0);
        drag.start(100.0);
        drag.end();
        assert_eq!(drag.update(0.0), 0);
    }

    #[test]
    fn wheel_fires_at_threshold_and_resets() {
        let mut wheel = WheelAccumulator::new(17.0);
        assert_eq!(wheel.feed(10.0), 0);
        assert_eq!(wheel.feed(7.0), 1);
        assert_eq!(wheel.accumulated(), 0.0);
    }

    #[test]
    fn wheel_just_below_threshold_does_not_fire() {
        let mut wheel = WheelAccumulator::new(17.0);
        assert_eq!(wheel.feed(8.0), 0);
        assert_eq!(wheel.feed(8.0), 0);
        assert_eq!(wheel.accumulated(), 16.0);
    }

    #[test]
    fn wheel_decrease_direction_resets_too() {
        let mut wheel = WheelAccumulator::new(17.0);
        assert_eq!(wheel.feed(-20.0), -1);
        assert_eq!(wheel.accumulated(), 0.0);
        assert_eq!(wheel.feed(16.0), 0);
    }

    #[test]
    fn wheel_one_event_fires_once_regardless_of_size() {
        let mut wheel = WheelAccumulator::new(17.0);
        assert_eq!(wheel.feed(120.0), 1);
        assert_eq!(wheel.accumulated(), 0.0);
    }

    #[test]
    fn key_commands_are_single_steps() {
        assert_eq!(KeyCommand::Increment.steps(), 1);
        assert_eq!(KeyCommand::Decrement.steps(), -1);
    }

    proptest! {
        #[test]
        fn drag_emits_k_steps_and_keeps_remainder(k in -20i64..20, r in 0u32..30) {
            let mut drag = DragTracker::new(30.0);
            drag.start(1000.0);
            let displacement = k as f64 * 30.0 + f64::from(r);
            let y = 1000.0 - displacement;
            prop_assert_eq!(drag.update(y), k);
            // The remainder r stays banked: 30 - r more upward is one step.
            prop_assert_eq!(drag.update(y - f64::from(30 - r)), 1);
        }

        #[test]
        fn drag_steps_sum_to_floor_of_total(moves in prop::collection::vec(-90.0..90.0_f64, 1..20)) {
            let mut drag = DragTracker::new(30.0);
            drag.start(0.0);
            let mut y = 0.0;
            let mut total = 0;
            for m in moves {
                y -= m.round();
                total += drag.update(y);
            }
            prop_assert_eq!(total, (-y / 30.0).floor() as i64);
        }
    }
}
