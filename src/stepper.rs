//! The stepper control: value state, gesture dispatch, persistence, and
//! change notification.
//!
//! Every mutation funnels through one commit path: clamp, recompute the
//! derived row, write both persisted entries, then notify.

use crate::bounds::Bounds;
use crate::config::StepperConfig;
use crate::display::{DerivedValue, DisplayMode};
use crate::error::{ConfigError, StepperError};
use crate::gesture::{DragTracker, KeyCommand, WheelAccumulator};
use crate::math::{pad_display, round_to_i64};
use crate::store::KeyValueStore;

pub(crate) type ChangeCallback = Box<dyn FnMut(i64)>;

/// A bounded integer selector driven by drag, wheel, and keyboard input.
pub struct Stepper {
    label: String,
    bounds: Bounds,
    display: DisplayMode,
    value: i64,
    effort: Option<u8>,
    derived: Vec<DerivedValue>,
    drag: DragTracker,
    wheel: WheelAccumulator,
    store: Box<dyn KeyValueStore>,
    storage_key: String,
    effort_storage_key: String,
    on_change: Option<ChangeCallback>,
    commits: u64,
}

impl Stepper {
    /// Build a stepper, restoring state from `store`.
    ///
    /// The starting value is `config.initial`, else the stored value, else
    /// `min`, clamped in every case. Stored entries that do not parse are
    /// ignored.
    pub fn new(
        config: StepperConfig,
        store: impl KeyValueStore + 'static,
    ) -> Result<Self, ConfigError> {
        let validated = config.validated()?;
        let bounds = validated.bounds;

        let value = match config.initial {
            Some(initial) => initial,
            None => read_parsed::<i64>(&store, &config.storage_key).unwrap_or(bounds.min()),
        };
        let value = bounds.clamp(value);

        let effort = match (validated.display.effort_table(), validated.default_effort) {
            (Some((table, _)), Some(default)) => Some(
                read_parsed::<u8>(&store, &config.effort_storage_key)
                    .filter(|level| table.contains(*level))
                    .unwrap_or(default),
            ),
            _ => None,
        };

        let derived = validated.display.compute(value, effort);
        tracing::debug!(label = %config.label, value, ?effort, "stepper created");

        Ok(Self {
            label: config.label,
            bounds,
            display: validated.display,
            value,
            effort,
            derived,
            drag: DragTracker::new(config.touch_threshold),
            wheel: WheelAccumulator::new(config.wheel_threshold),
            store: Box::new(store),
            storage_key: config.storage_key,
            effort_storage_key: config.effort_storage_key,
            on_change: None,
            commits: 0,
        })
    }

    /// Register the callback fired after every committed change.
    ///
    /// When the stepper is driven through a
    /// [`StepperHandle`](crate::StepperHandle), the callback runs after the
    /// handle has released the stepper, so it may call back into the handle.
    pub fn set_on_change(&mut self, f: impl FnMut(i64) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    /// Detach the change callback so the caller can fire it outside a borrow.
    pub(crate) fn take_on_change(&mut self) -> Option<ChangeCallback> {
        self.on_change.take()
    }

    /// Reattach a callback taken with `take_on_change`, unless a new one was
    /// registered meanwhile.
    pub(crate) fn restore_on_change(&mut self, callback: Option<ChangeCallback>) {
        if self.on_change.is_none() {
            self.on_change = callback;
        }
    }

    /// Number of committed changes so far.
    pub(crate) fn commits(&self) -> u64 {
        self.commits
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// The value padded to display width.
    pub fn formatted_value(&self) -> String {
        pad_display(self.value)
    }

    /// Current effort level, or `None` in percentage mode.
    pub fn effort(&self) -> Option<u8> {
        self.effort
    }

    /// Selectable effort levels in ascending order; empty in percentage mode.
    pub fn effort_levels(&self) -> Vec<u8> {
        self.display
            .effort_table()
            .map(|(table, _)| table.levels().collect())
            .unwrap_or_default()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn derived(&self) -> &[DerivedValue] {
        &self.derived
    }

    /// Set the value directly. Out-of-range values are clamped.
    pub fn set_value(&mut self, v: i64) {
        self.commit(v);
    }

    /// Switch effort level, rescaling the value so the implied one-rep max
    /// stays the same.
    pub fn set_effort(&mut self, level: u8) -> Result<(), StepperError> {
        let rescaled = {
            let (table, reps) = self
                .display
                .effort_table()
                .ok_or(StepperError::NoEffortSelector)?;
            if !table.contains(level) {
                return Err(StepperError::UnknownEffort(level));
            }
            let from = self.effort.ok_or(StepperError::NoEffortSelector)?;
            table
                .rescale(self.value, from, level, reps)
                .ok_or(StepperError::UnknownEffort(level))?
        };
        tracing::debug!(from = ?self.effort, to = level, "effort changed");
        self.effort = Some(level);
        self.commit(round_to_i64(rescaled));
        Ok(())
    }

    pub fn drag_start(&mut self, y: f64) {
        self.drag.start(y);
    }

    /// Feed a drag position. Returns `true` while a drag is active, meaning
    /// the host should consume the event.
    pub fn drag_move(&mut self, y: f64) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        let steps = self.drag.update(y);
        self.apply_steps(steps);
        true
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Feed a platform wheel delta (positive scrolls down and decreases).
    ///
    /// Always returns `true`: wheel input over the stepper never scrolls the
    /// page.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let steps = self.wheel.feed(-delta_y);
        self.apply_steps(steps);
        true
    }

    pub fn key(&mut self, command: KeyCommand) -> bool {
        self.apply_steps(command.steps())
    }

    fn apply_steps(&mut self, steps: i64) -> bool {
        if steps == 0 {
            return false;
        }
        tracing::debug!(steps, from = self.value, "applying steps");
        self.commit(self.bounds.offset(self.value, steps));
        true
    }

    fn commit(&mut self, v: i64) {
        self.value = self.bounds.clamp(v);
        self.derived = self.display.compute(self.value, self.effort);
        self.persist();
        self.commits = self.commits.wrapping_add(1);
        if let Some(cb) = self.on_change.as_mut() {
            cb(self.value);
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.set(&self.storage_key, &self.value.to_string()) {
            tracing::warn!(key = %self.storage_key, %err, "failed to persist value");
        }
        if let Some(effort) = self.effort
            && let Err(err) = self.store.set(&self.effort_storage_key, &effort.to_string())
        {
            tracing::warn!(key = %self.effort_storage_key, %err, "failed to persist effort");
        }
    }
}

fn read_parsed<T: std::str::FromStr>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, raw = %raw, "ignoring malformed stored entry");
            None
        }
    }
}
