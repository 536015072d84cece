//! # floem-stepper
//!
//! A weight stepper widget for [Floem](https://github.com/lapce/floem).
//!
//! Pick a load by dragging the value box up or down, scrolling over it, or
//! pressing the arrow keys. The value is clamped to a configured range,
//! persisted to a key-value store, and shown alongside derived numbers:
//! either fixed percentage conversions or, in effort mode, a one-rep-max
//! estimate and warm-up range read from an RPE table.
//!
//! The interaction logic lives in [`Stepper`] and works without a window.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_stepper::{weight_stepper, MemoryStore, Stepper, StepperConfig};
//!
//! let stepper = Stepper::new(StepperConfig::default(), MemoryStore::new()).unwrap();
//! let (handle, view) = weight_stepper(stepper);
//! // Put `view` in your Floem view tree; use `handle` to read or set the value.
//! ```

mod bounds;
mod config;
mod constants;
mod display;
mod effort;
mod error;
mod gesture;
mod math;
mod stepper;
mod store;
mod view;

pub use bounds::Bounds;
pub use config::{DEFAULT_TOUCH_THRESHOLD, DEFAULT_WHEEL_THRESHOLD, DisplayConfig, StepperConfig};
pub use display::{DerivedValue, DisplayMode, Percentage};
pub use effort::{EffortRow, EffortTable, REFERENCE_LEVEL, REFERENCE_REPS};
pub use error::{ConfigError, StepperError, StoreError};
pub use gesture::{DragTracker, KeyCommand, WheelAccumulator};
pub use math::pad_display;
pub use stepper::Stepper;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use view::StepperHandle;

use std::sync::Once;

use floem::prelude::*;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the stepper view.
///
/// Returns a handle for reading and setting the value from outside the view
/// tree, and the view itself.
pub fn weight_stepper(stepper: Stepper) -> (StepperHandle, impl IntoView) {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    view::stepper_view(stepper)
}
