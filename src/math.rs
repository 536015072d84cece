//! Rounding and fixed-width formatting for displayed numbers.

/// Width every displayed number is padded to.
pub(crate) const DISPLAY_WIDTH: usize = 3;

/// Round to the nearest integer, ties away from zero.
pub(crate) fn round_to_i64(x: f64) -> i64 {
    x.round() as i64
}

/// Left-pad `n` with non-breaking spaces to [`DISPLAY_WIDTH`] columns.
pub fn pad_display(n: i64) -> String {
    format!("{n:\u{a0}>width$}", width = DISPLAY_WIDTH)
}
