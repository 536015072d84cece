//! Sizing, color, and styling constants for the stepper.

use floem::peniko::Color;

/// Value box width
pub const BOX_WIDTH: f32 = 88.0;

/// Value box height
pub const BOX_HEIGHT: f32 = 60.0;

/// Border radius for the value box and effort chips
pub const RADIUS: f32 = 8.0;

/// Gap between stepper elements
pub const GAP: f32 = 16.0;

/// Padding around the whole stepper
pub const PADDING: f32 = 12.0;

/// Title label font size
pub const TITLE_FONT: f32 = 40.0;

/// Value and derived number font size
pub const VALUE_FONT: f32 = 32.0;

/// Caption font size (derived labels, unit, effort chips)
pub const CAPTION_FONT: f32 = 12.0;

/// Chevron button size
pub const CHEVRON_SIZE: f32 = 20.0;

pub const MONOSPACE: &str = "monospace";

pub const BORDER: Color = Color::rgb8(136, 136, 136);
pub const BOX_BACKGROUND: Color = Color::rgb8(249, 249, 249);
pub const CAPTION: Color = Color::rgb8(120, 120, 120);
pub const SELECTED: Color = Color::rgb8(59, 130, 246);
