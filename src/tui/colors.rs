//! Color constants for the terminal user interface.

use ratatui::style::Color;

// These mirror the chart palette used across the board and reports views.

/// Used for to-do items
pub const SLATE: Color = Color::Rgb(148, 163, 184);
/// Used for in-progress items and medium priority
pub const AMBER: Color = Color::Rgb(255, 153, 31);
/// Used for testing items and the active sprint badge
pub const BRIGHT_BLUE: Color = Color::Rgb(0, 101, 255);
/// Used for done items and low priority
pub const SEA_GREEN: Color = Color::Rgb(0, 135, 90);
/// Used for high priority
pub const DARK_RED: Color = Color::Rgb(222, 53, 11);
