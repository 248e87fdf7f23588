//! Color theme constants for the treeline UI.
//!
//! Defines the minimal dark palette used by the document view and chrome.

use ratatui::style::Color;

/// Object member keys.
pub const COLOR_KEY: Color = Color::Cyan;

/// Implicit array-index keys; quieter than named keys.
pub const COLOR_INDEX: Color = Color::DarkGray;

/// Container delimiters (`[` and `]`).
pub const COLOR_DELIMITER: Color = Color::Yellow;

/// String values.
pub const COLOR_STRING: Color = Color::Green;

/// Numbers, booleans and null.
pub const COLOR_SCALAR: Color = Color::White;

/// Terminal error lines.
pub const COLOR_ERROR: Color = Color::Red;

/// Indent guides and skeleton placeholder bars.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Header text (file name).
pub const COLOR_HEADER: Color = Color::White;

/// Read-progress and position indicator.
pub const COLOR_PROGRESS: Color = Color::Gray;

/// Footer key hints.
pub const COLOR_HINT: Color = Color::DarkGray;
