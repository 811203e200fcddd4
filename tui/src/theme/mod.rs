//! Theme and Colors
//!
//! BotsRig's palette. Terminal-safe RGB values; everything else uses the
//! terminal's default foreground.

use ratatui::style::Color;

// ============================================================================
// Brand
// ============================================================================

/// Title and selection accent
pub const BOTSRIG_ORANGE: Color = Color::Rgb(255, 140, 60);

/// Sidebar header
pub const SIDEBAR_HEADER: Color = Color::Rgb(200, 200, 220);

// ============================================================================
// Conversation
// ============================================================================

/// User turns and input
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Assistant turns
pub const ASSISTANT_BLUE: Color = Color::Rgb(150, 180, 255);

/// `Error: ` turns
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Busy indicator
pub const THINKING_YELLOW: Color = Color::Rgb(255, 223, 128);

/// Hints, separators, placeholder
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);
