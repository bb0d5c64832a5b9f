//! Centralized theme and styling for menus
//!
//! Single source of truth for the colors and styles the terminal frontend
//! uses, so every menu in an installer run looks the same.
//!
//! # Usage
//! ```rust
//! use archselect::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let cursor = Styles::cursor();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for menus
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, the cursor
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for checked entries
    pub const SECONDARY: Color = Color::Yellow;

    /// Background of the focused row
    pub const HIGHLIGHT_BG: Color = Color::Blue;

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    /// Danger border for destructive confirmations
    pub const SEVERITY_DANGER: Color = Color::Red;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for menu elements
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Menu title
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header rows and caller header text
    pub fn header() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// The `"> "` cursor in front of the focused row
    pub fn cursor() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused row
    pub fn highlight() -> Style {
        Style::default()
            .bg(Colors::HIGHLIGHT_BG)
            .fg(Colors::FG_SECONDARY)
    }

    /// Checked entry in a multi-select menu
    pub fn checked() -> Style {
        Style::default().fg(Colors::SECONDARY)
    }

    /// Active border
    pub fn border() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Transient status messages
    pub fn status() -> Style {
        Style::default()
            .fg(Colors::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Footer key hints
    pub fn hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Selected button in a confirmation dialog
    pub fn button_selected() -> Style {
        Style::default()
            .bg(Colors::PRIMARY)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    }

    /// Unselected button in a confirmation dialog
    pub fn button() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }
}
