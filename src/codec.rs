//! Row escaping for table rows used as option labels
//!
//! The `|` character is reserved by the menu layer (it separates a label from
//! auxiliary data in some frontends), so any literal occurrence inside a
//! rendered table row is escaped before the row becomes a lookup key.

/// Reserved separator character
pub const SEPARATOR: char = '|';

/// Escaped form of [`SEPARATOR`]
pub const ESCAPED_SEPARATOR: &str = "\\|";

/// Escape every separator in `row`
pub fn escape(row: &str) -> String {
    row.replace(SEPARATOR, ESCAPED_SEPARATOR)
}

/// Undo [`escape`]
pub fn unescape(row: &str) -> String {
    row.replace(ESCAPED_SEPARATOR, "|")
}

/// Whether `row` carries the reserved separator at all
pub fn contains_separator(row: &str) -> bool {
    row.contains(SEPARATOR)
}
