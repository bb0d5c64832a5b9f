//! Generic selection menus
//!
//! A menu offers labelled values and returns a [`SelectionResult`]. The
//! [`SelectionEngine`] owns the state machine; drawing and input are delegated
//! to a [`crate::frontend::MenuFrontend`].

pub mod engine;
pub mod keys;
pub mod preview;

pub use engine::{EngineState, SelectionEngine};
pub use keys::{KeyAction, Keybinding, KeybindingContext, MenuMode, NavBarItem};
pub use preview::PreviewBridge;

use serde::Serialize;
use strum::Display;

/// A value offered to the operator under a label
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOption<V> {
    /// Identity of the option; presets and defaults refer to it
    pub label: String,
    pub value: V,
    /// Text drawn instead of `label`
    pub display: Option<String>,
    /// Selectable even when the drawn text is blank
    pub keep_blank: bool,
}

impl<V> MenuOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
            display: None,
            keep_blank: false,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Never treat this option as a blank separator row
    pub fn keep_blank(mut self) -> Self {
        self.keep_blank = true;
        self
    }
}

impl MenuOption<String> {
    /// Option whose value is its own label
    pub fn text(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }
}

/// Chosen value(s); the shape follows the menu's `multi` setting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Selection<V> {
    Single(V),
    Multi(Vec<V>),
}

impl<V> Selection<V> {
    /// Chosen values in order
    pub fn into_vec(self) -> Vec<V> {
        match self {
            Selection::Single(value) => vec![value],
            Selection::Multi(values) => values,
        }
    }

    pub fn single(self) -> Option<V> {
        match self {
            Selection::Single(value) => Some(value),
            Selection::Multi(_) => None,
        }
    }

    pub fn multi(self) -> Option<Vec<V>> {
        match self {
            Selection::Multi(values) => Some(values),
            Selection::Single(_) => None,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> Selection<U> {
        match self {
            Selection::Single(value) => Selection::Single(f(value)),
            Selection::Multi(values) => Selection::Multi(values.into_iter().map(f).collect()),
        }
    }
}

/// Discriminant of a [`SelectionResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResultKind {
    Selected,
    Skipped,
    Reset,
    Interrupted,
}

/// Terminal outcome of one menu invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SelectionResult<V> {
    /// The operator confirmed a choice
    Selected(Selection<V>),
    /// The operator left the menu; carries the default if one was configured
    Skipped(Option<Selection<V>>),
    /// The operator cleared the value
    Reset,
    /// Hard cancel (Ctrl+C)
    Interrupted,
}

impl<V> SelectionResult<V> {
    pub fn kind(&self) -> ResultKind {
        match self {
            SelectionResult::Selected(_) => ResultKind::Selected,
            SelectionResult::Skipped(_) => ResultKind::Skipped,
            SelectionResult::Reset => ResultKind::Reset,
            SelectionResult::Interrupted => ResultKind::Interrupted,
        }
    }

    /// Selected value, or the default carried by a skip
    pub fn value(self) -> Option<Selection<V>> {
        match self {
            SelectionResult::Selected(selection) => Some(selection),
            SelectionResult::Skipped(default) => default,
            SelectionResult::Reset | SelectionResult::Interrupted => None,
        }
    }

    pub fn map<U>(self, f: impl FnMut(V) -> U) -> SelectionResult<U> {
        match self {
            SelectionResult::Selected(selection) => SelectionResult::Selected(selection.map(f)),
            SelectionResult::Skipped(default) => {
                SelectionResult::Skipped(default.map(|selection| selection.map(f)))
            }
            SelectionResult::Reset => SelectionResult::Reset,
            SelectionResult::Interrupted => SelectionResult::Interrupted,
        }
    }
}
