//! Rendering and input collaborators for menus
//!
//! The engine never touches the terminal directly. It hands a [`MenuView`]
//! to a [`MenuFrontend`] and asks it for the next [`KeyAction`].

pub mod scripted;
pub mod terminal;

pub use scripted::{RenderedView, ScriptedFrontend};
pub use terminal::TerminalFrontend;

use strum::Display;

use crate::error::Result;
use crate::menu::{KeyAction, MenuMode};

/// One option line as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow<'a> {
    /// Text exactly as it should appear
    pub label: &'a str,
    pub focused: bool,
    /// Only meaningful for multi-select menus
    pub checked: bool,
}

/// Everything a frontend needs to draw one frame of a menu
#[derive(Debug, Clone)]
pub struct MenuView<'a> {
    pub title: &'a str,
    /// Caller header text, e.g. table column titles
    pub header: Option<&'a str>,
    pub rows: Vec<ViewRow<'a>>,
    pub cursor: usize,
    pub mode: MenuMode,
    pub preview: Option<&'a str>,
    /// Transient message such as a rejected skip
    pub status: Option<&'a str>,
    /// Footer key hints
    pub hints: String,
}

/// Operator answer to a yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConfirmAnswer {
    Yes,
    No,
    /// Hard cancel while the question was shown
    Interrupted,
}

/// Draws menus and reads operator input
pub trait MenuFrontend {
    /// Draw the current menu state
    fn render(&mut self, view: &MenuView<'_>) -> Result<()>;

    /// Block until the operator triggers an action
    fn next_action(&mut self, mode: MenuMode) -> Result<KeyAction>;

    /// Ask a yes/no question
    fn confirm(&mut self, question: &str) -> Result<ConfirmAnswer>;
}

impl<F: MenuFrontend + ?Sized> MenuFrontend for &mut F {
    fn render(&mut self, view: &MenuView<'_>) -> Result<()> {
        (**self).render(view)
    }

    fn next_action(&mut self, mode: MenuMode) -> Result<KeyAction> {
        (**self).next_action(mode)
    }

    fn confirm(&mut self, question: &str) -> Result<ConfirmAnswer> {
        (**self).confirm(question)
    }
}
