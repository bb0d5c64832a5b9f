//! Headless frontend driven by a queue of actions
//!
//! Used for unattended runs and for exercising menus in tests: every frame
//! the engine renders is captured as a [`RenderedView`].

use std::collections::VecDeque;

use super::{ConfirmAnswer, MenuFrontend, MenuView, ViewRow};
use crate::error::Result;
use crate::menu::{KeyAction, MenuMode};

/// Owned snapshot of one rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub title: String,
    pub header: Option<String>,
    pub labels: Vec<String>,
    pub cursor: usize,
    pub checked: Vec<usize>,
    pub mode: MenuMode,
    pub preview: Option<String>,
    pub status: Option<String>,
    pub hints: String,
}

impl From<&MenuView<'_>> for RenderedView {
    fn from(view: &MenuView<'_>) -> Self {
        Self {
            title: view.title.to_string(),
            header: view.header.map(str::to_string),
            labels: view.rows.iter().map(|r| r.label.to_string()).collect(),
            cursor: view.cursor,
            checked: view
                .rows
                .iter()
                .enumerate()
                .filter(|(_, r)| r.checked)
                .map(|(idx, _)| idx)
                .collect(),
            mode: view.mode,
            preview: view.preview.map(str::to_string),
            status: view.status.map(str::to_string),
            hints: view.hints.clone(),
        }
    }
}

impl RenderedView {
    /// Borrow the snapshot as a view again, e.g. to redraw after a resize
    pub fn as_view(&self) -> MenuView<'_> {
        MenuView {
            title: &self.title,
            header: self.header.as_deref(),
            rows: self
                .labels
                .iter()
                .enumerate()
                .map(|(idx, label)| ViewRow {
                    label,
                    focused: idx == self.cursor,
                    checked: self.checked.contains(&idx),
                })
                .collect(),
            cursor: self.cursor,
            mode: self.mode,
            preview: self.preview.as_deref(),
            status: self.status.as_deref(),
            hints: self.hints.clone(),
        }
    }
}

/// Frontend that replays queued actions.
///
/// When the queue runs dry it answers with [`KeyAction::Interrupt`], so a
/// menu that keeps looping still terminates. Unanswered confirmations are
/// declined.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    actions: VecDeque<KeyAction>,
    answers: VecDeque<ConfirmAnswer>,
    views: Vec<RenderedView>,
    questions: Vec<String>,
}

impl ScriptedFrontend {
    pub fn new(actions: impl IntoIterator<Item = KeyAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue answers for confirmation questions
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = ConfirmAnswer>) -> Self {
        self.answers = answers.into_iter().collect();
        self
    }

    pub fn push_action(&mut self, action: KeyAction) {
        self.actions.push_back(action);
    }

    /// Every frame rendered so far
    pub fn views(&self) -> &[RenderedView] {
        &self.views
    }

    pub fn last_view(&self) -> Option<&RenderedView> {
        self.views.last()
    }

    /// Confirmation questions asked so far
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Actions not consumed by the menu
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl MenuFrontend for ScriptedFrontend {
    fn render(&mut self, view: &MenuView<'_>) -> Result<()> {
        self.views.push(RenderedView::from(view));
        Ok(())
    }

    fn next_action(&mut self, _mode: MenuMode) -> Result<KeyAction> {
        Ok(self.actions.pop_front().unwrap_or(KeyAction::Interrupt))
    }

    fn confirm(&mut self, question: &str) -> Result<ConfirmAnswer> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(ConfirmAnswer::No))
    }
}
