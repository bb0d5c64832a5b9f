//! Single/multi-select state machine
//!
//! The engine orders the options (default entry pinned first, optional
//! alphabetical sort, extra options last), restores presets, then loops over
//! frontend actions until one of them resolves the menu.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, warn};

use super::keys::{KeyAction, KeybindingContext, MenuMode, NavBarItem};
use super::preview::PreviewBridge;
use super::{MenuOption, ResultKind, Selection, SelectionResult};
use crate::config::{DEFAULT_SUFFIX, MenuConfig};
use crate::error::{Result, SelectError};
use crate::frontend::{ConfirmAnswer, MenuFrontend, MenuView, ViewRow};

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

const MANDATORY_MESSAGE: &str = "Selection is mandatory";

/// Lifecycle of one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    AwaitingInput,
    Resolved(ResultKind),
}

#[derive(Debug)]
struct Entry<V> {
    /// Label as supplied by the caller
    key: String,
    /// Label as displayed
    label: String,
    value: V,
    is_default: bool,
    keep_blank: bool,
}

impl<V> Entry<V> {
    fn focusable(&self) -> bool {
        self.keep_blank || !self.label.trim().is_empty()
    }
}

enum Outcome {
    Selected(Vec<usize>),
    Skipped,
    Reset,
    Interrupted,
}

/// Generic selection menu over values of type `V`
pub struct SelectionEngine<'a, V> {
    config: MenuConfig,
    title: String,
    entries: Vec<Entry<V>>,
    cursor: usize,
    checked: BTreeSet<usize>,
    preview: Option<PreviewBridge<'a, V>>,
    keybindings: KeybindingContext,
    state: EngineState,
    status: Option<String>,
}

impl<V> std::fmt::Debug for SelectionEngine<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("title", &self.config.title)
            .field("labels", &self.labels())
            .field("cursor", &self.cursor)
            .field("checked", &self.checked)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SelectionEngine<'_, String> {
    /// Plain text menu whose values are the labels themselves.
    ///
    /// A default that is not among `labels` is offered as an extra entry, and
    /// `config.extra_options` are appended as text options.
    pub fn from_labels<I, S>(labels: I, config: MenuConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options: Vec<MenuOption<String>> =
            labels.into_iter().map(MenuOption::text).collect();

        if options.is_empty() && config.extra_options.is_empty() {
            return Err(SelectError::config("menu requires at least one option"));
        }

        if let Some(default) = &config.default {
            let known = options.iter().any(|o| &o.label == default)
                || config.extra_options.contains(default);
            if !known {
                options.push(MenuOption::text(default.clone()));
            }
        }

        options.extend(config.extra_options.iter().map(MenuOption::text));
        Self::new(options, config)
    }
}

impl<'a, V> SelectionEngine<'a, V> {
    /// Build an engine, checking every precondition before anything is drawn.
    ///
    /// When `config.extra_options` is set, the last options must carry those
    /// labels in the same order.
    pub fn new(options: Vec<MenuOption<V>>, config: MenuConfig) -> Result<Self> {
        if options.is_empty() {
            return Err(SelectError::config("menu requires at least one option"));
        }
        config
            .validate()
            .map_err(|e| SelectError::config(e.to_string()))?;

        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.label.as_str()) {
                return Err(SelectError::config(format!(
                    "duplicate option label: {:?}",
                    option.label
                )));
            }
        }

        let extras = config.extra_options.len();
        if extras > options.len()
            || options[options.len() - extras..]
                .iter()
                .zip(&config.extra_options)
                .any(|(option, extra)| &option.label != extra)
        {
            return Err(SelectError::config(
                "extra options must be the last offered options",
            ));
        }

        let mut entries: Vec<Entry<V>> = options
            .into_iter()
            .map(|option| Entry {
                label: option.display.unwrap_or_else(|| option.label.clone()),
                key: option.label,
                value: option.value,
                is_default: false,
                keep_blank: option.keep_blank,
            })
            .collect();
        let mut extra_entries = entries.split_off(entries.len() - extras);

        let mut pinned = None;
        if let Some(default) = &config.default {
            let take = |list: &mut Vec<Entry<V>>| {
                list.iter()
                    .position(|e| &e.key == default)
                    .map(|pos| list.remove(pos))
            };
            let mut entry = take(&mut entries)
                .or_else(|| take(&mut extra_entries))
                .ok_or_else(|| {
                    SelectError::config(format!(
                        "default option {default:?} is not among the offered options"
                    ))
                })?;
            entry.label = format!("{}{}", entry.label, DEFAULT_SUFFIX);
            entry.is_default = true;
            pinned = Some(entry);
        }

        if config.sort {
            entries.sort_by(|a, b| a.label.cmp(&b.label));
        }

        let mut ordered: Vec<Entry<V>> = pinned.into_iter().collect();
        ordered.extend(entries);
        ordered.extend(extra_entries);

        let mut seen = HashSet::new();
        if let Some(entry) = ordered.iter().find(|e| !seen.insert(e.label.clone())) {
            return Err(SelectError::config(format!(
                "label {:?} is displayed more than once",
                entry.label
            )));
        }

        if !ordered.iter().any(Entry::focusable) {
            return Err(SelectError::config("menu has no selectable options"));
        }

        let mut engine = Self {
            title: config.display_title(),
            config,
            entries: ordered,
            cursor: 0,
            checked: BTreeSet::new(),
            preview: None,
            keybindings: KeybindingContext::default(),
            state: EngineState::Idle,
            status: None,
        };

        let start = engine
            .config
            .cursor_index
            .filter(|&idx| idx < engine.entries.len())
            .unwrap_or(0);
        engine.move_to(start, true);

        debug!(
            title = %engine.config.title,
            options = engine.entries.len(),
            multi = engine.config.multi,
            "menu created"
        );
        Ok(engine)
    }

    /// Restore a prior selection given by (undecorated) labels.
    ///
    /// Multi-select menus check every known label; single-select menus move
    /// the cursor to the first known one. Unknown labels are ignored.
    pub fn with_presets<I, S>(mut self, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let indices: Vec<usize> = presets
            .into_iter()
            .filter_map(|preset| {
                let found = self.entries.iter().position(|e| e.key == preset.as_ref());
                if found.is_none() {
                    debug!(preset = preset.as_ref(), "preset not offered, ignoring");
                }
                found
            })
            .filter(|&idx| self.entries[idx].focusable())
            .collect();

        if self.config.multi {
            self.checked.extend(indices);
        } else if let Some(&first) = indices.first() {
            self.cursor = first;
        }
        self
    }

    pub fn with_preview(mut self, preview: PreviewBridge<'a, V>) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn with_keybindings(mut self, keybindings: KeybindingContext) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Display labels in display order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices of checked entries, ascending
    pub fn checked(&self) -> Vec<usize> {
        self.checked.iter().copied().collect()
    }

    fn mode(&self) -> MenuMode {
        if self.config.multi {
            MenuMode::Multi
        } else {
            MenuMode::Single
        }
    }

    /// Show the menu and block until the operator resolves it.
    ///
    /// The options are handed back inside the result, so an engine can only
    /// be run once.
    pub fn run<F>(&mut self, frontend: &mut F) -> Result<SelectionResult<V>>
    where
        F: MenuFrontend + ?Sized,
    {
        if let EngineState::Resolved(kind) = self.state {
            return Err(SelectError::config(format!("menu was already {kind}")));
        }
        self.state = EngineState::AwaitingInput;
        debug!(title = %self.config.title, "awaiting input");

        loop {
            self.refresh_preview();
            frontend.render(&self.view())?;

            let action = frontend.next_action(self.mode())?;
            if let Some(outcome) = self.apply(action, frontend)? {
                return Ok(self.finish(outcome));
            }
        }
    }

    fn refresh_preview(&mut self) {
        if let Some(preview) = self.preview.as_mut() {
            let entry = &self.entries[self.cursor];
            preview.focus(self.cursor, &entry.label, &entry.value);
        }
    }

    fn view(&self) -> MenuView<'_> {
        let skippable = self.config.allow_skip || self.config.default.is_some();
        MenuView {
            title: &self.title,
            header: self.config.header.as_deref(),
            rows: self
                .entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| ViewRow {
                    label: &entry.label,
                    focused: idx == self.cursor,
                    checked: self.checked.contains(&idx),
                })
                .collect(),
            cursor: self.cursor,
            mode: self.mode(),
            preview: self.preview.as_ref().and_then(PreviewBridge::text),
            status: self.status.as_deref(),
            hints: NavBarItem::join(&self.keybindings.get_nav_items(
                self.mode(),
                skippable,
                self.config.allow_reset,
            )),
        }
    }

    /// Apply one action, returning an outcome when the menu is resolved
    fn apply<F>(&mut self, action: KeyAction, frontend: &mut F) -> Result<Option<Outcome>>
    where
        F: MenuFrontend + ?Sized,
    {
        self.status = None;

        match action {
            KeyAction::NavigateUp => self.step(false),
            KeyAction::NavigateDown => self.step(true),
            KeyAction::PageUp => {
                let target = self.cursor.saturating_sub(PAGE_SIZE);
                self.move_to(target, true);
            }
            KeyAction::PageDown => {
                let target = (self.cursor + PAGE_SIZE).min(self.entries.len() - 1);
                self.move_to(target, false);
            }
            KeyAction::Home => self.move_to(0, true),
            KeyAction::End => self.move_to(self.entries.len() - 1, false),
            KeyAction::Jump(idx) => {
                if self.entries.get(idx).is_some_and(Entry::focusable) {
                    self.cursor = idx;
                }
            }
            KeyAction::Toggle => {
                if self.config.multi && !self.checked.remove(&self.cursor) {
                    self.checked.insert(self.cursor);
                }
            }
            KeyAction::Confirm => {
                let chosen = if self.config.multi && !self.checked.is_empty() {
                    self.checked.iter().copied().collect()
                } else {
                    vec![self.cursor]
                };
                return Ok(Some(Outcome::Selected(chosen)));
            }
            KeyAction::Skip => {
                if self.config.is_mandatory() {
                    debug!("skip rejected, selection is mandatory");
                    self.status = Some(MANDATORY_MESSAGE.to_string());
                } else {
                    return Ok(Some(Outcome::Skipped));
                }
            }
            KeyAction::Reset => {
                if !self.config.allow_reset {
                    warn!("reset requested but not enabled for this menu");
                } else if let Some(question) = &self.config.reset_warning {
                    match frontend.confirm(question)? {
                        ConfirmAnswer::Yes => return Ok(Some(Outcome::Reset)),
                        ConfirmAnswer::No => debug!("reset declined"),
                        ConfirmAnswer::Interrupted => return Ok(Some(Outcome::Interrupted)),
                    }
                } else {
                    return Ok(Some(Outcome::Reset));
                }
            }
            KeyAction::Interrupt => return Ok(Some(Outcome::Interrupted)),
            KeyAction::Yes | KeyAction::No => {}
        }

        Ok(None)
    }

    fn step(&mut self, forward: bool) {
        let len = self.entries.len();
        let mut idx = self.cursor;
        for _ in 0..len {
            idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if self.entries[idx].focusable() {
                self.cursor = idx;
                return;
            }
        }
    }

    fn move_to(&mut self, target: usize, forward: bool) {
        if let Some(idx) = self
            .next_focusable(target, forward)
            .or_else(|| self.next_focusable(target, !forward))
        {
            self.cursor = idx;
        }
    }

    /// First focusable index at or after (or before) `from`, without wrapping
    fn next_focusable(&self, from: usize, forward: bool) -> Option<usize> {
        if forward {
            (from..self.entries.len()).find(|&i| self.entries[i].focusable())
        } else {
            (0..=from).rev().find(|&i| self.entries[i].focusable())
        }
    }

    fn finish(&mut self, outcome: Outcome) -> SelectionResult<V> {
        let multi = self.config.multi;
        let entries = std::mem::take(&mut self.entries);
        self.checked.clear();

        // Single-select outcomes always carry exactly one index
        let shape = |mut values: Vec<V>| {
            if multi {
                Selection::Multi(values)
            } else {
                Selection::Single(values.remove(0))
            }
        };

        let result = match outcome {
            Outcome::Selected(indices) => {
                SelectionResult::Selected(shape(take_values(entries, &indices)))
            }
            Outcome::Skipped => {
                let default = entries.iter().position(|e| e.is_default);
                SelectionResult::Skipped(default.map(|idx| shape(take_values(entries, &[idx]))))
            }
            Outcome::Reset => SelectionResult::Reset,
            Outcome::Interrupted => SelectionResult::Interrupted,
        };

        self.state = EngineState::Resolved(result.kind());
        info!(title = %self.config.title, outcome = %result.kind(), "menu resolved");
        result
    }
}

/// Move the values at `indices` out of `entries`, keeping `indices` order
fn take_values<V>(entries: Vec<Entry<V>>, indices: &[usize]) -> Vec<V> {
    let mut slots: Vec<Option<V>> = entries.into_iter().map(|e| Some(e.value)).collect();
    indices.iter().filter_map(|&idx| slots[idx].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ScriptedFrontend;

    fn labels(items: &[&str], config: MenuConfig) -> SelectionEngine<'static, String> {
        SelectionEngine::from_labels(items.iter().copied(), config).unwrap()
    }

    #[test]
    fn test_sorted_labels() {
        let engine = labels(&["b", "a", "c"], MenuConfig::default());
        assert_eq!(engine.labels(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_pinned_before_sorted_labels() {
        let engine = labels(&["b", "a", "c"], MenuConfig::default().with_default("c"));
        assert_eq!(engine.labels(), vec!["c (default)", "a", "b"]);
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let engine = labels(&["b", "a", "c"], MenuConfig::default().with_sort(false));
        assert_eq!(engine.labels(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extra_options_stay_last() {
        let config = MenuConfig::default().with_extra_options(["Custom mirror"]);
        let engine = labels(&["zz", "aa"], config);
        assert_eq!(engine.labels(), vec!["aa", "zz", "Custom mirror"]);
    }

    #[test]
    fn test_default_missing_from_labels_is_added() {
        let engine = labels(&["grub"], MenuConfig::default().with_default("systemd-boot"));
        assert_eq!(engine.labels(), vec!["systemd-boot (default)", "grub"]);
    }

    #[test]
    fn test_empty_menu_rejected() {
        let err = SelectionEngine::from_labels(Vec::<String>::new(), MenuConfig::default())
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = SelectionEngine::from_labels(["a", "a"], MenuConfig::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unknown_default_rejected_for_values() {
        let options = vec![MenuOption::new("one", 1), MenuOption::new("two", 2)];
        let err = SelectionEngine::new(options, MenuConfig::default().with_default("three"))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_blank_only_menu_rejected() {
        let err = SelectionEngine::from_labels(["", "  "], MenuConfig::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_kept_blank_option_is_selectable() {
        let options = vec![
            MenuOption::new("   ", 0).keep_blank(),
            MenuOption::new("", 1),
            MenuOption::new("  x", 2),
        ];
        let config = MenuConfig::default().with_sort(false);
        let mut engine = SelectionEngine::new(options, config).unwrap();
        assert_eq!(engine.cursor(), 0);

        let mut frontend = ScriptedFrontend::new([
            KeyAction::NavigateDown,
            KeyAction::NavigateDown,
            KeyAction::Confirm,
        ]);
        let result = engine.run(&mut frontend).unwrap();
        assert_eq!(result, SelectionResult::Selected(Selection::Single(0)));

        let cursors: Vec<usize> = frontend.views().iter().map(|v| v.cursor).collect();
        assert_eq!(cursors, vec![0, 2, 0]);
    }

    #[test]
    fn test_display_text_drawn_but_label_identifies() {
        let options = vec![
            MenuOption::new("b \\| 2", 2).with_display("b | 2"),
            MenuOption::new("a \\| 1", 1).with_display("a | 1"),
        ];
        let config = MenuConfig::default().with_default("b \\| 2");
        let engine = SelectionEngine::new(options, config)
            .unwrap()
            .with_presets(["a \\| 1"]);

        assert_eq!(engine.labels(), vec!["b | 2 (default)", "a | 1"]);
        assert_eq!(engine.cursor(), 1);
    }

    #[test]
    fn test_cursor_index_in_and_out_of_range() {
        let config = MenuConfig::default().with_sort(false).with_cursor_index(2);
        assert_eq!(labels(&["a", "b", "c"], config).cursor(), 2);

        let config = MenuConfig::default().with_sort(false).with_cursor_index(7);
        assert_eq!(labels(&["a", "b", "c"], config).cursor(), 0);
    }

    #[test]
    fn test_single_preset_moves_cursor() {
        let engine = labels(&["a", "b", "c"], MenuConfig::default().with_cursor_index(1))
            .with_presets(["c"]);
        assert_eq!(engine.cursor(), 2);
    }

    #[test]
    fn test_multi_presets_intersect_offered() {
        let engine = labels(&["a", "b", "c"], MenuConfig::default().with_multi(true))
            .with_presets(["c", "stale", "a"]);
        assert_eq!(engine.checked(), vec![0, 2]);
    }

    #[test]
    fn test_preset_matches_default_entry() {
        let config = MenuConfig::default().with_multi(true).with_default("b");
        let engine = labels(&["a", "b"], config).with_presets(["b"]);
        assert_eq!(engine.checked(), vec![0]);
    }

    #[test]
    fn test_navigation_wraps_and_skips_blank_rows() {
        let config = MenuConfig::default().with_sort(false);
        let mut engine = labels(&["a", "", "c"], config);
        let mut frontend = ScriptedFrontend::new([
            KeyAction::NavigateDown,
            KeyAction::NavigateDown,
            KeyAction::NavigateDown,
            KeyAction::Confirm,
        ]);
        let result = engine.run(&mut frontend).unwrap();
        assert_eq!(result, SelectionResult::Selected(Selection::Single("c".to_string())));

        let cursors: Vec<usize> = frontend.views().iter().map(|v| v.cursor).collect();
        assert_eq!(cursors, vec![0, 2, 0, 2]);
    }

    #[test]
    fn test_home_end_and_jump() {
        let config = MenuConfig::default().with_sort(false);
        let mut engine = labels(&["a", "b", "c", "d"], config);
        let mut frontend = ScriptedFrontend::new([
            KeyAction::End,
            KeyAction::Home,
            KeyAction::Jump(2),
            KeyAction::Jump(9),
            KeyAction::Confirm,
        ]);
        let result = engine.run(&mut frontend).unwrap();
        assert_eq!(result, SelectionResult::Selected(Selection::Single("c".to_string())));

        let cursors: Vec<usize> = frontend.views().iter().map(|v| v.cursor).collect();
        assert_eq!(cursors, vec![0, 3, 0, 2, 2]);
    }

    #[test]
    fn test_page_down_clamps() {
        let items: Vec<String> = (0..15).map(|i| format!("item{i:02}")).collect();
        let mut engine = SelectionEngine::from_labels(items, MenuConfig::default()).unwrap();
        let mut frontend = ScriptedFrontend::new([
            KeyAction::PageDown,
            KeyAction::PageDown,
            KeyAction::PageUp,
            KeyAction::Confirm,
        ]);
        let result = engine.run(&mut frontend).unwrap();
        assert_eq!(result, SelectionResult::Selected(Selection::Single("item04".to_string())));
    }

    #[test]
    fn test_toggle_ignored_in_single_select() {
        let mut engine = labels(&["a", "b"], MenuConfig::default());
        let mut frontend = ScriptedFrontend::new([KeyAction::Toggle, KeyAction::Confirm]);
        engine.run(&mut frontend).unwrap();
        assert!(frontend.views().iter().all(|v| v.checked.is_empty()));
    }

    #[test]
    fn test_multi_confirm_without_checks_takes_focus() {
        let mut engine = labels(&["a", "b"], MenuConfig::default().with_multi(true));
        let mut frontend = ScriptedFrontend::new([KeyAction::NavigateDown, KeyAction::Confirm]);
        let result = engine.run(&mut frontend).unwrap();
        assert_eq!(
            result,
            SelectionResult::Selected(Selection::Multi(vec!["b".to_string()]))
        );
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = labels(&["a"], MenuConfig::default());
        assert_eq!(engine.state(), EngineState::Idle);

        let mut frontend = ScriptedFrontend::new([KeyAction::Confirm]);
        engine.run(&mut frontend).unwrap();
        assert_eq!(engine.state(), EngineState::Resolved(ResultKind::Selected));
        assert!(engine.labels().is_empty());

        let err = engine.run(&mut frontend).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_mandatory_title_marker_in_view() {
        let mut engine = labels(&["a"], MenuConfig::new("Kernel").with_skip(false));
        let mut frontend = ScriptedFrontend::new([KeyAction::Confirm]);
        engine.run(&mut frontend).unwrap();
        assert_eq!(frontend.views()[0].title, "* Kernel");
    }
}
