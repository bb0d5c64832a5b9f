//! Keybinding system for menu input
//!
//! Provides a registry of keybindings that change with the menu mode
//! (single-select, multi-select, yes/no confirmation) and the footer hints
//! derived from it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use strum::{Display, EnumIter};

/// Input context of a menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MenuMode {
    Single,
    Multi,
    Confirm,
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    /// Focus the n-th entry (zero based)
    Jump(usize),
    Toggle,
    Confirm,
    Skip,
    Reset,
    Interrupt,
    Yes,
    No,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // Terminals report SHIFT inconsistently for printable characters
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers - KeyModifiers::SHIFT,
            _ => event.modifiers,
        };
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Context-aware keybinding registry
#[derive(Debug, Clone)]
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<MenuMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![Keybinding::with_modifiers(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyAction::Interrupt,
            "Ctrl+C",
            "Abort",
        )];

        let list_bindings = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Navigate down"),
            Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
            Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
            Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "Go to first"),
            Keybinding::new(KeyCode::End, KeyAction::End, "End", "Go to last"),
            Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Select"),
            Keybinding::new(KeyCode::Esc, KeyAction::Skip, "Esc", "Skip"),
            Keybinding::with_modifiers(
                KeyCode::Char('r'),
                KeyModifiers::CONTROL,
                KeyAction::Reset,
                "Ctrl+R",
                "Reset",
            ),
        ];

        self.mode_bindings
            .insert(MenuMode::Single, list_bindings.clone());

        let mut multi_bindings = list_bindings;
        multi_bindings.push(Keybinding::new(
            KeyCode::Char(' '),
            KeyAction::Toggle,
            "Space",
            "Toggle entry",
        ));
        multi_bindings.push(Keybinding::new(
            KeyCode::Tab,
            KeyAction::Toggle,
            "Tab",
            "Toggle entry",
        ));
        self.mode_bindings.insert(MenuMode::Multi, multi_bindings);

        self.mode_bindings.insert(
            MenuMode::Confirm,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::Toggle, "Left", "Select Yes"),
                Keybinding::new(KeyCode::Right, KeyAction::Toggle, "Right", "Select No"),
                Keybinding::new(KeyCode::Tab, KeyAction::Toggle, "Tab", "Toggle selection"),
                Keybinding::new(KeyCode::Char('y'), KeyAction::Yes, "Y", "Yes"),
                Keybinding::new(KeyCode::Char('n'), KeyAction::No, "N", "No"),
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Confirm"),
                Keybinding::new(KeyCode::Esc, KeyAction::No, "Esc", "Cancel"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: MenuMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(&mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Translate a key event into an action for the given mode
    pub fn resolve(&self, mode: MenuMode, event: &KeyEvent) -> Option<KeyAction> {
        if let Some(binding) = self.get_bindings(mode).into_iter().find(|b| b.matches(event)) {
            return Some(binding.action);
        }

        // Number keys jump straight to the first nine entries
        match (mode, event.code) {
            (MenuMode::Single | MenuMode::Multi, KeyCode::Char(c @ '1'..='9'))
                if event.modifiers - KeyModifiers::SHIFT == KeyModifiers::NONE =>
            {
                Some(KeyAction::Jump(c as usize - '1' as usize))
            }
            _ => None,
        }
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: MenuMode, allow_skip: bool, allow_reset: bool) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let mut priority_actions = match mode {
            MenuMode::Single => vec![KeyAction::NavigateUp, KeyAction::Confirm],
            MenuMode::Multi => vec![KeyAction::NavigateUp, KeyAction::Toggle, KeyAction::Confirm],
            MenuMode::Confirm => vec![KeyAction::Toggle, KeyAction::Confirm, KeyAction::No],
        };
        if mode != MenuMode::Confirm {
            if allow_skip {
                priority_actions.push(KeyAction::Skip);
            }
            if allow_reset {
                priority_actions.push(KeyAction::Reset);
            }
            priority_actions.push(KeyAction::Interrupt);
        }

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                // Combine Up/Down navigation
                if action == KeyAction::NavigateUp {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: "Navigate".to_string(),
                    });
                } else {
                    items.push(NavBarItem {
                        key_display: binding.display.clone(),
                        action_label: binding.description.clone(),
                    });
                }
            }
        }

        items
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    /// Render a list of items as a single footer line
    pub fn join(items: &[NavBarItem]) -> String {
        items
            .iter()
            .map(|item| format!("{}: {}", item.key_display, item.action_label))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
