//! Shared settings for a series of menus
//!
//! Installer flows show many menus in a row. Instead of a process-wide
//! registry, the caller builds one [`MenuContext`] and passes it to every
//! frontend it creates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::menu::KeybindingContext;

/// Where the preview pane is placed relative to the options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PreviewLocation {
    #[default]
    Right,
    Bottom,
}

/// Settings shared by all menus of one session
#[derive(Debug, Clone, Default)]
pub struct MenuContext {
    pub keybindings: KeybindingContext,
    pub preview_location: PreviewLocation,
}

impl MenuContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_location(mut self, location: PreviewLocation) -> Self {
        self.preview_location = location;
        self
    }

    pub fn with_keybindings(mut self, keybindings: KeybindingContext) -> Self {
        self.keybindings = keybindings;
        self
    }
}
