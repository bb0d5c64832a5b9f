//! archselect library
//!
//! Terminal selection menus for installer workflows: plain option lists and
//! tables of domain records, single or multi-select, with presets, defaults,
//! previews and typed results.

pub mod cli;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod frontend;
pub mod menu;
pub mod table;
pub mod theme;

// Re-export main types for convenience
pub use config::MenuConfig;
pub use context::{MenuContext, PreviewLocation};
pub use error::{Result, SelectError};
pub use frontend::{ConfirmAnswer, MenuFrontend, ScriptedFrontend, TerminalFrontend};
pub use menu::{
    KeyAction, MenuMode, MenuOption, PreviewBridge, ResultKind, Selection, SelectionEngine,
    SelectionResult,
};
pub use table::{ColumnFormatter, FormattedTable, Formatter, TableEntry, TableMenu, TableRecord};
