//! Table menus over domain records
//!
//! Records are rendered once through a [`Formatter`], projected into
//! selectable rows by [`ProjectedTable`], matched against prior selections by
//! [`preset::resolve`] and finally offered through a plain
//! [`crate::menu::SelectionEngine`] by [`TableMenu`].

pub mod format;
pub mod menu;
pub mod preset;
pub mod projector;

pub use format::{Cell, ColumnFormatter, FormattedTable, Formatter, TableRecord};
pub use menu::{TableEntry, TableMenu, TablePreview};
pub use projector::{HEADER_PADDING, ProjectedRow, ProjectedTable, RowTarget};
